use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, SqlErr,
};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::model::{NewPatient, Patient, PatientPatch, PatientUpdate};
use crate::domain::repos::PatientsRepository;
use crate::domain::service::patients::PATIENT_DELETE_PROTECTED;
use crate::infra::storage::db_err;
use crate::infra::storage::entity::patients;
use crate::infra::storage::mapper::patient_from_model;

pub struct SeaOrmPatientsRepository {
    db: DatabaseConnection,
}

impl SeaOrmPatientsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_scoped(
        &self,
        owner: Uuid,
        id: Uuid,
    ) -> Result<Option<patients::Model>, DomainError> {
        patients::Entity::find_by_id(id)
            .filter(patients::Column::OwnerId.eq(owner))
            .one(&self.db)
            .await
            .map_err(db_err)
    }
}

#[async_trait]
impl PatientsRepository for SeaOrmPatientsRepository {
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Patient>, DomainError> {
        let rows = patients::Entity::find()
            .filter(patients::Column::OwnerId.eq(owner))
            .order_by_desc(patients::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        rows.into_iter().map(patient_from_model).collect()
    }

    async fn get_for_owner(&self, owner: Uuid, id: Uuid) -> Result<Option<Patient>, DomainError> {
        self.find_scoped(owner, id)
            .await?
            .map(patient_from_model)
            .transpose()
    }

    async fn get(&self, id: Uuid) -> Result<Option<Patient>, DomainError> {
        patients::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(patient_from_model)
            .transpose()
    }

    async fn create(&self, owner: Uuid, patient: NewPatient) -> Result<Patient, DomainError> {
        let now = Utc::now();
        let active = patients::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(owner),
            name: Set(patient.name),
            age: Set(patient.age),
            gender: Set(patient.gender.to_string()),
            address: Set(patient.address),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = active.insert(&self.db).await.map_err(db_err)?;
        patient_from_model(model)
    }

    async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        update: PatientUpdate,
    ) -> Result<Option<Patient>, DomainError> {
        let Some(existing) = self.find_scoped(owner, id).await? else {
            return Ok(None);
        };

        let mut active = existing.into_active_model();
        active.name = Set(update.name);
        active.age = Set(update.age);
        active.gender = Set(update.gender.to_string());
        active.address = Set(update.address);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(db_err)?;
        patient_from_model(model).map(Some)
    }

    async fn patch(
        &self,
        owner: Uuid,
        id: Uuid,
        patch: PatientPatch,
    ) -> Result<Option<Patient>, DomainError> {
        let Some(existing) = self.find_scoped(owner, id).await? else {
            return Ok(None);
        };

        let mut active = existing.into_active_model();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(age) = patch.age {
            active.age = Set(age);
        }
        if let Some(gender) = patch.gender {
            active.gender = Set(gender.to_string());
        }
        if let Some(address) = patch.address {
            active.address = Set(address);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(db_err)?;
        patient_from_model(model).map(Some)
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, DomainError> {
        let result = patients::Entity::delete_many()
            .filter(patients::Column::Id.eq(id))
            .filter(patients::Column::OwnerId.eq(owner))
            .exec(&self.db)
            .await
            .map_err(|e| {
                // RESTRICT backstop: a mapping was created after the
                // service-level pre-check.
                if matches!(e.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))) {
                    DomainError::conflict(PATIENT_DELETE_PROTECTED)
                } else {
                    db_err(e)
                }
            })?;
        Ok(result.rows_affected > 0)
    }
}
