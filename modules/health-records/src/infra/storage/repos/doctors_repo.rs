use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, SqlErr,
};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::model::{Doctor, DoctorPatch, DoctorUpdate, NewDoctor};
use crate::domain::repos::DoctorsRepository;
use crate::domain::service::doctors::DOCTOR_DELETE_PROTECTED;
use crate::infra::storage::db_err;
use crate::infra::storage::entity::doctors;

pub struct SeaOrmDoctorsRepository {
    db: DatabaseConnection,
}

impl SeaOrmDoctorsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DoctorsRepository for SeaOrmDoctorsRepository {
    async fn list(&self) -> Result<Vec<Doctor>, DomainError> {
        let rows = doctors::Entity::find()
            .order_by_desc(doctors::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Doctor>, DomainError> {
        let found = doctors::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn create(&self, doctor: NewDoctor) -> Result<Doctor, DomainError> {
        let now = Utc::now();
        let active = doctors::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(doctor.name),
            specialization: Set(doctor.specialization),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = active.insert(&self.db).await.map_err(db_err)?;
        Ok(model.into())
    }

    async fn update(&self, id: Uuid, update: DoctorUpdate) -> Result<Option<Doctor>, DomainError> {
        let Some(existing) = doctors::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active = existing.into_active_model();
        active.name = Set(update.name);
        active.specialization = Set(update.specialization);
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(model.into()))
    }

    async fn patch(&self, id: Uuid, patch: DoctorPatch) -> Result<Option<Doctor>, DomainError> {
        let Some(existing) = doctors::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active = existing.into_active_model();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(specialization) = patch.specialization {
            active.specialization = Set(specialization);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(model.into()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = doctors::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                // RESTRICT backstop: a mapping was created after the
                // service-level pre-check.
                if matches!(e.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))) {
                    DomainError::conflict(DOCTOR_DELETE_PROTECTED)
                } else {
                    db_err(e)
                }
            })?;
        Ok(result.rows_affected > 0)
    }
}
