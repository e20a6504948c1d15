use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, SqlErr,
};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::model::{Doctor, Mapping, MappingDetail};
use crate::domain::repos::MappingsRepository;
use crate::domain::service::mappings::ALREADY_ASSIGNED;
use crate::infra::storage::db_err;
use crate::infra::storage::entity::{doctors, mappings, patients};
use crate::infra::storage::mapper::patient_from_model;

pub struct SeaOrmMappingsRepository {
    db: DatabaseConnection,
}

impl SeaOrmMappingsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn doctors_by_id(
        &self,
        ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, doctors::Model>, DomainError> {
        let rows = doctors::Entity::find()
            .filter(doctors::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(|d| (d.id, d)).collect())
    }
}

#[async_trait]
impl MappingsRepository for SeaOrmMappingsRepository {
    async fn list_for_owner(&self, owner: Uuid) -> Result<Vec<MappingDetail>, DomainError> {
        // Join through patients for the ownership filter, then resolve
        // doctors in one batch.
        let rows = mappings::Entity::find()
            .find_also_related(patients::Entity)
            .filter(patients::Column::OwnerId.eq(owner))
            .order_by_desc(mappings::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let doctor_ids: Vec<Uuid> = rows.iter().map(|(m, _)| m.doctor_id).collect();
        let doctors = self.doctors_by_id(doctor_ids).await?;

        let mut details = Vec::with_capacity(rows.len());
        for (mapping, patient) in rows {
            let patient = patient
                .ok_or_else(|| DomainError::database("mapping references missing patient"))?;
            let doctor = doctors
                .get(&mapping.doctor_id)
                .cloned()
                .ok_or_else(|| DomainError::database("mapping references missing doctor"))?;
            details.push(MappingDetail {
                id: mapping.id,
                patient: patient_from_model(patient)?,
                doctor: doctor.into(),
                created_at: mapping.created_at,
            });
        }
        Ok(details)
    }

    async fn get_for_owner(&self, owner: Uuid, id: Uuid) -> Result<Option<Mapping>, DomainError> {
        let found = mappings::Entity::find_by_id(id)
            .find_also_related(patients::Entity)
            .filter(patients::Column::OwnerId.eq(owner))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(|(mapping, _)| mapping.into()))
    }

    async fn exists(&self, patient_id: Uuid, doctor_id: Uuid) -> Result<bool, DomainError> {
        let count = mappings::Entity::find()
            .filter(mappings::Column::PatientId.eq(patient_id))
            .filter(mappings::Column::DoctorId.eq(doctor_id))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn create(&self, patient_id: Uuid, doctor_id: Uuid) -> Result<Mapping, DomainError> {
        let active = mappings::ActiveModel {
            id: Set(Uuid::new_v4()),
            patient_id: Set(patient_id),
            doctor_id: Set(doctor_id),
            created_at: Set(Utc::now()),
        };

        let model = active.insert(&self.db).await.map_err(|e| {
            // Unique-pair backstop for creations racing the pre-check.
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                DomainError::conflict(ALREADY_ASSIGNED)
            } else {
                db_err(e)
            }
        })?;
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = mappings::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn doctors_for_patient(&self, patient_id: Uuid) -> Result<Vec<Doctor>, DomainError> {
        let rows = mappings::Entity::find()
            .filter(mappings::Column::PatientId.eq(patient_id))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        // The unique (patient, doctor) index makes these ids distinct.
        let doctor_ids: Vec<Uuid> = rows.iter().map(|m| m.doctor_id).collect();

        let listed = doctors::Entity::find()
            .filter(doctors::Column::Id.is_in(doctor_ids))
            .order_by_desc(doctors::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(listed.into_iter().map(Into::into).collect())
    }

    async fn count_for_patient(&self, patient_id: Uuid) -> Result<u64, DomainError> {
        mappings::Entity::find()
            .filter(mappings::Column::PatientId.eq(patient_id))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn count_for_doctor(&self, doctor_id: Uuid) -> Result<u64, DomainError> {
        mappings::Entity::find()
            .filter(mappings::Column::DoctorId.eq(doctor_id))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}
