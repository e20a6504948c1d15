use std::sync::Arc;

use tracing::{debug, instrument};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::model::{Doctor, DoctorPatch, DoctorUpdate, NewDoctor};
use crate::domain::repos::{DoctorsRepository, MappingsRepository};

pub(crate) const DOCTOR_DELETE_PROTECTED: &str =
    "Cannot delete doctor. Please delete all associated patient-doctor mappings first.";

const MAX_FIELD_LEN: usize = 120;

/// Doctor management over the full, unscoped doctor set.
pub struct DoctorsService<D, M> {
    repo: Arc<D>,
    mappings: Arc<M>,
}

impl<D: DoctorsRepository, M: MappingsRepository> DoctorsService<D, M> {
    pub fn new(repo: Arc<D>, mappings: Arc<M>) -> Self {
        Self { repo, mappings }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Doctor>, DomainError> {
        self.repo.list().await
    }

    #[instrument(skip(self), fields(doctor_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Doctor, DomainError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Doctor"))
    }

    #[instrument(skip(self, doctor))]
    pub async fn create(&self, doctor: NewDoctor) -> Result<Doctor, DomainError> {
        validate_field("name", &doctor.name)?;
        validate_field("specialization", &doctor.specialization)?;

        let created = self.repo.create(doctor).await?;
        debug!(doctor_id = %created.id, "doctor created");
        Ok(created)
    }

    #[instrument(skip(self, update), fields(doctor_id = %id))]
    pub async fn update(&self, id: Uuid, update: DoctorUpdate) -> Result<Doctor, DomainError> {
        validate_field("name", &update.name)?;
        validate_field("specialization", &update.specialization)?;

        self.repo
            .update(id, update)
            .await?
            .ok_or_else(|| DomainError::not_found("Doctor"))
    }

    #[instrument(skip(self, patch), fields(doctor_id = %id))]
    pub async fn patch(&self, id: Uuid, patch: DoctorPatch) -> Result<Doctor, DomainError> {
        if let Some(ref name) = patch.name {
            validate_field("name", name)?;
        }
        if let Some(ref specialization) = patch.specialization {
            validate_field("specialization", specialization)?;
        }

        self.repo
            .patch(id, patch)
            .await?
            .ok_or_else(|| DomainError::not_found("Doctor"))
    }

    /// Delete a doctor, refusing while mappings still reference it.
    /// Same pre-check contract as patient deletion.
    #[instrument(skip(self), fields(doctor_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        if self.repo.get(id).await?.is_none() {
            return Err(DomainError::not_found("Doctor"));
        }

        if self.mappings.count_for_doctor(id).await? > 0 {
            return Err(DomainError::conflict(DOCTOR_DELETE_PROTECTED));
        }

        if !self.repo.delete(id).await? {
            return Err(DomainError::not_found("Doctor"));
        }
        debug!(doctor_id = %id, "doctor deleted");
        Ok(())
    }
}

fn validate_field(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "This field may not be blank."));
    }
    if value.chars().count() > MAX_FIELD_LEN {
        return Err(DomainError::validation(
            field,
            format!("Ensure this field has no more than {MAX_FIELD_LEN} characters."),
        ));
    }
    Ok(())
}
