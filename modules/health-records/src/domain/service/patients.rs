use std::sync::Arc;

use tracing::{debug, instrument};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::model::{NewPatient, Patient, PatientPatch, PatientUpdate};
use crate::domain::repos::{MappingsRepository, PatientsRepository};

pub(crate) const PATIENT_DELETE_PROTECTED: &str =
    "Cannot delete patient. Please delete all associated patient-doctor mappings first.";

const MAX_NAME_LEN: usize = 120;

/// Owner-scoped patient management. `owner` is always the requesting
/// user; records of other users read as absent.
pub struct PatientsService<P, M> {
    repo: Arc<P>,
    mappings: Arc<M>,
}

impl<P: PatientsRepository, M: MappingsRepository> PatientsService<P, M> {
    pub fn new(repo: Arc<P>, mappings: Arc<M>) -> Self {
        Self { repo, mappings }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, owner: Uuid) -> Result<Vec<Patient>, DomainError> {
        self.repo.list_by_owner(owner).await
    }

    #[instrument(skip(self), fields(patient_id = %id))]
    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<Patient, DomainError> {
        self.repo
            .get_for_owner(owner, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Patient"))
    }

    #[instrument(skip(self, patient))]
    pub async fn create(&self, owner: Uuid, patient: NewPatient) -> Result<Patient, DomainError> {
        validate_name(&patient.name)?;
        validate_age(patient.age)?;

        let created = self.repo.create(owner, patient).await?;
        debug!(patient_id = %created.id, "patient created");
        Ok(created)
    }

    #[instrument(skip(self, update), fields(patient_id = %id))]
    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        update: PatientUpdate,
    ) -> Result<Patient, DomainError> {
        validate_name(&update.name)?;
        validate_age(update.age)?;

        self.repo
            .update(owner, id, update)
            .await?
            .ok_or_else(|| DomainError::not_found("Patient"))
    }

    #[instrument(skip(self, patch), fields(patient_id = %id))]
    pub async fn patch(
        &self,
        owner: Uuid,
        id: Uuid,
        patch: PatientPatch,
    ) -> Result<Patient, DomainError> {
        if let Some(ref name) = patch.name {
            validate_name(name)?;
        }
        if let Some(age) = patch.age {
            validate_age(age)?;
        }

        self.repo
            .patch(owner, id, patch)
            .await?
            .ok_or_else(|| DomainError::not_found("Patient"))
    }

    /// Delete a patient, refusing while mappings still reference it.
    ///
    /// Dependent rows are checked up front so the caller gets the domain
    /// message instead of a raw constraint violation; the RESTRICT foreign
    /// key remains as the backstop for a lost race.
    #[instrument(skip(self), fields(patient_id = %id))]
    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), DomainError> {
        if self.repo.get_for_owner(owner, id).await?.is_none() {
            return Err(DomainError::not_found("Patient"));
        }

        if self.mappings.count_for_patient(id).await? > 0 {
            return Err(DomainError::conflict(PATIENT_DELETE_PROTECTED));
        }

        if !self.repo.delete(owner, id).await? {
            return Err(DomainError::not_found("Patient"));
        }
        debug!(patient_id = %id, "patient deleted");
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name", "This field may not be blank."));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::validation(
            "name",
            format!("Ensure this field has no more than {MAX_NAME_LEN} characters."),
        ));
    }
    Ok(())
}

fn validate_age(age: i32) -> Result<(), DomainError> {
    if age < 0 {
        return Err(DomainError::validation(
            "age",
            "Ensure this value is greater than or equal to 0.",
        ));
    }
    Ok(())
}
