use std::sync::Arc;

use tracing::{debug, instrument};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::model::{Doctor, Mapping, MappingDetail};
use crate::domain::repos::{DoctorsRepository, MappingsRepository, PatientsRepository};

pub(crate) const NOT_YOUR_PATIENT: &str = "You can only assign doctors to your own patients.";
pub(crate) const ALREADY_ASSIGNED: &str = "This doctor is already assigned to this patient.";

/// Patient-doctor mapping management, scoped through patient ownership.
pub struct MappingsService<M, P, D> {
    repo: Arc<M>,
    patients: Arc<P>,
    doctors: Arc<D>,
}

impl<M, P, D> MappingsService<M, P, D>
where
    M: MappingsRepository,
    P: PatientsRepository,
    D: DoctorsRepository,
{
    pub fn new(repo: Arc<M>, patients: Arc<P>, doctors: Arc<D>) -> Self {
        Self {
            repo,
            patients,
            doctors,
        }
    }

    /// Mappings over the requester's patients, newest first, with patient
    /// and doctor details inlined.
    #[instrument(skip(self))]
    pub async fn list(&self, owner: Uuid) -> Result<Vec<MappingDetail>, DomainError> {
        self.repo.list_for_owner(owner).await
    }

    /// Create a mapping. Ownership is checked first, regardless of
    /// whether the doctor even exists; the duplicate pre-check produces
    /// the domain message while the unique index backstops races.
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        owner: Uuid,
        patient_id: Uuid,
        doctor_id: Uuid,
    ) -> Result<Mapping, DomainError> {
        match self.patients.get(patient_id).await? {
            None => {
                return Err(DomainError::validation("patient", "Invalid patient."));
            }
            Some(patient) if patient.owner_id != owner => {
                return Err(DomainError::validation("patient", NOT_YOUR_PATIENT));
            }
            Some(_) => {}
        }

        if self.doctors.get(doctor_id).await?.is_none() {
            return Err(DomainError::validation("doctor", "Invalid doctor."));
        }

        if self.repo.exists(patient_id, doctor_id).await? {
            return Err(DomainError::conflict(ALREADY_ASSIGNED));
        }

        let mapping = self.repo.create(patient_id, doctor_id).await?;
        debug!(mapping_id = %mapping.id, "mapping created");
        Ok(mapping)
    }

    /// The distinct doctors mapped to one of the requester's patients.
    /// A patient that is absent or not owned reads as not found either
    /// way; ownership is never disclosed.
    #[instrument(skip(self))]
    pub async fn doctors_for_patient(
        &self,
        owner: Uuid,
        patient_id: Uuid,
    ) -> Result<Vec<Doctor>, DomainError> {
        if self
            .patients
            .get_for_owner(owner, patient_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("Patient"));
        }

        self.repo.doctors_for_patient(patient_id).await
    }

    /// Remove a single mapping belonging to one of the requester's
    /// patients; anything else is not found.
    #[instrument(skip(self), fields(mapping_id = %id))]
    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<(), DomainError> {
        if self.repo.get_for_owner(owner, id).await?.is_none() {
            return Err(DomainError::not_found("Mapping"));
        }

        if !self.repo.delete(id).await? {
            return Err(DomainError::not_found("Mapping"));
        }
        debug!(mapping_id = %id, "mapping deleted");
        Ok(())
    }
}
