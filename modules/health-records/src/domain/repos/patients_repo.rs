use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::model::{NewPatient, Patient, PatientPatch, PatientUpdate};

/// Repository trait for Patient persistence.
///
/// Every method except [`get`](Self::get) is owner-scoped; a patient
/// belonging to another user reads as absent.
#[async_trait]
pub trait PatientsRepository: Send + Sync {
    /// List the owner's patients, newest first.
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Patient>, DomainError>;

    async fn get_for_owner(&self, owner: Uuid, id: Uuid) -> Result<Option<Patient>, DomainError>;

    /// Unscoped lookup, used when ownership itself is the thing being
    /// checked (mapping creation).
    async fn get(&self, id: Uuid) -> Result<Option<Patient>, DomainError>;

    async fn create(&self, owner: Uuid, patient: NewPatient) -> Result<Patient, DomainError>;

    /// Replace all mutable fields. `None` if the patient is absent or not
    /// owned by `owner`.
    async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        update: PatientUpdate,
    ) -> Result<Option<Patient>, DomainError>;

    /// Update only the provided fields. `None` as for `update`.
    async fn patch(
        &self,
        owner: Uuid,
        id: Uuid,
        patch: PatientPatch,
    ) -> Result<Option<Patient>, DomainError>;

    /// Delete by ID. Returns whether a row was removed.
    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, DomainError>;
}
