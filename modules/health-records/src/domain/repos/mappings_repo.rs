use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::model::{Doctor, Mapping, MappingDetail};

/// Repository trait for patient-doctor mapping persistence.
#[async_trait]
pub trait MappingsRepository: Send + Sync {
    /// List mappings whose patient belongs to `owner`, newest first, with
    /// patient and doctor inlined.
    async fn list_for_owner(&self, owner: Uuid) -> Result<Vec<MappingDetail>, DomainError>;

    /// Fetch a mapping only if its patient belongs to `owner`.
    async fn get_for_owner(&self, owner: Uuid, id: Uuid) -> Result<Option<Mapping>, DomainError>;

    async fn exists(&self, patient_id: Uuid, doctor_id: Uuid) -> Result<bool, DomainError>;

    async fn create(&self, patient_id: Uuid, doctor_id: Uuid) -> Result<Mapping, DomainError>;

    /// Delete by ID. Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// The distinct doctors mapped to a patient.
    async fn doctors_for_patient(&self, patient_id: Uuid) -> Result<Vec<Doctor>, DomainError>;

    async fn count_for_patient(&self, patient_id: Uuid) -> Result<u64, DomainError>;

    async fn count_for_doctor(&self, doctor_id: Uuid) -> Result<u64, DomainError>;
}
