use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::model::{Doctor, DoctorPatch, DoctorUpdate, NewDoctor};

/// Repository trait for Doctor persistence. Doctors are shared, so
/// nothing here is owner-scoped.
#[async_trait]
pub trait DoctorsRepository: Send + Sync {
    /// List all doctors, newest first.
    async fn list(&self) -> Result<Vec<Doctor>, DomainError>;

    async fn get(&self, id: Uuid) -> Result<Option<Doctor>, DomainError>;

    async fn create(&self, doctor: NewDoctor) -> Result<Doctor, DomainError>;

    async fn update(&self, id: Uuid, update: DoctorUpdate) -> Result<Option<Doctor>, DomainError>;

    async fn patch(&self, id: Uuid, patch: DoctorPatch) -> Result<Option<Doctor>, DomainError>;

    /// Delete by ID. Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
