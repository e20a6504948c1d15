use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::model::{NewUser, User};

/// Repository trait for account persistence.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Look an account up by its email (the unique login identifier).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Persist a new account. The password arrives already hashed.
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;
}
