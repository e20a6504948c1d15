//! SeaORM-backed persistence.

use std::fmt::Display;

use crate::domain::error::DomainError;

pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod repos;


/// Convert any displayable error into a `DomainError::Database`.
pub(crate) fn db_err(e: impl Display) -> DomainError {
    DomainError::database(e.to_string())
}
