//! Health Records Module
//!
//! Patients, doctors and the patient-doctor mappings that link them,
//! together with account registration and token issuing. Layered the usual
//! way: `api/rest` speaks HTTP, `domain` holds the contracts, and
//! `infra/storage` persists through SeaORM.

pub mod api;
pub mod domain;
pub mod infra;

pub use api::rest::routes::build_router;
pub use infra::storage::migrations::Migrator;
