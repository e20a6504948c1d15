//! Error response types for the CareMap API.
//!
//! Pure data types with no mandatory HTTP framework dependency:
//! - RFC 9457 Problem Details (`Problem`)
//! - Field-scoped validation violations (`ValidationViolation`)
//!
//! Enable the `axum` feature to use `Problem` directly as a response.

pub mod problem;

pub use problem::{APPLICATION_PROBLEM_JSON, Problem, ValidationViolation};
