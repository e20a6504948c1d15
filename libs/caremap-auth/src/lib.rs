//! Authentication building blocks for the CareMap service.
//!
//! - [`tokens::TokenService`] issues and validates the HS256 access/refresh
//!   token pair (access tokens carry informational `email`/`name` claims,
//!   refresh tokens carry only the subject).
//! - [`password`] wraps argon2id hashing and verification.
//! - With the `axum-ext` feature, [`axum_ext::Authn`] extracts the
//!   authenticated [`CurrentUser`] from a bearer token.

pub mod claims;
pub mod errors;
pub mod password;
pub mod tokens;

#[cfg(feature = "axum-ext")]
pub mod axum_ext;

pub use claims::{AccessClaims, CurrentUser, RefreshClaims, TokenUse};
pub use errors::AuthError;
pub use tokens::{TokenPair, TokenService};
