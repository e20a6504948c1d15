//! Axum extractor for bearer-token authentication.

use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use http::header::AUTHORIZATION;

use crate::{claims::CurrentUser, errors::AuthError, tokens::TokenService};

/// Extractor that authenticates the request from its `Authorization:
/// Bearer <access_token>` header.
///
/// Requires an `Extension(Arc<TokenService>)` layer on the router.
#[derive(Debug, Clone)]
pub struct Authn(pub CurrentUser);

impl<S> FromRequestParts<S> for Authn
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let tokens = parts
            .extensions
            .get::<Arc<TokenService>>()
            .ok_or_else(|| {
                AuthError::Internal("TokenService extension not configured".to_owned())
            })?;

        let token = bearer_token(parts).ok_or(AuthError::Unauthenticated)?;
        let claims = tokens.verify_access(token)?;
        Ok(Self(claims.into()))
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
