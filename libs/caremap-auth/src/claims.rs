use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Discriminates the two token kinds so an access token can never be
/// replayed against the refresh endpoint and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenUse {
    Access,
    Refresh,
}

/// Claims carried by an access token (60 minutes by default).
///
/// `email` and `name` are informational only; `sub` is authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: Uuid,
    pub email: String,
    pub name: String,
    pub token_use: TokenUse,
    pub iat: i64,
    pub exp: i64,
}

/// Claims carried by a refresh token (1 day by default).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: Uuid,
    pub token_use: TokenUse,
    pub iat: i64,
    pub exp: i64,
}

/// The authenticated identity of a request, derived from a validated
/// access token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<AccessClaims> for CurrentUser {
    fn from(claims: AccessClaims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            name: claims.name,
        }
    }
}
