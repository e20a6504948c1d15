//! HS256 access/refresh token issuing and validation.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::claims::{AccessClaims, RefreshClaims, TokenUse};
use crate::errors::AuthError;

/// The credential pair returned by a successful login.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Issues and validates the service's bearer tokens.
///
/// Both token kinds are signed with the same HS256 secret; the `token_use`
/// claim keeps them from being interchangeable.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    #[must_use]
    pub fn new(secret: &SecretString, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        let secret = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Issue the access/refresh pair for a freshly verified identity.
    ///
    /// # Errors
    /// Returns `AuthError::Internal` if signing fails.
    pub fn issue_pair(&self, user_id: Uuid, email: &str, name: &str) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access: self.issue_access(user_id, email, name)?,
            refresh: self.issue_refresh(user_id)?,
        })
    }

    /// Issue a standalone access token (login and refresh both end here).
    ///
    /// # Errors
    /// Returns `AuthError::Internal` if signing fails.
    pub fn issue_access(&self, user_id: Uuid, email: &str, name: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: user_id,
            email: email.to_owned(),
            name: name.to_owned(),
            token_use: TokenUse::Access,
            iat: now.timestamp(),
            exp: (now + self.access_ttl).timestamp(),
        };
        self.sign(&claims)
    }

    /// # Errors
    /// Returns `AuthError::Internal` if signing fails.
    pub fn issue_refresh(&self, user_id: Uuid) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = RefreshClaims {
            sub: user_id,
            token_use: TokenUse::Refresh,
            iat: now.timestamp(),
            exp: (now + self.refresh_ttl).timestamp(),
        };
        self.sign(&claims)
    }

    /// Validate a bearer token presented on an API call.
    ///
    /// # Errors
    /// `TokenExpired` for an out-of-date token, `InvalidToken` for anything
    /// else (bad signature, malformed, or a refresh token used as access).
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let claims: AccessClaims = self.parse(token)?;
        if claims.token_use != TokenUse::Access {
            return Err(AuthError::InvalidToken("not an access token".to_owned()));
        }
        Ok(claims)
    }

    /// Validate a token presented to the refresh endpoint.
    ///
    /// # Errors
    /// `TokenExpired` or `InvalidToken`, as for `verify_access`.
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, AuthError> {
        let claims: RefreshClaims = self.parse(token)?;
        if claims.token_use != TokenUse::Refresh {
            return Err(AuthError::InvalidToken("not a refresh token".to_owned()));
        }
        Ok(claims)
    }

    fn sign<T: Serialize>(&self, claims: &T) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("token signing failed: {e}")))
    }

    fn parse<T: DeserializeOwned>(&self, token: &str) -> Result<T, AuthError> {
        decode::<T>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })
    }
}
