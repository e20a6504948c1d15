use std::sync::Arc;

use tracing::{debug, instrument, warn};

use caremap_auth::{AuthError, TokenPair, TokenService, password};

use crate::domain::error::DomainError;
use crate::domain::model::{NewUser, Registration, User};
use crate::domain::repos::UsersRepository;

/// Deliberately does not reveal whether the email exists.
const BAD_CREDENTIALS: &str = "No active account found with the given credentials";
const BAD_REFRESH: &str = "Token is invalid or expired";

const MIN_PASSWORD_LEN: usize = 8;
const MAX_NAME_LEN: usize = 150;

/// Registration, login and token refresh.
pub struct AccountsService<R> {
    repo: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R: UsersRepository> AccountsService<R> {
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repo, tokens }
    }

    /// Create an account with the email as the unique login identifier.
    #[instrument(skip(self, registration))]
    pub async fn register(&self, registration: Registration) -> Result<User, DomainError> {
        validate_registration(&registration)?;

        if self.repo.find_by_email(&registration.email).await?.is_some() {
            return Err(DomainError::validation(
                "email",
                "A user with this email already exists.",
            ));
        }

        let password_hash = password::hash_password(&registration.password)
            .map_err(|e| DomainError::database(e.to_string()))?;

        let user = self
            .repo
            .create(NewUser {
                email: registration.email,
                name: registration.name,
                password_hash,
            })
            .await?;

        debug!(user_id = %user.id, "account registered");
        Ok(user)
    }

    /// Exchange credentials for the access/refresh token pair.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, DomainError> {
        let Some(user) = self.repo.find_by_email(email).await? else {
            return Err(DomainError::unauthorized(BAD_CREDENTIALS));
        };

        let verified = password::verify_password(password, &user.password_hash)
            .map_err(|e| DomainError::database(e.to_string()))?;
        if !verified {
            warn!(user_id = %user.id, "failed login attempt");
            return Err(DomainError::unauthorized(BAD_CREDENTIALS));
        }

        self.tokens
            .issue_pair(user.id, &user.email, &user.name)
            .map_err(token_issue_err)
    }

    /// Exchange a valid refresh token for a new access token.
    #[instrument(skip_all)]
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, DomainError> {
        let claims = self
            .tokens
            .verify_refresh(refresh_token)
            .map_err(|_| DomainError::unauthorized(BAD_REFRESH))?;

        let Some(user) = self.repo.find_by_id(claims.sub).await? else {
            return Err(DomainError::unauthorized(BAD_REFRESH));
        };

        self.tokens
            .issue_access(user.id, &user.email, &user.name)
            .map_err(token_issue_err)
    }
}

fn token_issue_err(e: AuthError) -> DomainError {
    DomainError::database(format!("token issuing failed: {e}"))
}

fn validate_registration(registration: &Registration) -> Result<(), DomainError> {
    if registration.name.trim().is_empty() {
        return Err(DomainError::validation("name", "This field may not be blank."));
    }
    if registration.name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::validation(
            "name",
            format!("Ensure this field has no more than {MAX_NAME_LEN} characters."),
        ));
    }
    if !looks_like_email(&registration.email) {
        return Err(DomainError::validation("email", "Enter a valid email address."));
    }
    if registration.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::validation(
            "password",
            format!("Ensure this field has at least {MIN_PASSWORD_LEN} characters."),
        ));
    }
    Ok(())
}

/// Light-weight shape check: non-empty local part, a domain with a dot,
/// no whitespace.
fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}
