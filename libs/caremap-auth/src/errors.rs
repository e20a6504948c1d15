use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication required: missing or invalid token")]
    Unauthenticated,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(feature = "axum-ext")]
impl axum::response::IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        use caremap_errors::Problem;

        let problem = match self {
            Self::Unauthenticated | Self::InvalidToken(_) | Self::TokenExpired => {
                Problem::unauthorized(self.to_string())
            }
            Self::PasswordHash(_) | Self::Internal(_) => {
                tracing::error!(error = %self, "authentication infrastructure failure");
                Problem::internal()
            }
        };
        problem.into_response()
    }
}
