use caremap_errors::Problem;

use crate::domain::error::DomainError;

/// Handler result type; any `DomainError` becomes an RFC 9457 response
/// through the `From` impl below.
pub type ApiResult<T> = Result<T, Problem>;

/// Map a domain error to its RFC 9457 Problem.
///
/// Conflicts (duplicate mapping, protected delete) surface as 400 with
/// the domain message, matching the service's validation-error contract.
/// Database failures are logged here and returned detail-free.
pub fn domain_error_to_problem(e: DomainError) -> Problem {
    match e {
        DomainError::NotFound { .. } => Problem::not_found(e.to_string()),
        DomainError::Validation { field, message } => Problem::validation(field, message),
        DomainError::Conflict(message) => Problem::conflict(message),
        DomainError::Unauthorized(message) => Problem::unauthorized(message),
        DomainError::Database(err) => {
            tracing::error!(error = ?err, "database failure");
            Problem::internal()
        }
    }
}

/// Make `?` work in handlers.
impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(e)
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let p = domain_error_to_problem(DomainError::not_found("Patient"));
        assert_eq!(p.status, StatusCode::NOT_FOUND);
        assert_eq!(p.detail, "Patient not found");
    }

    #[test]
    fn validation_maps_to_400_with_field() {
        let p = domain_error_to_problem(DomainError::validation("age", "must be non-negative"));
        assert_eq!(p.status, StatusCode::BAD_REQUEST);
        assert_eq!(p.errors.unwrap()[0].field, "age");
    }

    #[test]
    fn conflict_maps_to_400_with_domain_message() {
        let p = domain_error_to_problem(DomainError::conflict(
            "This doctor is already assigned to this patient.",
        ));
        assert_eq!(p.status, StatusCode::BAD_REQUEST);
        assert_eq!(p.detail, "This doctor is already assigned to this patient.");
    }

    #[test]
    fn database_error_is_detail_free() {
        let p = domain_error_to_problem(DomainError::database("secret connection string"));
        assert_eq!(p.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!p.detail.contains("secret"));
    }
}
