//! Mapping from [ValidationError]s to HTTP status codes.

use axum::http::StatusCode;

use crate::validation::ValidationError;

/// Get the status code for a single error.
pub fn status_for(error: &ValidationError) -> StatusCode {
    match error {
        ValidationError::NotFound { .. } | ValidationError::MissingDependency { .. } => {
            StatusCode::NOT_FOUND
        }
        ValidationError::NameExists { .. } | ValidationError::References { .. } => {
            StatusCode::CONFLICT
        }
        _ => StatusCode::BAD_REQUEST,
    }
}

/// Get the status code for a response that carries all of `errors`.
///
/// If every error maps to the same status code, that code is used. Otherwise,
/// or if `errors` is empty, the response is a 400 Bad Request.
pub fn aggregate_status(errors: &[ValidationError]) -> StatusCode {
    let mut statuses = errors.iter().map(status_for);

    let Some(first) = statuses.next() else {
        return StatusCode::BAD_REQUEST;
    };

    if statuses.all(|status| status == first) {
        first
    } else {
        StatusCode::BAD_REQUEST
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::validation::{ResourceKind, ValidationError};

    use super::{aggregate_status, status_for};

    fn not_found() -> ValidationError {
        ValidationError::NotFound {
            resource: ResourceKind::Account,
            id: "foo".to_owned(),
        }
    }

    fn name_exists() -> ValidationError {
        ValidationError::NameExists {
            resource: ResourceKind::Category,
            name: "bills".to_owned(),
        }
    }

    fn invalid_id() -> ValidationError {
        ValidationError::InvalidId("foo".to_owned())
    }

    #[test]
    fn maps_each_kind() {
        let cases = [
            (not_found(), StatusCode::NOT_FOUND),
            (
                ValidationError::MissingDependency {
                    resource: ResourceKind::Account,
                    id: None,
                },
                StatusCode::NOT_FOUND,
            ),
            (name_exists(), StatusCode::CONFLICT),
            (
                ValidationError::References {
                    resource: ResourceKind::Account,
                    id: "foo".to_owned(),
                },
                StatusCode::CONFLICT,
            ),
            (invalid_id(), StatusCode::BAD_REQUEST),
            (
                ValidationError::InvalidJson(ResourceKind::Transaction),
                StatusCode::BAD_REQUEST,
            ),
            (
                ValidationError::NameTooLong {
                    resource: ResourceKind::Account,
                    name: "x".repeat(33),
                    max: 32,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                ValidationError::TransactionCommonAccounts("foo".to_owned()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ValidationError::CategoryTrailingWhitespace("foo ".to_owned()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ValidationError::CategoryReservedName("sub".to_owned()),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (error, want) in cases {
            assert_eq!(status_for(&error), want, "wrong status for {error:?}");
        }
    }

    #[test]
    fn uniform_errors_keep_their_status() {
        assert_eq!(
            aggregate_status(&[not_found(), not_found()]),
            StatusCode::NOT_FOUND
        );
        assert_eq!(aggregate_status(&[name_exists()]), StatusCode::CONFLICT);
    }

    #[test]
    fn bad_request_dominates() {
        assert_eq!(
            aggregate_status(&[name_exists(), invalid_id()]),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn mixed_conflict_and_not_found_is_bad_request() {
        assert_eq!(
            aggregate_status(&[name_exists(), not_found()]),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn empty_list_is_bad_request() {
        assert_eq!(aggregate_status(&[]), StatusCode::BAD_REQUEST);
    }
}
