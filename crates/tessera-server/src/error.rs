//! Server error type and HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tessera_site::MutationError;
use tessera_storage::StorageError;

/// Error returned by API handlers.
///
/// Every public operation returns either a value or one of these; nothing is
/// allowed to panic past a handler boundary.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// No site registered under the given id.
    #[error("site not found: {0}")]
    SiteNotFound(String),
    /// The document has no page under the given name.
    #[error("page not found: {0}")]
    PageNotFound(String),
    /// Document mutation rejected.
    #[error(transparent)]
    Mutation(#[from] MutationError),
    /// Storage failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Malformed request body or parameters.
    #[error("invalid request: {0}")]
    BadRequest(String),
}

/// JSON error body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::SiteNotFound(_) | Self::PageNotFound(_) => StatusCode::NOT_FOUND,
            Self::Mutation(err) => match err {
                MutationError::UnknownPage(_) => StatusCode::NOT_FOUND,
                MutationError::DuplicatePage(_) | MutationError::LastPage => StatusCode::CONFLICT,
                MutationError::InvalidPageName(_) | MutationError::TypeMismatch { .. } => {
                    StatusCode::BAD_REQUEST
                }
            },
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_error_statuses() {
        let cases = [
            (
                ServerError::Mutation(MutationError::LastPage),
                StatusCode::CONFLICT,
            ),
            (
                ServerError::Mutation(MutationError::DuplicatePage("home".to_owned())),
                StatusCode::CONFLICT,
            ),
            (
                ServerError::Mutation(MutationError::UnknownPage("x".to_owned())),
                StatusCode::NOT_FOUND,
            ),
            (
                ServerError::SiteNotFound("s1".to_owned()),
                StatusCode::NOT_FOUND,
            ),
            (
                ServerError::BadRequest("nope".to_owned()),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status(), expected);
        }
    }
}
