//! Mapping of domain failures onto HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use super::ApiResponse;
use crate::shared::DomainError;

/// Error half of every handler's `Result`
#[derive(Debug)]
pub enum ApiError {
    /// Request could not be understood (bad path segment, bad body)
    BadRequest(String),
    Domain(DomainError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    fn status_and_message(&self) -> (StatusCode, &'static str, String) {
        match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad request", msg.clone()),
            Self::Domain(err) => match err {
                DomainError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "Bad request", msg.clone())
                }
                DomainError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "Unauthorized", msg.clone())
                }
                DomainError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "Not found", err.to_string())
                }
                DomainError::Conflict(msg) => (StatusCode::CONFLICT, "Conflict", msg.clone()),
                DomainError::Internal(cause) => {
                    error!(cause = %cause, "Request failed with internal error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error",
                        "Internal server error".to_string(),
                    )
                }
            },
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, title, message) = self.status_and_message();
        (status, Json(ApiResponse::<()>::error(title, message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: impl Into<ApiError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn domain_errors_map_to_statuses() {
        assert_eq!(status_of(DomainError::Validation("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(DomainError::Unauthorized("x".into())), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(DomainError::not_found("Actor", "id", 1)), StatusCode::NOT_FOUND);
        assert_eq!(status_of(DomainError::Conflict("x".into())), StatusCode::CONFLICT);
        assert_eq!(
            status_of(DomainError::Internal("db down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status_of(ApiError::bad_request("id")), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_cause_is_not_exposed() {
        let (_, _, message) =
            ApiError::from(DomainError::Internal("secret db detail".into())).status_and_message();
        assert_eq!(message, "Internal server error");
    }
}
