//! Shared HTTP building blocks: response envelope, error mapping, extractors

pub mod error;
pub mod validated_json;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use error::ApiError;
pub use validated_json::ValidatedJson;

/// Standard response envelope
///
/// Every resource route answers with this wrapper. On success `data` holds
/// the payload; on failure it is `null` and `message` describes the problem.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    /// Short headline, e.g. "Success get actor"
    pub message_title: String,
    pub message: String,
    /// RFC 3339 timestamp of when the response was produced
    pub response_time: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(title: impl Into<String>, message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message_title: title.into(),
            message: message.into(),
            response_time: now_rfc3339(),
            data: Some(data),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message_title: title.into(),
            message: message.into(),
            response_time: now_rfc3339(),
            data: None,
        }
    }
}

/// Empty payload for operations without return data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}

/// Parse a numeric path segment, answering 400 when it is not one.
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .map_err(|_| ApiError::bad_request(format!("Invalid id: {}", raw)))
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_has_null_data() {
        let body = serde_json::to_value(ApiResponse::<()>::error("Not found", "missing")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message_title"], "Not found");
        assert!(body["data"].is_null());
    }

    #[test]
    fn parse_id_rejects_non_numeric() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(parse_id("abc").is_err());
        assert!(parse_id("").is_err());
    }

    #[test]
    fn response_time_is_rfc3339() {
        let resp = ApiResponse::success("ok", "ok", 1);
        assert!(chrono::DateTime::parse_from_rfc3339(&resp.response_time).is_ok());
    }
}
