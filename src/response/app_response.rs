use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Uniform failure body: timestamp, numeric status, status text, message.
#[derive(Clone, Debug, Serialize)]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    #[serde(skip)]
    pub status_code: StatusCode,
}

impl ErrorResponse {
    /// Create an error response with default 400 Bad Request status
    pub fn send(message: String) -> Self {
        Self {
            timestamp: Utc::now(),
            status: StatusCode::BAD_REQUEST.as_u16(),
            error: reason_phrase(StatusCode::BAD_REQUEST),
            message,
            status_code: StatusCode::BAD_REQUEST,
        }
    }

    /// Set custom status code (builder pattern)
    pub fn with_status(mut self, status_code: StatusCode) -> Self {
        self.status_code = status_code;
        self.status = status_code.as_u16();
        self.error = reason_phrase(status_code);
        self
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}

/// Validation failure body: errors keyed by field name so clients can bind
/// messages back onto form fields.
#[derive(Clone, Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub errors: BTreeMap<String, String>,
}

impl ValidationErrorResponse {
    pub fn send(errors: BTreeMap<String, String>) -> Self {
        Self {
            timestamp: Utc::now(),
            status: StatusCode::BAD_REQUEST.as_u16(),
            errors,
        }
    }
}

impl IntoResponse for ValidationErrorResponse {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

fn reason_phrase(status_code: StatusCode) -> String {
    status_code.canonical_reason().unwrap_or("Unknown").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_defaults_to_bad_request() {
        let response = ErrorResponse::send("Invalid value".to_string());

        assert_eq!(response.status, 400);
        assert_eq!(response.error, "Bad Request");
        assert_eq!(response.message, "Invalid value");
    }

    #[test]
    fn test_with_status_keeps_fields_consistent() {
        let response =
            ErrorResponse::send("Invalid credentials".to_string()).with_status(StatusCode::UNAUTHORIZED);

        assert_eq!(response.status_code, StatusCode::UNAUTHORIZED);
        assert_eq!(response.status, 401);
        assert_eq!(response.error, "Unauthorized");
    }

    #[test]
    fn test_validation_response_carries_field_map() {
        let mut errors = BTreeMap::new();
        errors.insert("password".to_string(), "Too short".to_string());

        let response = ValidationErrorResponse::send(errors);

        assert_eq!(response.status, 400);
        assert_eq!(response.errors.get("password").map(String::as_str), Some("Too short"));
    }
}
