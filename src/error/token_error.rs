use crate::response::app_response::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token")]
    InvalidSignature,
    #[error("Missing bearer token")]
    Missing,
    #[error("Invalid token")]
    WrongKind,
    #[error("Token error: {0}")]
    Creation(String),
}

impl IntoResponse for TokenError {
    fn into_response(self) -> Response {
        let (status_code, message) = match self {
            TokenError::Expired
            | TokenError::InvalidSignature
            | TokenError::Missing
            | TokenError::WrongKind => (StatusCode::UNAUTHORIZED, self.to_string()),
            TokenError::Creation(ref detail) => {
                error!("Token creation failed: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "An unexpected error occurred".to_string())
            }
        };

        ErrorResponse::send(message).with_status(status_code).into_response()
    }
}
