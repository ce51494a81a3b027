use crate::response::app_response::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("Username or email already exists")]
    DuplicateIdentity,
    // Reported as invalid credentials: a lookup miss must be
    // indistinguishable from a wrong password.
    #[error("Invalid credentials")]
    UserNotFound,
    #[error("Concurrent update, retry")]
    VersionConflict,
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status_code = match self {
            UserError::DuplicateIdentity => StatusCode::BAD_REQUEST,
            UserError::UserNotFound => StatusCode::UNAUTHORIZED,
            UserError::VersionConflict => StatusCode::CONFLICT,
        };

        ErrorResponse::send(self.to_string()).with_status(status_code).into_response()
    }
}
