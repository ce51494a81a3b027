use crate::response::app_response::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Credential verification failures. Unknown usernames and wrong passwords
/// share one variant so the response cannot be used to probe for accounts.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Account is locked")]
    AccountLocked,
    #[error("Account is disabled")]
    AccountDisabled,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ErrorResponse::send(self.to_string())
            .with_status(StatusCode::UNAUTHORIZED)
            .into_response()
    }
}
