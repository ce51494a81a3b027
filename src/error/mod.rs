pub(crate) mod auth_error;
pub(crate) mod request_error;
pub(crate) mod token_error;
pub(crate) mod user_error;

use crate::response::app_response::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

// Unified application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] auth_error::AuthError),
    #[error(transparent)]
    Token(#[from] token_error::TokenError),
    #[error(transparent)]
    User(#[from] user_error::UserError),
    #[error(transparent)]
    Request(#[from] request_error::RequestError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Auth(e) => e.into_response(),
            AppError::Token(e) => e.into_response(),
            AppError::User(e) => e.into_response(),
            AppError::Request(e) => e.into_response(),
            AppError::Database(e) => {
                // Full detail stays in the server log; the client gets the
                // generic body.
                error!("Unhandled database error: {}", e);
                unexpected_response()
            }
            AppError::Internal(detail) => {
                error!("Unexpected error: {}", detail);
                unexpected_response()
            }
        }
    }
}

fn unexpected_response() -> Response {
    ErrorResponse::send("An unexpected error occurred".to_string())
        .with_status(StatusCode::INTERNAL_SERVER_ERROR)
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::auth_error::AuthError;
    use super::token_error::TokenError;
    use super::user_error::UserError;
    use super::*;

    #[test]
    fn test_invalid_credentials_maps_to_401() {
        let response = AppError::from(AuthError::InvalidCredentials).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_user_not_found_maps_to_401() {
        // A lookup miss must produce the same status as a bad password.
        let response = AppError::from(UserError::UserNotFound).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_expired_token_maps_to_401() {
        let response = AppError::from(TokenError::Expired).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_invalid_signature_maps_to_401() {
        let response = AppError::from(TokenError::InvalidSignature).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_locked_and_disabled_map_to_401() {
        let locked = AppError::from(AuthError::AccountLocked).into_response();
        let disabled = AppError::from(AuthError::AccountDisabled).into_response();

        assert_eq!(locked.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(disabled.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_duplicate_identity_maps_to_400() {
        let response = AppError::from(UserError::DuplicateIdentity).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_version_conflict_maps_to_409() {
        let response = AppError::from(UserError::VersionConflict).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_token_creation_maps_to_500() {
        let response = AppError::from(TokenError::Creation("boom".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_maps_to_500() {
        let response = AppError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
