use crate::dto::auth_dto::{AuthRequestDto, AuthResponseDto, RefreshRequestDto};
use crate::dto::token_dto::TokenKind;
use crate::error::AppError;
use crate::error::auth_error::AuthError;
use crate::error::request_error::ValidatedRequest;
use crate::error::token_error::TokenError;
use crate::error::user_error::UserError;
use crate::repository::user_repository::UserRepositoryTrait;
use crate::service::token_service::TokenServiceTrait;
use crate::state::auth_state::AuthState;
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Create the user, then fall through into the login path with the same
/// credentials so the caller leaves with a token pair.
pub async fn register(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<AuthRequestDto>,
) -> Result<Json<AuthResponseDto>, AppError> {
    let created = state.user_service.create_user(payload.clone()).await?;
    info!("User registered: {}", created.username);

    let response = issue_tokens(&state, &payload.username, &payload.password).await?;
    Ok(Json(response))
}

pub async fn login(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<AuthRequestDto>,
) -> Result<Json<AuthResponseDto>, AppError> {
    let response = issue_tokens(&state, &payload.username, &payload.password).await?;
    info!("Login successful for user: {}", response.username);
    Ok(Json(response))
}

/// Redeem a refresh token for a fresh pair. The presented token must verify,
/// be of refresh kind, and match the hash stored at last issuance; the stored
/// copy is rotated on success.
pub async fn refresh(
    State(state): State<AuthState>,
    ValidatedRequest(payload): ValidatedRequest<RefreshRequestDto>,
) -> Result<Json<AuthResponseDto>, AppError> {
    let claims = state.token_service.verify(&payload.refresh_token)?;
    if claims.kind != TokenKind::Refresh {
        return Err(TokenError::WrongKind)?;
    }

    let user = state
        .user_repo
        .find_by_username(&claims.sub)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let presented_hash = state.token_service.hash_refresh_token(&payload.refresh_token);
    let stored_hash = user.refresh_token_hash.as_deref().ok_or(TokenError::InvalidSignature)?;
    if stored_hash != presented_hash {
        // Signed but superseded: a newer token has been issued since.
        warn!("Rejected superseded refresh token for user ID: {}", user.id);
        return Err(TokenError::InvalidSignature)?;
    }

    let stored_expiry = user.refresh_token_expires_at.ok_or(TokenError::InvalidSignature)?;
    if stored_expiry <= Utc::now() {
        return Err(TokenError::Expired)?;
    }

    let access = state.token_service.create_access_token(&user.username)?;
    let refresh = state.token_service.create_refresh_token(&user.username)?;

    let new_hash = state.token_service.hash_refresh_token(&refresh.token);
    state
        .user_service
        .attach_refresh_token(&user, &new_hash, expiry_timestamp(refresh.exp)?)
        .await?;

    info!("Tokens refreshed for user: {}", user.username);
    Ok(Json(AuthResponseDto {
        access_token: access.token,
        refresh_token: refresh.token,
        username: user.username,
    }))
}

async fn issue_tokens(state: &AuthState, username: &str, password: &str) -> Result<AuthResponseDto, AppError> {
    let principal = state.authenticator.verify_credentials(username, password).await?;

    let access = state.token_service.create_access_token(&principal.username)?;
    let refresh = state.token_service.create_refresh_token(&principal.username)?;

    let user = state
        .user_repo
        .find_by_username(&principal.username)
        .await?
        .ok_or(UserError::UserNotFound)?;

    let refresh_hash = state.token_service.hash_refresh_token(&refresh.token);
    state
        .user_service
        .attach_refresh_token(&user, &refresh_hash, expiry_timestamp(refresh.exp)?)
        .await?;

    Ok(AuthResponseDto {
        access_token: access.token,
        refresh_token: refresh.token,
        username: principal.username,
    })
}

fn expiry_timestamp(exp: i64) -> Result<DateTime<Utc>, AppError> {
    DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| AppError::Internal("Refresh token expiry out of range".to_string()))
}
