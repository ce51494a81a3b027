use crate::dto::token_dto::TokenKind;
use crate::error::AppError;
use crate::error::token_error::TokenError;
use crate::error::user_error::UserError;
use crate::repository::user_repository::UserRepositoryTrait;
use crate::service::token_service::TokenServiceTrait;
use crate::state::token_state::TokenState;
use axum::extract::State;
use axum::{http, http::HeaderMap, http::Request, middleware::Next, response::IntoResponse};

/// Require a valid access token on the request, then make the resolved user
/// available to handlers through request extensions.
pub async fn auth(
    State(state): State<TokenState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<impl IntoResponse, AppError> {
    let token = bearer_token(req.headers()).ok_or(TokenError::Missing)?;

    let claims = state.token_service.verify(token)?;
    if claims.kind != TokenKind::Access {
        return Err(TokenError::WrongKind)?;
    }

    let user = state
        .user_repo
        .find_by_username(&claims.sub)
        .await?
        .ok_or(UserError::UserNotFound)?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
}
