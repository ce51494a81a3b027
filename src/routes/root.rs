use crate::config::database::Database;
use crate::config::parameter;
use crate::error::token_error::TokenError;
use crate::handler::health_handler;
use crate::middleware::auth as auth_middleware;
use crate::routes::{auth, profile};
use crate::service::token_service::{TokenService, TokenServiceTrait};
use crate::state::auth_state::AuthState;
use crate::state::token_state::TokenState;
use axum::routing::get;
use axum::{Router, middleware};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub fn routes(db_conn: Arc<Database>) -> Result<Router, TokenError> {
    // The signing secret and lifetimes are resolved once here and handed to
    // the token service explicitly.
    let token_service = TokenService::new(
        parameter::get("JWT_SECRET"),
        parameter::get_i64("JWT_ACCESS_TTL_MINUTES"),
        parameter::get_i64("JWT_REFRESH_TTL_DAYS"),
    )?;

    let merged_router = {
        let auth_state = AuthState::new_with_token_service(&db_conn, token_service.clone());
        let token_state = TokenState::new_with_token_service(&db_conn, token_service);

        auth::routes().with_state(auth_state).merge(
            profile::routes().layer(ServiceBuilder::new().layer(middleware::from_fn_with_state(
                token_state,
                auth_middleware::auth,
            ))),
        )
    };

    let app_router = Router::new()
        .nest("/api", merged_router)
        .merge(
            Router::new()
                .route("/health", get(health_handler::health_check))
                .with_state(db_conn.clone()),
        )
        .layer(TraceLayer::new_for_http());

    Ok(app_router)
}
