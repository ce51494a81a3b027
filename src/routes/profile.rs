use crate::handler::profile_handler;
use axum::{Router, routing::get};

pub fn routes() -> Router {
    Router::new().route("/profile", get(profile_handler::profile))
}
