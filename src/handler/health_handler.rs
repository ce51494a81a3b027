use crate::config::database::{Database, DatabaseTrait};
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

#[derive(Serialize, Deserialize, Debug)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub uptime_seconds: u64,
    pub database: DatabaseHealth,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DatabaseHealth {
    pub status: String,
    pub response_time_ms: Option<u128>,
    pub error: Option<String>,
}

static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

pub fn init_start_time() {
    START_TIME.set(Instant::now()).ok();
}

fn get_uptime_seconds() -> u64 {
    START_TIME.get().map(|start| start.elapsed().as_secs()).unwrap_or(0)
}

pub async fn health_check(State(db): State<Arc<Database>>) -> Json<HealthStatus> {
    let started = Instant::now();

    let database = match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(db.get_pool()).await {
        Ok(_) => DatabaseHealth {
            status: "up".to_string(),
            response_time_ms: Some(started.elapsed().as_millis()),
            error: None,
        },
        Err(e) => DatabaseHealth {
            status: "down".to_string(),
            response_time_ms: None,
            error: Some(e.to_string()),
        },
    };

    let status = if database.status == "up" { "healthy" } else { "degraded" };

    Json(HealthStatus {
        status: status.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime_seconds: get_uptime_seconds(),
        database,
    })
}
