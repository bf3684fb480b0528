//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use price_core::constants::HEALTH_MESSAGE;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
    timestamp: i64,
}

/// Readiness string at `/`
pub async fn ready() -> Json<&'static str> {
    tracing::info!("{}", HEALTH_MESSAGE);
    Json(HEALTH_MESSAGE)
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
