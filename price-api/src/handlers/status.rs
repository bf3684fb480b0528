//! Engine status handler

use axum::{extract::State, Json};

use price_core::EngineStatus;

use crate::{AppError, AppState};

pub async fn get(State(state): State<AppState>) -> Json<EngineStatus> {
    Json(state.adapter.status())
}

/// Fallback for unknown routes
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
