//! Prediction handlers

use axum::{extract::State, Json};
use validator::Validate;

use price_core::{HouseFeatures, Prediction};

use crate::models::PredictionResponse;
use crate::{AppError, AppResult, AppState};

/// Validate, then run the model off the async workers
async fn run(state: &AppState, request: HouseFeatures) -> AppResult<Prediction> {
    request.validate()?;

    let adapter = state.adapter.clone();
    let prediction = tokio::task::spawn_blocking(move || adapter.predict(&request))
        .await
        .map_err(|e| AppError::InternalError(format!("prediction task failed: {}", e)))??;

    Ok(prediction)
}

/// `POST /predict` - answers with the bare result string
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<HouseFeatures>,
) -> AppResult<Json<String>> {
    let prediction = run(&state, request).await?;
    Ok(Json(prediction.message))
}

/// `POST /api/v1/predict` - structured result
pub async fn predict_v1(
    State(state): State<AppState>,
    Json(request): Json<HouseFeatures>,
) -> AppResult<Json<PredictionResponse>> {
    let prediction = run(&state, request).await?;
    let model = state.adapter.metadata().model_type.to_string();

    Ok(Json(PredictionResponse::new(prediction, model)))
}
