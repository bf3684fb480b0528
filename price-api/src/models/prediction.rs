//! Prediction response model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use price_core::Prediction;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction_id: Uuid,
    pub price: f32,
    pub message: String,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub model: String,
    pub inference_time_us: u64,
}

impl PredictionResponse {
    pub fn new(prediction: Prediction, model: String) -> Self {
        Self {
            prediction_id: Uuid::new_v4(),
            price: prediction.price,
            message: prediction.message,
            feature_version: prediction.feature_version,
            layout_hash: prediction.layout_hash,
            model,
            inference_time_us: prediction.inference_time_us,
        }
    }
}
