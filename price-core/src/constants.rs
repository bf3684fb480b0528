//! Central Configuration Constants
//!
//! Single source of truth for defaults shared by the pipeline, the
//! training tool and the HTTP service.

use std::path::PathBuf;

/// Default model artifact, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "models/neural_network_model.json";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8000;

/// Readiness string returned by the health check
pub const HEALTH_MESSAGE: &str = "house predict classifier is all ready to go!";

/// Columns removed by the pruning stage
pub const COLUMNS_TO_DROP: &[&str] = &["id", "zipcode", "date"];

/// Raw column holding the sale date
pub const DATE_COLUMN: &str = "date";

/// Regression target in the training dataset
pub const TARGET_COLUMN: &str = "price";

/// Seed for weight initialization and dataset splits
pub const DEFAULT_SEED_MODEL: u64 = 42;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "House Price Predictor";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get model artifact path from environment or use default
pub fn get_model_path() -> PathBuf {
    std::env::var("MODEL_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_PATH))
}

/// Fitted scaler parameters, if the deployment normalizes inputs
pub fn get_scaler_path() -> Option<PathBuf> {
    std::env::var("SCALER_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

/// Get HTTP port from environment or use default
pub fn get_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}
