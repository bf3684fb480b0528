//! Inference Engine - model loading and single-row prediction
//!
//! Artifacts are picked by extension:
//! - `.json` → native dense network (`dense.rs`)
//! - `.onnx` → ONNX Runtime session (feature `onnx`)

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::logic::features::FEATURE_COUNT;
use super::dense::DenseNetwork;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    /// The model was handed a row of the wrong width
    #[error("model expects {expected} features, got {actual}")]
    Shape { expected: usize, actual: usize },

    /// The artifact is missing, unreadable or malformed
    #[error("failed to load model: {0}")]
    Load(String),

    /// The backend failed while running
    #[error("inference failed: {0}")]
    Runtime(String),

    /// The artifact kind is not compiled into this build
    #[error("unsupported model: {0}")]
    Unsupported(String),

    /// The request could not be mapped onto the feature layout
    #[error("feature assembly failed: {0}")]
    Schema(String),
}

// ============================================================================
// PREDICTOR TRAIT
// ============================================================================

/// Kind of backend serving predictions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    DenseNetwork,
    Onnx,
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelKind::DenseNetwork => write!(f, "dense_network"),
            ModelKind::Onnx => write!(f, "onnx"),
        }
    }
}

/// A loaded regression model
///
/// Implementations are read-only after load so one instance can serve
/// concurrent requests.
pub trait PricePredictor: Send + Sync {
    fn kind(&self) -> ModelKind;

    /// Number of features one row must carry
    fn input_width(&self) -> usize;

    /// Predict the price for one row; rows of the wrong width are rejected
    fn predict_row(&self, row: &[f32]) -> Result<f32, InferenceError>;

    fn check_width(&self, row: &[f32]) -> Result<(), InferenceError> {
        if row.len() != self.input_width() {
            return Err(InferenceError::Shape {
                expected: self.input_width(),
                actual: row.len(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// MODEL METADATA
// ============================================================================

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub model_type: ModelKind,
    /// SHA-256 of the artifact bytes, hex encoded
    pub checksum: String,
    pub features: usize,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

impl ModelMetadata {
    /// Metadata for a model built in memory rather than read from disk
    pub fn in_memory(predictor: &dyn PricePredictor) -> Self {
        Self {
            model_path: "<memory>".to_string(),
            model_type: predictor.kind(),
            checksum: String::new(),
            features: predictor.input_width(),
            loaded_at: chrono::Utc::now(),
        }
    }
}

/// Predictor plus where it came from
pub struct LoadedModel {
    pub predictor: Box<dyn PricePredictor>,
    pub metadata: ModelMetadata,
}

impl LoadedModel {
    pub fn in_memory<P: PricePredictor + 'static>(predictor: P) -> Self {
        let metadata = ModelMetadata::in_memory(&predictor);
        Self {
            predictor: Box::new(predictor),
            metadata,
        }
    }
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// Hex SHA-256 of artifact bytes
pub fn artifact_checksum(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

// ============================================================================
// LOADING
// ============================================================================

/// Load a model artifact from disk, once per process
pub fn load_model(path: &Path) -> Result<LoadedModel, InferenceError> {
    log::info!("Loading model from: {}", path.display());

    if !path.exists() {
        return Err(InferenceError::Load(format!("Model not found: {}", path.display())));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| InferenceError::Load(format!("{}: {}", path.display(), e)))?;
    let checksum = artifact_checksum(&bytes);

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let predictor: Box<dyn PricePredictor> = match extension.as_str() {
        "json" => Box::new(DenseNetwork::from_json_slice(&bytes)?),
        "onnx" => load_onnx(&bytes)?,
        other => {
            return Err(InferenceError::Unsupported(format!(
                "unknown model extension '{}'",
                other
            )))
        }
    };

    if predictor.input_width() != FEATURE_COUNT {
        log::warn!(
            "Model expects {} features but the layout has {}; every prediction will fail",
            predictor.input_width(),
            FEATURE_COUNT
        );
    }

    let metadata = ModelMetadata {
        model_path: path.display().to_string(),
        model_type: predictor.kind(),
        checksum,
        features: predictor.input_width(),
        loaded_at: chrono::Utc::now(),
    };

    log::info!(
        "Model loaded: {} ({} inputs, sha256 {})",
        metadata.model_type,
        metadata.features,
        &metadata.checksum[..12]
    );

    Ok(LoadedModel { predictor, metadata })
}

#[cfg(feature = "onnx")]
fn load_onnx(bytes: &[u8]) -> Result<Box<dyn PricePredictor>, InferenceError> {
    Ok(Box::new(super::onnx::OnnxRegressor::from_memory(bytes)?))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(_bytes: &[u8]) -> Result<Box<dyn PricePredictor>, InferenceError> {
    Err(InferenceError::Unsupported(
        "ONNX support not compiled in (enable the `onnx` feature)".to_string(),
    ))
}
