//! JSON artifacts on disk (scaler parameters, pipeline config)

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::logic::pipeline::{MinMaxScaler, ScalerParams};

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("artifact not found: {0}")]
    NotFound(String),

    #[error("invalid artifact: {0}")]
    Invalid(String),
}

/// Write pretty JSON, creating parent directories
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<(), ArtifactError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_vec_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::NotFound(path.display().to_string()));
    }

    let data = fs::read(path)?;
    Ok(serde_json::from_slice(&data)?)
}

/// Persist a fitted scaler
pub fn save_scaler(scaler: &MinMaxScaler, path: &Path) -> Result<(), ArtifactError> {
    let params = scaler
        .params()
        .ok_or_else(|| ArtifactError::Invalid("scaler has not been fit".to_string()))?;
    save_json(params, path)
}

/// Load scaler parameters written by `save_scaler`
pub fn load_scaler(path: &Path) -> Result<MinMaxScaler, ArtifactError> {
    let params: ScalerParams = load_json(path)?;
    log::info!("Loaded scaler with {} columns from {}", params.columns.len(), path.display());
    Ok(MinMaxScaler::from_params(params))
}
