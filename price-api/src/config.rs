//! Configuration module

use std::env;
use std::path::PathBuf;

use price_core::constants::{get_model_path, get_port, get_scaler_path, DEFAULT_MODEL_PATH, DEFAULT_PORT};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Model artifact (`.json` dense network or `.onnx`)
    pub model_path: PathBuf,

    /// Fitted scaler parameters; inputs are scaled only when set
    pub scaler_path: Option<PathBuf>,

    /// Extra plain-text log destination
    pub log_file: Option<PathBuf>,

    /// `pretty` or `json`
    pub log_format: String,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: get_port(),
            model_path: get_model_path(),
            scaler_path: get_scaler_path(),

            log_file: env::var("LOG_FILE")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),

            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string()),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            scaler_path: None,
            log_file: None,
            log_format: "pretty".to_string(),
            environment: "development".to_string(),
        }
    }
}
