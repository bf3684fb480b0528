//! Logic Module - feature engineering and prediction
//!
//! ## Layout
//! - `features/` - versioned schema, vectors, request type
//! - `dataset/` - CSV loading, splits, matrix export
//! - `pipeline/` - fit/transform stages over record sets
//! - `model/` - regression backends (dense JSON, ONNX)
//! - `adapter` - request to prediction

pub mod features;
pub mod dataset;
pub mod pipeline;
pub mod model;
pub mod adapter;
pub mod training;
pub mod artifact;

pub use adapter::{EngineStatus, Prediction, PredictionAdapter};
pub use training::{HousingDataPipeline, TrainingError, TrainingSet};
