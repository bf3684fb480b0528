//! House price prediction core
//!
//! Feature pipeline shared by training and serving, plus the model
//! runtime that turns one request into one price.

pub mod constants;
pub mod logic;

pub use logic::adapter::{EngineStatus, Prediction, PredictionAdapter};
pub use logic::features::{FeatureVector, HouseFeatures, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use logic::model::{load_model, InferenceError, LoadedModel, ModelKind, PricePredictor};
pub use logic::pipeline::{FeaturePipeline, MinMaxScaler, PipelineConfig, PipelineError};
