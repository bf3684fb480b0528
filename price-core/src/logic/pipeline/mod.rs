//! Pipeline Module - Feature Transformation Engine
//!
//! Raw housing records → ordered numeric feature matrix.
//!
//! ## Stages (fixed order)
//! 1. `date` - Date Decomposition (`month`, `year`)
//! 2. `prune` - Column Pruning (`id`, `zipcode`, `date`)
//! 3. `scaler` - Min-Max Normalization (optional)

pub mod error;
pub mod frame;
pub mod stage;
pub mod date;
pub mod prune;
pub mod scaler;
pub mod feature_pipeline;


pub use error::PipelineError;
pub use frame::{Column, ColumnData, RecordSet};
pub use stage::{Stage, Transformer};
pub use date::{parse_date, DateDecomposition};
pub use prune::ColumnPruning;
pub use scaler::{ColumnRange, MinMaxScaler, ScalerParams};
pub use feature_pipeline::{FeaturePipeline, PipelineConfig};
