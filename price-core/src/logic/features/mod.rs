//! Features Module - Feature Schema & Vectors
//!
//! The schema (`layout`) is shared by the training pipeline and the
//! serving adapter. Vectors carry the schema version and hash.

pub mod layout;
pub mod vector;
pub mod request;


// Re-export common types
pub use layout::{LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use vector::{BuildError, FeatureVector, FeatureVectorBuilder};
pub use request::HouseFeatures;
