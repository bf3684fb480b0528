//! Model Module - price regression backends
//!
//! Loading is separate from feature assembly, so backends can be swapped
//! without touching the request path.

pub mod inference;
pub mod dense;
#[cfg(feature = "onnx")]
pub mod onnx;

pub use inference::{
    artifact_checksum, load_model, InferenceError, LoadedModel, ModelKind, ModelMetadata, PricePredictor,
};
pub use dense::{Activation, DenseLayer, DenseNetwork};
