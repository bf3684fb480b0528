//! ONNX Runtime backend
//!
//! Expects a graph taking one `(1, 19)` f32 input and producing a single
//! value. Running a session needs `&mut`, so it sits behind a mutex.

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use crate::logic::features::FEATURE_COUNT;
use super::inference::{InferenceError, ModelKind, PricePredictor};

pub struct OnnxRegressor {
    session: Mutex<Session>,
    output_name: String,
}

impl OnnxRegressor {
    pub fn from_memory(model_bytes: &[u8]) -> Result<Self, InferenceError> {
        log::info!("Loading ONNX model from memory ({} bytes)", model_bytes.len());

        let session = Session::builder()
            .map_err(|e| InferenceError::Load(format!("Session builder error: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError::Load(format!("Optimization error: {}", e)))?
            .commit_from_memory(model_bytes)
            .map_err(|e| InferenceError::Load(format!("Load from memory error: {}", e)))?;

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| InferenceError::Load("No output defined".to_string()))?;

        Ok(Self {
            session: Mutex::new(session),
            output_name,
        })
    }
}

impl PricePredictor for OnnxRegressor {
    fn kind(&self) -> ModelKind {
        ModelKind::Onnx
    }

    fn input_width(&self) -> usize {
        FEATURE_COUNT
    }

    fn predict_row(&self, row: &[f32]) -> Result<f32, InferenceError> {
        self.check_width(row)?;

        let input_array = Array2::<f32>::from_shape_vec((1, row.len()), row.to_vec())
            .map_err(|e| InferenceError::Runtime(format!("Array error: {}", e)))?;
        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError::Runtime(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError::Runtime(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| InferenceError::Runtime("No output".to_string()))?;
        let (_, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::Runtime(format!("Extract error: {}", e)))?;

        data.first()
            .copied()
            .ok_or_else(|| InferenceError::Runtime("Empty output tensor".to_string()))
    }
}
