//! Prediction Adapter - request to model to price
//!
//! Turns one validated `HouseFeatures` into a schema-ordered vector,
//! optionally scales it, and runs the model exactly once.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::logic::features::layout::layout_hash;
use crate::logic::features::{FeatureVector, HouseFeatures, FEATURE_VERSION};
use crate::logic::model::{InferenceError, LoadedModel, ModelKind, ModelMetadata, PricePredictor};
use crate::logic::pipeline::MinMaxScaler;

/// Outcome of one prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub price: f32,
    /// `"Prediction Result: <price>"`
    pub message: String,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub inference_time_us: u64,
}

/// Engine status for the status endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub model_name: String,
    pub model_type: ModelKind,
    pub checksum: String,
    pub scaler_enabled: bool,
    pub avg_latency_ms: f32,
    pub inference_count: u64,
}

/// Shared, read-only prediction path
pub struct PredictionAdapter {
    predictor: Box<dyn PricePredictor>,
    metadata: ModelMetadata,
    scaler: Option<MinMaxScaler>,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl PredictionAdapter {
    pub fn new(model: LoadedModel) -> Self {
        Self {
            predictor: model.predictor,
            metadata: model.metadata,
            scaler: None,
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        }
    }

    /// Scale request vectors with parameters fitted at training time
    ///
    /// The scaler must have been fit on exactly the schema columns.
    pub fn with_scaler(mut self, scaler: MinMaxScaler) -> Result<Self, InferenceError> {
        if !scaler.covers_layout() {
            return Err(InferenceError::Schema(
                "scaler was not fit on the feature layout".to_string(),
            ));
        }
        self.scaler = Some(scaler);
        Ok(self)
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn has_scaler(&self) -> bool {
        self.scaler.is_some()
    }

    /// Model input for a request, after scaling
    pub fn assemble(&self, request: &HouseFeatures) -> Result<FeatureVector, InferenceError> {
        let vector = request
            .to_feature_vector()
            .map_err(|e| InferenceError::Schema(e.to_string()))?;

        match &self.scaler {
            Some(scaler) => scaler
                .transform_vector(&vector)
                .map_err(|e| InferenceError::Schema(e.to_string())),
            None => Ok(vector),
        }
    }

    /// Predict the price of one house
    pub fn predict(&self, request: &HouseFeatures) -> Result<Prediction, InferenceError> {
        let vector = self.assemble(request)?;
        log::debug!("model input {}", vector.to_log_entry());

        let start = Instant::now();
        let price = self.predictor.predict_row(vector.as_slice())?;
        let elapsed_us = start.elapsed().as_micros() as u64;

        if !price.is_finite() {
            return Err(InferenceError::Runtime(format!("non-finite prediction {}", price)));
        }

        self.latency_sum_us.fetch_add(elapsed_us, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);

        let prediction = Prediction {
            price,
            message: format!("Prediction Result: {}", price),
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            inference_time_us: elapsed_us,
        };

        log::info!("{} ({}us)", prediction.message, elapsed_us);
        Ok(prediction)
    }

    pub fn status(&self) -> EngineStatus {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        EngineStatus {
            model_loaded: true,
            model_name: self.metadata.model_path.clone(),
            model_type: self.metadata.model_type,
            checksum: self.metadata.checksum.clone(),
            scaler_enabled: self.scaler.is_some(),
            avg_latency_ms: avg,
            inference_count: count,
        }
    }
}

impl std::fmt::Debug for PredictionAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionAdapter")
            .field("metadata", &self.metadata)
            .field("scaler", &self.scaler.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::layout::{feature_index, FEATURE_COUNT, FEATURE_LAYOUT};
    use crate::logic::model::{Activation, DenseLayer, DenseNetwork};
    use crate::logic::pipeline::{ColumnRange, ScalerParams};
    use std::sync::{Arc, Mutex};

    /// Records every row it is handed
    struct Recorder {
        rows: Arc<Mutex<Vec<Vec<f32>>>>,
        output: f32,
    }

    impl PricePredictor for Recorder {
        fn kind(&self) -> ModelKind {
            ModelKind::DenseNetwork
        }

        fn input_width(&self) -> usize {
            FEATURE_COUNT
        }

        fn predict_row(&self, row: &[f32]) -> Result<f32, InferenceError> {
            self.check_width(row)?;
            self.rows.lock().unwrap().push(row.to_vec());
            Ok(self.output)
        }
    }

    fn recording_adapter(output: f32) -> (PredictionAdapter, Arc<Mutex<Vec<Vec<f32>>>>) {
        let rows = Arc::new(Mutex::new(Vec::new()));
        let model = LoadedModel::in_memory(Recorder { rows: rows.clone(), output });
        (PredictionAdapter::new(model), rows)
    }

    /// price = 100 * sqft_living + 50000
    fn living_area_model() -> DenseNetwork {
        let mut weights = vec![vec![0.0]; FEATURE_COUNT];
        weights[feature_index("sqft_living").unwrap()] = vec![100.0];
        DenseNetwork::new(vec![DenseLayer::new(weights, vec![50000.0], Activation::Linear).unwrap()]).unwrap()
    }

    #[test]
    fn test_predict_formats_message() {
        let adapter = PredictionAdapter::new(LoadedModel::in_memory(living_area_model()));
        let prediction = adapter.predict(&HouseFeatures::example()).unwrap();

        assert_eq!(prediction.price, 307000.0);
        assert_eq!(prediction.message, "Prediction Result: 307000");
        assert_eq!(prediction.feature_version, FEATURE_VERSION);
        assert_eq!(prediction.layout_hash, layout_hash());
    }

    #[test]
    fn test_model_called_once_with_schema_vector() {
        let (adapter, rows) = recording_adapter(1.0);
        let request = HouseFeatures::example();
        adapter.predict(&request).unwrap();

        let rows = rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].as_slice(), request.to_feature_vector().unwrap().as_slice());
    }

    #[test]
    fn test_shape_error_surfaces() {
        let narrow = DenseNetwork::new(vec![
            DenseLayer::new(vec![vec![1.0]; 5], vec![0.0], Activation::Linear).unwrap(),
        ])
        .unwrap();
        let adapter = PredictionAdapter::new(LoadedModel::in_memory(narrow));

        let err = adapter.predict(&HouseFeatures::example()).unwrap_err();
        assert_eq!(err, InferenceError::Shape { expected: 5, actual: FEATURE_COUNT });
        assert_eq!(adapter.status().inference_count, 0);

        // a failed request leaves the adapter usable
        assert!(adapter.predict(&HouseFeatures::example()).is_err());
    }

    #[test]
    fn test_unvalidated_overflow_never_reaches_model() {
        let (adapter, rows) = recording_adapter(1.0);
        let request = HouseFeatures { sqft_lot15: 1e39, ..HouseFeatures::example() };

        let err = adapter.predict(&request).unwrap_err();
        assert!(matches!(err, InferenceError::Schema(msg) if msg.contains("sqft_lot15")));
        assert!(rows.lock().unwrap().is_empty());
        assert_eq!(adapter.status().inference_count, 0);
    }

    #[test]
    fn test_non_finite_output_is_runtime_error() {
        let (adapter, _) = recording_adapter(f32::NAN);
        assert!(matches!(
            adapter.predict(&HouseFeatures::example()),
            Err(InferenceError::Runtime(_))
        ));
    }

    #[test]
    fn test_scaler_applied_before_model() {
        let params = ScalerParams {
            columns: FEATURE_LAYOUT
                .iter()
                .map(|name| ColumnRange { name: name.to_string(), min: 0.0, max: 10.0 })
                .collect(),
        };
        let (adapter, rows) = recording_adapter(1.0);
        let adapter = adapter.with_scaler(MinMaxScaler::from_params(params)).unwrap();
        assert!(adapter.has_scaler());

        adapter.predict(&HouseFeatures::example()).unwrap();
        let rows = rows.lock().unwrap();
        assert_eq!(rows[0][0], 0.3);
    }

    #[test]
    fn test_partial_scaler_rejected() {
        let params = ScalerParams {
            columns: vec![ColumnRange { name: "bedrooms".to_string(), min: 0.0, max: 1.0 }],
        };
        let (adapter, _) = recording_adapter(1.0);
        assert!(matches!(
            adapter.with_scaler(MinMaxScaler::from_params(params)),
            Err(InferenceError::Schema(_))
        ));

        let (adapter, _) = recording_adapter(1.0);
        assert!(adapter.with_scaler(MinMaxScaler::new()).is_err());
    }

    #[test]
    fn test_status_counts_inferences() {
        let (adapter, _) = recording_adapter(2.0);
        assert_eq!(adapter.status().inference_count, 0);
        assert_eq!(adapter.status().avg_latency_ms, 0.0);

        for _ in 0..3 {
            adapter.predict(&HouseFeatures::example()).unwrap();
        }

        let status = adapter.status();
        assert!(status.model_loaded);
        assert_eq!(status.inference_count, 3);
        assert!(!status.scaler_enabled);
        assert_eq!(status.model_name, "<memory>");
    }

    #[test]
    fn test_adapter_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PredictionAdapter>();
    }
}
