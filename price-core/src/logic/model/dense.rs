//! Dense Network - native feed-forward regressor
//!
//! Stored as JSON:
//! `{ "feature_version": 1, "layout_hash": ..., "layers": [ { "weights": [[..]], "bias": [..], "activation": "relu" } ] }`
//! with weights laid out `inputs × units`. The layout fields are optional;
//! when present they must match the current feature layout.

use std::path::Path;

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::logic::features::layout::{layout_hash, validate_layout, FEATURE_COUNT, FEATURE_VERSION};
use super::inference::{InferenceError, ModelKind, PricePredictor};

/// Width of every hidden layer in the reference architecture
pub const HIDDEN_UNITS: usize = 19;

/// Number of hidden relu layers in the reference architecture
pub const HIDDEN_LAYERS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Relu,
    Linear,
}

impl Activation {
    fn apply(self, values: &mut Array1<f32>) {
        if self == Activation::Relu {
            values.mapv_inplace(|v| v.max(0.0));
        }
    }
}

/// Fully connected layer: `activation(x · W + b)`
#[derive(Debug, Clone, PartialEq)]
pub struct DenseLayer {
    weights: Array2<f32>,
    bias: Array1<f32>,
    activation: Activation,
}

impl DenseLayer {
    /// Build from nested rows (`inputs × units`)
    pub fn new(weights: Vec<Vec<f32>>, bias: Vec<f32>, activation: Activation) -> Result<Self, InferenceError> {
        let inputs = weights.len();
        let units = weights.first().map(|r| r.len()).unwrap_or(0);

        if inputs == 0 || units == 0 {
            return Err(InferenceError::Load("layer has no weights".to_string()));
        }
        if weights.iter().any(|r| r.len() != units) {
            return Err(InferenceError::Load("weight rows have different lengths".to_string()));
        }
        if bias.len() != units {
            return Err(InferenceError::Load(format!(
                "bias has {} entries, layer has {} units",
                bias.len(),
                units
            )));
        }

        let flat: Vec<f32> = weights.into_iter().flatten().collect();
        let weights = Array2::from_shape_vec((inputs, units), flat)
            .map_err(|e| InferenceError::Load(format!("Array error: {}", e)))?;

        Ok(Self {
            weights,
            bias: Array1::from(bias),
            activation,
        })
    }

    /// Glorot-uniform weights and zero bias
    pub fn glorot(inputs: usize, units: usize, activation: Activation, rng: &mut StdRng) -> Self {
        let limit = (6.0 / (inputs + units) as f32).sqrt();
        let weights = Array2::from_shape_fn((inputs, units), |_| rng.gen_range(-limit..=limit));

        Self {
            weights,
            bias: Array1::zeros(units),
            activation,
        }
    }

    pub fn inputs(&self) -> usize {
        self.weights.nrows()
    }

    pub fn units(&self) -> usize {
        self.weights.ncols()
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    fn forward(&self, input: &Array1<f32>) -> Array1<f32> {
        let mut out = input.dot(&self.weights) + &self.bias;
        self.activation.apply(&mut out);
        out
    }
}

/// Stack of dense layers ending in a single linear unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NetworkArtifact", into = "NetworkArtifact")]
pub struct DenseNetwork {
    layers: Vec<DenseLayer>,
}

impl DenseNetwork {
    /// Chain layers, checking that their shapes line up
    pub fn new(layers: Vec<DenseLayer>) -> Result<Self, InferenceError> {
        let last = layers
            .last()
            .ok_or_else(|| InferenceError::Load("network has no layers".to_string()))?;

        if last.units() != 1 {
            return Err(InferenceError::Load(format!(
                "output layer must have 1 unit, has {}",
                last.units()
            )));
        }

        for (i, pair) in layers.windows(2).enumerate() {
            if pair[0].units() != pair[1].inputs() {
                return Err(InferenceError::Load(format!(
                    "layer {} outputs {} values but layer {} expects {}",
                    i,
                    pair[0].units(),
                    i + 1,
                    pair[1].inputs()
                )));
            }
        }

        Ok(Self { layers })
    }

    /// Reference architecture: 4 × Dense(19, relu) then Dense(1)
    ///
    /// Weights are initialized, not trained.
    pub fn reference_architecture(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut layers = Vec::with_capacity(HIDDEN_LAYERS + 1);

        let mut inputs = FEATURE_COUNT;
        for _ in 0..HIDDEN_LAYERS {
            layers.push(DenseLayer::glorot(inputs, HIDDEN_UNITS, Activation::Relu, &mut rng));
            inputs = HIDDEN_UNITS;
        }
        layers.push(DenseLayer::glorot(inputs, 1, Activation::Linear, &mut rng));

        Self { layers }
    }

    pub fn layers(&self) -> &[DenseLayer] {
        &self.layers
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, InferenceError> {
        serde_json::from_slice(bytes).map_err(|e| InferenceError::Load(e.to_string()))
    }

    /// Write the artifact as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), InferenceError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| InferenceError::Load(e.to_string()))?;
        }
        let json = serde_json::to_vec_pretty(self).map_err(|e| InferenceError::Load(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| InferenceError::Load(e.to_string()))
    }
}

impl PricePredictor for DenseNetwork {
    fn kind(&self) -> ModelKind {
        ModelKind::DenseNetwork
    }

    fn input_width(&self) -> usize {
        self.layers.first().map(|l| l.inputs()).unwrap_or(0)
    }

    fn predict_row(&self, row: &[f32]) -> Result<f32, InferenceError> {
        self.check_width(row)?;

        let mut activations = Array1::from(row.to_vec());
        for layer in &self.layers {
            activations = layer.forward(&activations);
        }

        let price = activations
            .first()
            .copied()
            .ok_or_else(|| InferenceError::Runtime("No output".to_string()))?;

        if !price.is_finite() {
            return Err(InferenceError::Runtime(format!("non-finite prediction {}", price)));
        }
        Ok(price)
    }
}

// ============================================================================
// ARTIFACT FORMAT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LayerArtifact {
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
    activation: Activation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NetworkArtifact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    feature_version: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    layout_hash: Option<u32>,
    layers: Vec<LayerArtifact>,
}

impl TryFrom<NetworkArtifact> for DenseNetwork {
    type Error = InferenceError;

    fn try_from(artifact: NetworkArtifact) -> Result<Self, Self::Error> {
        if let (Some(version), Some(hash)) = (artifact.feature_version, artifact.layout_hash) {
            validate_layout(version, hash).map_err(|e| InferenceError::Load(e.to_string()))?;
        }

        let layers = artifact
            .layers
            .into_iter()
            .map(|l| DenseLayer::new(l.weights, l.bias, l.activation))
            .collect::<Result<Vec<_>, _>>()?;

        DenseNetwork::new(layers)
    }
}

impl From<DenseNetwork> for NetworkArtifact {
    fn from(network: DenseNetwork) -> Self {
        NetworkArtifact {
            feature_version: Some(FEATURE_VERSION),
            layout_hash: Some(layout_hash()),
            layers: network
                .layers
                .into_iter()
                .map(|l| LayerArtifact {
                    weights: l.weights.outer_iter().map(|r| r.to_vec()).collect(),
                    bias: l.bias.to_vec(),
                    activation: l.activation,
                })
                .collect(),
        }
    }
}
