//! Feature Vector - the fixed-width model input
//!
//! Each vector carries the layout version and hash it was built against.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use super::layout::{feature_index, layout_hash, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Schema-ordered values plus layout metadata
///
/// Every vector handed to a model goes through this type. Raw `Vec<f32>`
/// rows are converted with [`FeatureVector::try_from_slice`], which rejects
/// wrong lengths instead of padding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f32; FEATURE_COUNT],
}

/// A row did not have exactly `FEATURE_COUNT` values
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("feature vector needs {expected} values, got {actual}")]
pub struct VectorLengthError {
    pub expected: usize,
    pub actual: usize,
}

impl FeatureVector {
    /// Create a new zeroed feature vector with current version
    pub fn new() -> Self {
        Self::from_values([0.0; FEATURE_COUNT])
    }

    /// Create from raw values with current version
    pub fn from_values(values: [f32; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    /// Create from a slice that must already be in layout order
    pub fn try_from_slice(values: &[f32]) -> Result<Self, VectorLengthError> {
        let array: [f32; FEATURE_COUNT] = values.try_into().map_err(|_| VectorLengthError {
            expected: FEATURE_COUNT,
            actual: values.len(),
        })?;
        Ok(Self::from_values(array))
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    /// Value of a schema feature, `None` for names outside the layout
    pub fn get_by_name(&self, name: &str) -> Option<f32> {
        feature_index(name).and_then(|i| self.get(i))
    }

    /// Name-keyed values for debug logs
    pub fn to_log_entry(&self) -> serde_json::Value {
        let named: BTreeMap<&str, f32> = FEATURE_LAYOUT.iter().copied().zip(self.values).collect();
        serde_json::json!({
            "layout": format!("v{}/{:08x}", self.version, self.layout_hash),
            "features": named,
        })
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[f32; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f32; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}

impl TryFrom<&[f32]> for FeatureVector {
    type Error = VectorLengthError;

    fn try_from(values: &[f32]) -> Result<Self, Self::Error> {
        Self::try_from_slice(values)
    }
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Error from [`FeatureVectorBuilder`]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("unknown feature '{0}'")]
    UnknownFeature(String),
    #[error("features never set: {0:?}")]
    Missing(Vec<&'static str>),
    #[error("feature '{0}' is not a finite f32")]
    NotFinite(&'static str),
}

/// Builds a vector by feature name, refusing to emit one with gaps
pub struct FeatureVectorBuilder {
    vector: FeatureVector,
    seen: [bool; FEATURE_COUNT],
}

impl FeatureVectorBuilder {
    pub fn new() -> Self {
        Self {
            vector: FeatureVector::new(),
            seen: [false; FEATURE_COUNT],
        }
    }

    /// Place a value at the layout position of `name`
    pub fn set(mut self, name: &str, value: f32) -> Result<Self, BuildError> {
        let index = feature_index(name).ok_or_else(|| BuildError::UnknownFeature(name.to_string()))?;
        if !value.is_finite() {
            return Err(BuildError::NotFinite(FEATURE_LAYOUT[index]));
        }
        self.vector.values[index] = value;
        self.seen[index] = true;
        Ok(self)
    }

    pub fn build(self) -> Result<FeatureVector, BuildError> {
        let missing: Vec<&'static str> = FEATURE_LAYOUT
            .iter()
            .zip(self.seen.iter())
            .filter(|(_, seen)| !**seen)
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            Ok(self.vector)
        } else {
            Err(BuildError::Missing(missing))
        }
    }
}

impl Default for FeatureVectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
