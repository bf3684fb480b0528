//! Min-Max Normalization - optional, stateful stage
//!
//! Fit once on training data, then reused unchanged at inference time.
//! Parameters serialize to JSON so the serving process can load them.

use serde::{Deserialize, Serialize};

use crate::logic::features::layout::FEATURE_LAYOUT;
use crate::logic::features::vector::FeatureVector;
use super::error::PipelineError;
use super::frame::{ColumnData, RecordSet};
use super::stage::Transformer;

/// Observed range of one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRange {
    pub name: String,
    pub min: f64,
    pub max: f64,
}

impl ColumnRange {
    /// Map into [0, 1] over the fitted range. A constant column maps to 0.
    /// Values outside the range are not clamped.
    pub fn scale(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        if range == 0.0 {
            0.0
        } else {
            (value - self.min) / range
        }
    }
}

/// Fitted scaler parameters, in column order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    pub columns: Vec<ColumnRange>,
}

impl ScalerParams {
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn range(&self, name: &str) -> Option<&ColumnRange> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Ranges in schema order, if the fitted columns are exactly the schema
    pub fn layout_ranges(&self) -> Option<Vec<&ColumnRange>> {
        if self.columns.len() != FEATURE_LAYOUT.len() {
            return None;
        }
        FEATURE_LAYOUT.iter().map(|name| self.range(name)).collect()
    }
}

/// Scales every numeric column; text columns pass through
#[derive(Debug, Clone, Default)]
pub struct MinMaxScaler {
    params: Option<ScalerParams>,
}

impl MinMaxScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a scaler fitted elsewhere
    pub fn from_params(params: ScalerParams) -> Self {
        Self { params: Some(params) }
    }

    pub fn params(&self) -> Option<&ScalerParams> {
        self.params.as_ref()
    }

    fn fitted(&self) -> Result<&ScalerParams, PipelineError> {
        self.params
            .as_ref()
            .ok_or(PipelineError::NotFitted { stage: "min_max_scaler" })
    }

    /// Whether this scaler can be applied to a schema-ordered vector
    pub fn covers_layout(&self) -> bool {
        self.params
            .as_ref()
            .map(|p| p.layout_ranges().is_some())
            .unwrap_or(false)
    }

    /// Scale a single serving-time vector
    ///
    /// The scaler must have been fit on exactly the schema columns; their
    /// fitted order does not matter, ranges are matched by name.
    pub fn transform_vector(&self, vector: &FeatureVector) -> Result<FeatureVector, PipelineError> {
        let params = self.fitted()?;
        let ranges = params.layout_ranges().ok_or_else(|| {
            PipelineError::Schema(format!(
                "scaler columns {:?} do not match the feature layout",
                params.column_names()
            ))
        })?;

        let mut scaled = vector.clone();
        for (value, range) in scaled.values.iter_mut().zip(ranges) {
            *value = range.scale(*value as f64) as f32;
        }
        Ok(scaled)
    }
}

impl Transformer for MinMaxScaler {
    fn name(&self) -> &'static str {
        "min_max_scaler"
    }

    fn fit(&mut self, data: &RecordSet) -> Result<(), PipelineError> {
        if data.is_empty() {
            return Err(PipelineError::Schema("cannot fit scaler on an empty record set".to_string()));
        }

        let columns = data
            .columns()
            .iter()
            .filter_map(|c| match &c.data {
                ColumnData::Numeric(values) => Some((c.name.as_str(), values)),
                ColumnData::Text(_) => None,
            })
            .map(|(name, values)| ColumnRange {
                name: name.to_string(),
                min: values.iter().copied().fold(f64::INFINITY, f64::min),
                max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            })
            .collect();

        self.params = Some(ScalerParams { columns });
        Ok(())
    }

    fn transform(&self, data: &RecordSet) -> Result<RecordSet, PipelineError> {
        let params = self.fitted()?;

        let incoming = data.numeric_column_names();
        if incoming != params.column_names() {
            return Err(PipelineError::Schema(format!(
                "scaler fitted on {:?}, got {:?}",
                params.column_names(),
                incoming
            )));
        }

        let mut output = data.clone();
        for range in &params.columns {
            let scaled = data
                .numeric(&range.name)?
                .iter()
                .map(|v| range.scale(*v))
                .collect();
            output.upsert_column(&range.name, ColumnData::Numeric(scaled))?;
        }
        Ok(output)
    }

    fn is_fitted(&self) -> bool {
        self.params.is_some()
    }
}
