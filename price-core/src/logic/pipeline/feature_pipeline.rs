//! Feature Pipeline - configured sequence of stages

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::constants::{COLUMNS_TO_DROP, DATE_COLUMN};
use crate::logic::features::layout::FEATURE_LAYOUT;
use crate::logic::features::vector::FeatureVector;
use super::date::DateDecomposition;
use super::error::PipelineError;
use super::frame::RecordSet;
use super::prune::ColumnPruning;
use super::scaler::MinMaxScaler;
use super::stage::{Stage, Transformer};

/// Which stages run, and with what parameters
///
/// Built once per process. Defaults to date decomposition and strict
/// pruning, no normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub decompose_dates: bool,
    pub date_column: String,
    pub columns_to_drop: Vec<String>,
    pub strict_pruning: bool,
    pub normalize: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            decompose_dates: true,
            date_column: DATE_COLUMN.to_string(),
            columns_to_drop: COLUMNS_TO_DROP.iter().map(|c| c.to_string()).collect(),
            strict_pruning: true,
            normalize: false,
        }
    }
}

impl PipelineConfig {
    /// Default stages plus min-max normalization
    pub fn with_normalization() -> Self {
        Self {
            normalize: true,
            ..Default::default()
        }
    }
}

/// Ordered stages with a shared fit/transform contract
///
/// Fitting happens once. After that the pipeline only transforms.
#[derive(Debug, Clone)]
pub struct FeaturePipeline {
    config: PipelineConfig,
    stages: Vec<Stage>,
    fitted: bool,
}

impl FeaturePipeline {
    pub fn from_config(config: PipelineConfig) -> Self {
        let mut stages = Vec::with_capacity(3);

        if config.decompose_dates {
            stages.push(Stage::DateDecomposition(DateDecomposition::new(&config.date_column)));
        }

        if !config.columns_to_drop.is_empty() {
            let pruning = ColumnPruning::new(&config.columns_to_drop);
            stages.push(Stage::ColumnPruning(if config.strict_pruning {
                pruning
            } else {
                pruning.lenient()
            }));
        }

        if config.normalize {
            stages.push(Stage::Normalization(MinMaxScaler::new()));
        }

        log::debug!(
            "Feature pipeline built with stages {:?}",
            stages.iter().map(|s| s.name()).collect::<Vec<_>>()
        );

        Self { config, stages, fitted: false }
    }

    pub fn new() -> Self {
        Self::from_config(PipelineConfig::default())
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Fit every stage in order, each on the previous stage's output
    pub fn fit(&mut self, data: &RecordSet) -> Result<(), PipelineError> {
        self.fit_transform(data).map(|_| ())
    }

    /// Fit, returning the fully transformed training data
    pub fn fit_transform(&mut self, data: &RecordSet) -> Result<RecordSet, PipelineError> {
        if self.fitted {
            return Err(PipelineError::AlreadyFitted);
        }

        let mut current = data.clone();

        for stage in &mut self.stages {
            current = stage.fit_transform(&current)?;
            log::debug!(
                "stage {} fitted: {} rows x {} columns",
                stage.name(),
                current.len(),
                current.width()
            );
        }

        self.fitted = true;
        Ok(current)
    }

    /// Apply every stage in order; the input is left untouched
    pub fn transform(&self, data: &RecordSet) -> Result<RecordSet, PipelineError> {
        let mut current = data.clone();

        for stage in &self.stages {
            current = stage.transform(&current)?;
        }

        Ok(current)
    }

    /// Transform, then select the schema columns into an `N × 19` matrix
    pub fn transform_to_matrix(&self, data: &RecordSet) -> Result<Array2<f32>, PipelineError> {
        self.transform(data)?.to_matrix(FEATURE_LAYOUT)
    }

    /// Transform into one versioned vector per row
    pub fn transform_to_vectors(&self, data: &RecordSet) -> Result<Vec<FeatureVector>, PipelineError> {
        self.transform(data)?.to_vectors()
    }

    /// The fitted normalization stage, when configured
    pub fn scaler(&self) -> Option<&MinMaxScaler> {
        self.stages.iter().find_map(|s| match s {
            Stage::Normalization(scaler) => Some(scaler),
            _ => None,
        })
    }
}

impl Default for FeaturePipeline {
    fn default() -> Self {
        Self::new()
    }
}
