//! Transformer contract shared by every pipeline stage

use super::date::DateDecomposition;
use super::error::PipelineError;
use super::frame::RecordSet;
use super::prune::ColumnPruning;
use super::scaler::MinMaxScaler;

/// One deterministic record-set transformation
///
/// `transform` never mutates its input; it returns a new record set.
pub trait Transformer {
    fn name(&self) -> &'static str;

    /// Learn parameters from training data. Stateless stages do nothing.
    fn fit(&mut self, data: &RecordSet) -> Result<(), PipelineError> {
        let _ = data;
        Ok(())
    }

    fn transform(&self, data: &RecordSet) -> Result<RecordSet, PipelineError>;

    fn fit_transform(&mut self, data: &RecordSet) -> Result<RecordSet, PipelineError> {
        self.fit(data)?;
        self.transform(data)
    }

    fn is_fitted(&self) -> bool {
        true
    }
}

/// Concrete stages a pipeline can hold
#[derive(Debug, Clone)]
pub enum Stage {
    DateDecomposition(DateDecomposition),
    ColumnPruning(ColumnPruning),
    Normalization(MinMaxScaler),
}

impl Stage {
    fn inner(&self) -> &dyn Transformer {
        match self {
            Stage::DateDecomposition(s) => s,
            Stage::ColumnPruning(s) => s,
            Stage::Normalization(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Transformer {
        match self {
            Stage::DateDecomposition(s) => s,
            Stage::ColumnPruning(s) => s,
            Stage::Normalization(s) => s,
        }
    }
}

impl Transformer for Stage {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn fit(&mut self, data: &RecordSet) -> Result<(), PipelineError> {
        self.inner_mut().fit(data)
    }

    fn transform(&self, data: &RecordSet) -> Result<RecordSet, PipelineError> {
        self.inner().transform(data)
    }

    fn is_fitted(&self) -> bool {
        self.inner().is_fitted()
    }
}
