//! Pipeline error taxonomy

/// Errors raised by pipeline stages
///
/// Stages are deterministic, so none of these are retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    /// A value could not be parsed into the expected format
    #[error("column '{column}' row {row}: cannot parse '{value}' as a date")]
    DataFormat {
        column: String,
        row: usize,
        value: String,
    },

    /// A column is missing, duplicated, mistyped or the wrong length
    #[error("schema error: {0}")]
    Schema(String),

    /// A stateful stage was used before `fit`
    #[error("stage '{stage}' must be fit before transform")]
    NotFitted { stage: &'static str },

    /// `fit` on a pipeline that already holds fitted parameters
    #[error("pipeline is already fitted; build a new one to refit")]
    AlreadyFitted,
}

impl PipelineError {
    pub fn missing_column(name: &str) -> Self {
        PipelineError::Schema(format!("missing column '{}'", name))
    }

    pub fn missing_columns(names: &[&str]) -> Self {
        PipelineError::Schema(format!("missing columns {:?}", names))
    }
}
