//! Column Pruning - drop identifier, zip code and raw date columns

use crate::constants::COLUMNS_TO_DROP;
use super::error::PipelineError;
use super::frame::RecordSet;
use super::stage::Transformer;

/// Removes a fixed set of columns and returns the pruned copy
///
/// Strict pruning (the default) fails when a listed column is absent, so
/// pruning already-pruned data is a `Schema` error. Lenient pruning treats
/// absent columns as already removed.
#[derive(Debug, Clone)]
pub struct ColumnPruning {
    columns: Vec<String>,
    strict: bool,
}

impl ColumnPruning {
    pub fn new<S: AsRef<str>>(columns: &[S]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            strict: true,
        }
    }

    /// Make absent columns a no-op instead of an error
    pub fn lenient(mut self) -> Self {
        self.strict = false;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Default for ColumnPruning {
    fn default() -> Self {
        Self::new(COLUMNS_TO_DROP)
    }
}

impl Transformer for ColumnPruning {
    fn name(&self) -> &'static str {
        "column_pruning"
    }

    fn transform(&self, data: &RecordSet) -> Result<RecordSet, PipelineError> {
        let names: Vec<&str> = self.columns.iter().map(String::as_str).collect();

        if self.strict {
            let missing: Vec<&str> = names
                .iter()
                .copied()
                .filter(|name| !data.has_column(name))
                .collect();
            if !missing.is_empty() {
                return Err(PipelineError::missing_columns(&missing));
            }
        }

        Ok(data.without_columns(&names))
    }
}
