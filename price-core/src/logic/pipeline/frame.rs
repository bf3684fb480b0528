//! Record Set - column-oriented batch of housing records
//!
//! Columns keep their insertion order. Every column has the same number
//! of rows; the first column pushed fixes that count.

use ndarray::Array2;

use crate::logic::dataset::{RawHousingRecord, RAW_NUMERIC_COLUMNS};
use crate::logic::features::layout::FEATURE_LAYOUT;
use crate::logic::features::vector::FeatureVector;
use super::error::PipelineError;

/// Values of one column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnData::Numeric(_))
    }
}

/// Named column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

/// Ordered collection of equally long columns
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordSet {
    columns: Vec<Column>,
    rows: usize,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay raw records out in dataset column order
    ///
    /// The `price` target is not included; see `dataset::targets`.
    pub fn from_records(records: &[RawHousingRecord]) -> Self {
        let rows = records.len();
        let mut columns = Vec::with_capacity(RAW_NUMERIC_COLUMNS.len() + 3);

        columns.push(Column {
            name: "id".to_string(),
            data: ColumnData::Text(records.iter().map(|r| r.id.clone()).collect()),
        });
        columns.push(Column {
            name: "date".to_string(),
            data: ColumnData::Text(records.iter().map(|r| r.date.clone()).collect()),
        });

        let numeric: Vec<[f64; 17]> = records.iter().map(|r| r.numeric_values()).collect();
        for (j, name) in RAW_NUMERIC_COLUMNS.iter().enumerate() {
            columns.push(Column {
                name: name.to_string(),
                data: ColumnData::Numeric(numeric.iter().map(|row| row[j]).collect()),
            });
            // CSV order puts zipcode between yr_renovated and lat
            if *name == "yr_renovated" {
                columns.push(Column {
                    name: "zipcode".to_string(),
                    data: ColumnData::Text(records.iter().map(|r| r.zipcode.clone()).collect()),
                });
            }
        }

        Self { columns, rows }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Names of numeric columns, in order
    pub fn numeric_column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.data.is_numeric())
            .map(|c| c.name.as_str())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Borrow a numeric column
    pub fn numeric(&self, name: &str) -> Result<&[f64], PipelineError> {
        match self.column(name).map(|c| &c.data) {
            Some(ColumnData::Numeric(values)) => Ok(values),
            Some(ColumnData::Text(_)) => Err(PipelineError::Schema(format!(
                "column '{}' is text, expected numeric",
                name
            ))),
            None => Err(PipelineError::missing_column(name)),
        }
    }

    /// Borrow a text column
    pub fn text(&self, name: &str) -> Result<&[String], PipelineError> {
        match self.column(name).map(|c| &c.data) {
            Some(ColumnData::Text(values)) => Ok(values),
            Some(ColumnData::Numeric(_)) => Err(PipelineError::Schema(format!(
                "column '{}' is numeric, expected text",
                name
            ))),
            None => Err(PipelineError::missing_column(name)),
        }
    }

    fn check_len(&self, name: &str, data: &ColumnData) -> Result<(), PipelineError> {
        if !self.columns.is_empty() && data.len() != self.rows {
            return Err(PipelineError::Schema(format!(
                "column '{}' has {} rows, record set has {}",
                name,
                data.len(),
                self.rows
            )));
        }
        Ok(())
    }

    /// Append a new column
    pub fn push_column(&mut self, name: &str, data: ColumnData) -> Result<(), PipelineError> {
        if self.has_column(name) {
            return Err(PipelineError::Schema(format!("duplicate column '{}'", name)));
        }
        self.check_len(name, &data)?;

        if self.columns.is_empty() {
            self.rows = data.len();
        }
        self.columns.push(Column { name: name.to_string(), data });
        Ok(())
    }

    /// Replace a column in place, or append it when absent
    pub fn upsert_column(&mut self, name: &str, data: ColumnData) -> Result<(), PipelineError> {
        self.check_len(name, &data)?;

        match self.position(name) {
            Some(index) => {
                self.columns[index].data = data;
                Ok(())
            }
            None => self.push_column(name, data),
        }
    }

    /// Copy without the named columns; absent names are ignored
    pub fn without_columns(&self, names: &[&str]) -> RecordSet {
        RecordSet {
            columns: self
                .columns
                .iter()
                .filter(|c| !names.contains(&c.name.as_str()))
                .cloned()
                .collect(),
            rows: self.rows,
        }
    }

    /// Select `layout` columns, by name, into an `rows × layout.len()` matrix
    pub fn to_matrix(&self, layout: &[&str]) -> Result<Array2<f32>, PipelineError> {
        let mut matrix = Array2::<f32>::zeros((self.rows, layout.len()));

        for (j, name) in layout.iter().enumerate() {
            let values = self.numeric(name)?;
            for (i, value) in values.iter().enumerate() {
                matrix[[i, j]] = *value as f32;
            }
        }

        Ok(matrix)
    }

    /// One versioned vector per row, in schema order
    pub fn to_vectors(&self) -> Result<Vec<FeatureVector>, PipelineError> {
        let matrix = self.to_matrix(FEATURE_LAYOUT)?;

        matrix
            .outer_iter()
            .map(|row| {
                FeatureVector::try_from_slice(&row.to_vec())
                    .map_err(|e| PipelineError::Schema(e.to_string()))
            })
            .collect()
    }
}
