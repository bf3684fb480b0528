//! Date Decomposition - split the sale date into `month` and `year`

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::constants::DATE_COLUMN;
use crate::logic::features::layout::DERIVED_COLUMNS;
use super::error::PipelineError;
use super::frame::{ColumnData, RecordSet};
use super::stage::Transformer;

/// Date-time layouts seen in sales exports, most common first
const DATETIME_FORMATS: &[&str] = &[
    "%Y%m%dT%H%M%S",     // 20141013T000000 (King County export)
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// Parse a sale date, accepting any supported layout
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok().map(|dt| dt.date()))
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        })
        .filter(|date| (1000..=9999).contains(&date.year()))
}

/// Adds `month` (1-12) and `year` columns; keeps the source column
#[derive(Debug, Clone)]
pub struct DateDecomposition {
    column: String,
}

impl DateDecomposition {
    pub fn new(column: &str) -> Self {
        Self { column: column.to_string() }
    }

    pub fn column(&self) -> &str {
        &self.column
    }
}

impl Default for DateDecomposition {
    fn default() -> Self {
        Self::new(DATE_COLUMN)
    }
}

impl Transformer for DateDecomposition {
    fn name(&self) -> &'static str {
        "date_decomposition"
    }

    fn transform(&self, data: &RecordSet) -> Result<RecordSet, PipelineError> {
        let raw = data.text(&self.column)?;

        let mut months = Vec::with_capacity(raw.len());
        let mut years = Vec::with_capacity(raw.len());

        for (row, value) in raw.iter().enumerate() {
            let date = parse_date(value).ok_or_else(|| PipelineError::DataFormat {
                column: self.column.clone(),
                row,
                value: value.clone(),
            })?;
            months.push(date.month() as f64);
            years.push(date.year() as f64);
        }

        let [month_column, year_column] = DERIVED_COLUMNS;
        let mut output = data.clone();
        output.upsert_column(month_column, ColumnData::Numeric(months))?;
        output.upsert_column(year_column, ColumnData::Numeric(years))?;
        Ok(output)
    }
}
