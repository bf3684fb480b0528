//! Dataset Module - Training Data I/O
//!
//! Reads raw housing sales from CSV, splits off the price target and
//! writes transformed feature matrices back out for training jobs.

pub mod record;
pub mod loader;
pub mod export;

#[cfg(test)]
mod tests;

pub use record::{RawHousingRecord, RAW_NUMERIC_COLUMNS};
pub use loader::{labelled_targets, load_csv, read_records, targets, train_test_split};
pub use export::write_feature_csv;

/// Errors raised while reading or writing datasets
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row} has no price")]
    MissingTarget { row: usize },

    #[error("test ratio must be within (0, 1), got {0}")]
    InvalidSplit(f64),

    #[error("{rows} feature rows but {targets} targets")]
    TargetMismatch { rows: usize, targets: usize },
}
