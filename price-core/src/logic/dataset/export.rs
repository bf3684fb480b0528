use std::path::Path;

use ndarray::Array2;

use crate::constants::TARGET_COLUMN;
use super::DatasetError;

/// Write a transformed feature matrix as CSV
///
/// The header is `columns`, followed by `price` when targets are given.
/// Returns the number of data rows written.
pub fn write_feature_csv(
    path: &Path,
    columns: &[&str],
    features: &Array2<f32>,
    targets: Option<&[f32]>,
) -> Result<usize, DatasetError> {
    if let Some(targets) = targets {
        if targets.len() != features.nrows() {
            return Err(DatasetError::TargetMismatch {
                rows: features.nrows(),
                targets: targets.len(),
            });
        }
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;

    let mut header: Vec<&str> = columns.to_vec();
    if targets.is_some() {
        header.push(TARGET_COLUMN);
    }
    writer.write_record(&header)?;

    for (i, row) in features.outer_iter().enumerate() {
        let mut fields: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        if let Some(targets) = targets {
            fields.push(targets[i].to_string());
        }
        writer.write_record(&fields)?;
    }

    writer.flush()?;
    log::info!("Wrote {} feature rows to {}", features.nrows(), path.display());
    Ok(features.nrows())
}
