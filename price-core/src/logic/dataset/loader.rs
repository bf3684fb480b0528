use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{DatasetError, RawHousingRecord};

/// Load every record from a CSV file with a header row
pub fn load_csv(path: &Path) -> Result<Vec<RawHousingRecord>, DatasetError> {
    log::info!("Loading housing dataset from: {}", path.display());

    let file = File::open(path)?;
    let records = read_records(BufReader::new(file))?;

    log::info!("Loaded {} records", records.len());
    Ok(records)
}

/// Parse records from any CSV source
pub fn read_records<R: Read>(reader: R) -> Result<Vec<RawHousingRecord>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in csv_reader.deserialize() {
        let record: RawHousingRecord = result?;
        records.push(record);
    }
    Ok(records)
}

/// Extract the price column, failing on the first unlabeled row
pub fn targets(records: &[RawHousingRecord]) -> Result<Vec<f32>, DatasetError> {
    records
        .iter()
        .enumerate()
        .map(|(row, r)| {
            r.price
                .map(|p| p as f32)
                .ok_or(DatasetError::MissingTarget { row })
        })
        .collect()
}

/// Price column for a dataset that is labelled throughout or not at all
///
/// `Ok(None)` when no row has a price. A partially labelled dataset
/// fails on its first unlabelled row.
pub fn labelled_targets(records: &[RawHousingRecord]) -> Result<Option<Vec<f32>>, DatasetError> {
    if records.iter().all(|r| r.price.is_none()) {
        return Ok(None);
    }
    targets(records).map(Some)
}

/// Shuffle with a fixed seed and cut off `test_ratio` of the rows
///
/// Returns `(train, test)`. The test side gets at least one row whenever
/// the input has two or more.
pub fn train_test_split(
    records: &[RawHousingRecord],
    test_ratio: f64,
    seed: u64,
) -> Result<(Vec<RawHousingRecord>, Vec<RawHousingRecord>), DatasetError> {
    if !(test_ratio > 0.0 && test_ratio < 1.0) {
        return Err(DatasetError::InvalidSplit(test_ratio));
    }

    let mut shuffled = records.to_vec();
    let mut rng = StdRng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);

    let mut test_len = (shuffled.len() as f64 * test_ratio).round() as usize;
    if shuffled.len() >= 2 {
        test_len = test_len.clamp(1, shuffled.len() - 1);
    }

    let test = shuffled.split_off(shuffled.len() - test_len);
    Ok((shuffled, test))
}
