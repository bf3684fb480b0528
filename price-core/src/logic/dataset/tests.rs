use super::*;
use crate::logic::features::layout::FEATURE_LAYOUT;
use crate::logic::pipeline::FeaturePipeline;
use crate::logic::pipeline::RecordSet;
use std::fs;
use tempfile::tempdir;

const HEADER: &str = "id,date,price,bedrooms,bathrooms,sqft_living,sqft_lot,floors,waterfront,view,condition,grade,sqft_above,sqft_basement,yr_built,yr_renovated,zipcode,lat,long,sqft_living15,sqft_lot15";

const ROWS: &[&str] = &[
    "7129300520,20141013T000000,221900,3,1,1180,5650,1,0,0,3,7,1180,0,1955,0,98178,47.5112,-122.257,1340,5650",
    "6414100192,20141209T000000,538000,3,2.25,2570,7242,2,0,0,3,7,2170,400,1951,1991,98125,47.721,-122.319,1690,7639",
    "5631500400,20150225T000000,180000,2,1,770,10000,1,0,0,3,6,770,0,1933,0,98028,47.7379,-122.233,2720,8062",
    "2487200875,20141209T000000,604000,4,3,1960,5000,1,0,0,5,7,1050,910,1965,0,98136,47.5208,-122.393,1360,5000",
];

fn csv_text() -> String {
    let mut text = String::from(HEADER);
    for row in ROWS {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    text
}

#[test]
fn test_read_records_by_header() {
    let records = read_records(csv_text().as_bytes()).unwrap();

    assert_eq!(records.len(), 4);
    assert_eq!(records[0], RawHousingRecord::sample());
    assert_eq!(records[1].zipcode, "98125");
    assert_eq!(records[2].price, Some(180000.0));
}

#[test]
fn test_price_column_optional() {
    let text = "bedrooms,bathrooms,sqft_living,sqft_lot,floors,waterfront,view,condition,grade,sqft_above,sqft_basement,yr_built,yr_renovated,zipcode,lat,long,sqft_living15,sqft_lot15,id,date\n\
                3,1,1180,5650,1,0,0,3,7,1180,0,1955,0,98178,47.5112,-122.257,1340,5650,1,2014-05-02\n";
    let records = read_records(text.as_bytes()).unwrap();

    assert_eq!(records[0].price, None);
    assert!(matches!(targets(&records), Err(DatasetError::MissingTarget { row: 0 })));
}

#[test]
fn test_labelled_targets_fully_labelled() {
    let records = read_records(csv_text().as_bytes()).unwrap();
    assert_eq!(
        labelled_targets(&records).unwrap(),
        Some(vec![221900.0, 538000.0, 180000.0, 604000.0])
    );
}

#[test]
fn test_labelled_targets_unlabelled() {
    let records = vec![RawHousingRecord { price: None, ..RawHousingRecord::sample() }; 3];
    assert_eq!(labelled_targets(&records).unwrap(), None);
    assert_eq!(labelled_targets(&[]).unwrap(), None);
}

#[test]
fn test_labelled_targets_partial_names_row() {
    let mut records = read_records(csv_text().as_bytes()).unwrap();
    records[2].price = None;

    let err = labelled_targets(&records).unwrap_err();
    assert!(matches!(err, DatasetError::MissingTarget { row: 2 }));
    assert_eq!(err.to_string(), "row 2 has no price");
}

#[test]
fn test_malformed_row_is_csv_error() {
    let text = format!("{}\n7129300520,20141013T000000,221900,three,1", HEADER);
    assert!(matches!(read_records(text.as_bytes()), Err(DatasetError::Csv(_))));
}

#[test]
fn test_load_csv_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("kc_house_data.csv");
    fs::write(&path, csv_text()).unwrap();

    let records = load_csv(&path).unwrap();
    assert_eq!(targets(&records).unwrap(), vec![221900.0, 538000.0, 180000.0, 604000.0]);
}

#[test]
fn test_load_csv_missing_file() {
    let dir = tempdir().unwrap();
    assert!(matches!(load_csv(&dir.path().join("nope.csv")), Err(DatasetError::Io(_))));
}

#[test]
fn test_train_test_split_is_seeded_partition() {
    let records = read_records(csv_text().as_bytes()).unwrap();

    let (train, test) = train_test_split(&records, 0.25, 42).unwrap();
    assert_eq!(train.len(), 3);
    assert_eq!(test.len(), 1);

    let mut ids: Vec<_> = train.iter().chain(test.iter()).map(|r| r.id.clone()).collect();
    ids.sort();
    let mut expected: Vec<_> = records.iter().map(|r| r.id.clone()).collect();
    expected.sort();
    assert_eq!(ids, expected);

    let (train_again, test_again) = train_test_split(&records, 0.25, 42).unwrap();
    assert_eq!(train, train_again);
    assert_eq!(test, test_again);
}

#[test]
fn test_train_test_split_rejects_bad_ratio() {
    let records = read_records(csv_text().as_bytes()).unwrap();
    for ratio in [0.0, 1.0, -0.5, f64::NAN] {
        assert!(matches!(
            train_test_split(&records, ratio, 1),
            Err(DatasetError::InvalidSplit(_))
        ));
    }
}

#[test]
fn test_write_feature_csv() {
    let records = read_records(csv_text().as_bytes()).unwrap();
    let matrix = FeaturePipeline::new()
        .transform_to_matrix(&RecordSet::from_records(&records))
        .unwrap();
    let prices = targets(&records).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("out").join("features.csv");
    let written = write_feature_csv(&path, FEATURE_LAYOUT, &matrix, Some(prices.as_slice())).unwrap();
    assert_eq!(written, 4);

    let content = fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("bedrooms,bathrooms"));
    assert!(header.ends_with("month,year,price"));
    assert_eq!(lines.next().unwrap().split(',').last(), Some("221900"));
    assert_eq!(content.lines().count(), 5);
}

#[test]
fn test_write_feature_csv_target_mismatch() {
    let matrix = ndarray::Array2::<f32>::zeros((2, 19));
    let dir = tempdir().unwrap();
    let err = write_feature_csv(&dir.path().join("f.csv"), FEATURE_LAYOUT, &matrix, Some(&[1.0f32][..])).unwrap_err();
    assert!(matches!(err, DatasetError::TargetMismatch { rows: 2, targets: 1 }));
}
