mod common;

use common::{Fixture, DATASET_CSV, NO_TARGET_CSV};
use heart_risk::core::dataset::{Dataset, TARGET_COLUMN};

#[test]
fn test_load_normalizes_headers() {
    let fixture = Fixture::new();
    let dataset = Dataset::from_path(fixture.dataset_path()).unwrap();

    assert_eq!(dataset.len(), 12);
    assert_eq!(dataset.columns()[0], "Age");
    assert_eq!(dataset.columns().last().map(String::as_str), Some(TARGET_COLUMN));
    assert!(!dataset.has_column("Heart Disease"));
    assert_eq!(dataset.head(3).len(), 3);
    assert_eq!(dataset.head(100).len(), 12);
}

#[test]
fn test_loading_twice_gives_same_table() {
    let first = Dataset::from_reader(DATASET_CSV.as_bytes(), "inline").unwrap();
    let second = Dataset::from_reader(DATASET_CSV.as_bytes(), "inline").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_class_distribution() {
    let dataset = Dataset::from_reader(DATASET_CSV.as_bytes(), "inline").unwrap();
    let shares = dataset.class_distribution().unwrap();

    assert_eq!(shares.len(), 2);
    // six of each; the first seen class comes first
    assert_eq!(shares[0].class, "Presence");
    assert_eq!(shares[0].count, 6);
    assert_eq!(shares[0].percent, 50.0);
    assert_eq!(shares[1].class, "Absence");
}

#[test]
fn test_numeric_and_categorical_columns() {
    let dataset = Dataset::from_reader(DATASET_CSV.as_bytes(), "inline").unwrap();

    let depression = dataset.numeric_column("ST depression").unwrap();
    assert_eq!(depression.len(), 12);
    assert_eq!(depression[9], 4.0);

    assert!(dataset.numeric_column(TARGET_COLUMN).is_none());
    assert!(dataset.numeric_column("Resting ECG").is_none());
}

#[test]
fn test_dataset_without_target() {
    let dataset = Dataset::from_reader(NO_TARGET_CSV.as_bytes(), "inline").unwrap();
    assert!(!dataset.has_column(TARGET_COLUMN));
    assert!(dataset.class_distribution().is_none());
}
