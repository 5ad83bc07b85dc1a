//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a raw dataset in the shape of a re-serialized CSV export
///
/// This DataFrame includes:
/// - `Unnamed: 0`: Positional index artifact (dropped by cleaning)
/// - `state`: Textual column with one missing value
/// - `colonies`: Integer column with one missing value
/// - `yield_per_colony`: Float column, complete
/// - `total_production`: Float column tracking `colonies`, one missing value
/// - `price_per_lb`: Float column falling as production rises
pub fn create_raw_dataframe() -> DataFrame {
    df! {
        "Unnamed: 0" => [0i64, 1, 2, 3, 4, 5],
        "state" => [Some("AL"), Some("AZ"), None, Some("CA"), Some("AL"), Some("FL")],
        "colonies" => [Some(16i64), Some(55), Some(53), None, Some(230), Some(98)],
        "yield_per_colony" => [71.0f64, 60.0, 65.0, 83.0, 52.0, 88.0],
        "total_production" => [Some(1136.0f64), Some(3300.0), Some(3445.0), Some(4000.0), None, Some(8624.0)],
        "price_per_lb" => [2.20f64, 1.25, 1.18, 1.10, 0.95, 0.60],
    }
    .unwrap()
}

/// Create a DataFrame with known correlation patterns
pub fn create_correlation_test_dataframe() -> DataFrame {
    df! {
        "label" => ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"],
        "a" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0],
        "b" => [3.0f64, 5.0, 7.0, 9.0, 11.0, 13.0, 15.0, 17.0, 19.0, 21.0], // b = 2a + 1
        "c" => [10.0f64, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0], // Negatively correlated with a
        "d" => [5.0f64, 1.0, 8.0, 2.0, 9.0, 3.0, 7.0, 4.0, 6.0, 0.0], // Weakly related noise
    }
    .unwrap()
}

/// Create a cleaned DataFrame with `cols` random numeric columns
pub fn create_large_test_dataframe(rows: usize, cols: usize, seed: u64) -> DataFrame {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let columns: Vec<Column> = (0..cols)
        .map(|i| {
            let values: Vec<f64> = (0..rows).map(|_| rng.gen::<f64>() * 100.0).collect();
            Column::new(format!("feature_{}", i).into(), values)
        })
        .collect();

    DataFrame::new(columns).unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}

/// Assert that no column of a DataFrame holds a null
pub fn assert_no_nulls(df: &DataFrame) {
    for col in df.get_columns() {
        assert_eq!(
            col.null_count(),
            0,
            "Column '{}' still has {} null(s)",
            col.name(),
            col.null_count()
        );
    }
}
