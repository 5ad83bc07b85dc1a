//! Unit tests for dataset loader

use polars::prelude::*;
use std::io::Write;
use tabscope::pipeline::{dataset_from_columns, load_dataset};
use tabscope::ProfileError;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_load_csv_file() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "a,b,c").unwrap();
    writeln!(file, "1,2,3").unwrap();
    writeln!(file, "4,5,6").unwrap();
    drop(file);

    let df = load_dataset(&csv_path, 100).unwrap();

    assert_shape(&df, 2, 3);
    assert_eq!(df.get_column_names(), &["a", "b", "c"]);
}

#[test]
fn test_load_csv_keeps_empty_fields_missing() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("bees.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "state,colonies").unwrap();
    writeln!(file, "AL,16").unwrap();
    writeln!(file, ",55").unwrap();
    writeln!(file, "CA,").unwrap();
    drop(file);

    let df = load_dataset(&csv_path, 100).unwrap();

    assert_eq!(df.column("state").unwrap().null_count(), 1);
    assert_eq!(df.column("colonies").unwrap().null_count(), 1);
    assert!(df.column("colonies").unwrap().dtype().is_primitive_numeric());
}

#[test]
fn test_load_csv_full_schema_scan() {
    let mut df = create_raw_dataframe();
    let (_temp_dir, csv_path) = create_temp_csv(&mut df);

    // 0 scans every row for schema inference
    let loaded = load_dataset(&csv_path, 0).unwrap();

    assert_shape(&loaded, 6, 6);
    assert_has_columns(&loaded, &["Unnamed: 0", "state", "price_per_lb"]);
}

#[test]
fn test_load_parquet_file() {
    let mut df = df! {
        "x" => [1i32, 2, 3],
        "y" => [4i32, 5, 6],
    }
    .unwrap();
    let (_temp_dir, parquet_path) = create_temp_parquet(&mut df);

    let loaded = load_dataset(&parquet_path, 100).unwrap();

    assert_shape(&loaded, 3, 2);
    assert_eq!(loaded.get_column_names(), &["x", "y"]);
    assert!(loaded.equals(&df));
}

#[test]
fn test_load_extension_is_case_insensitive() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("UPPER.CSV");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "v").unwrap();
    writeln!(file, "1").unwrap();
    drop(file);

    let df = load_dataset(&csv_path, 100).unwrap();
    assert_shape(&df, 1, 1);
}

#[test]
fn test_load_unsupported_format() {
    let temp_dir = TempDir::new().unwrap();
    let json_path = temp_dir.path().join("test.json");
    std::fs::write(&json_path, "{}").unwrap();

    let result = load_dataset(&json_path, 100);

    assert!(result.is_err());
    let err_msg = result.unwrap_err().to_string();
    assert!(
        err_msg.contains("Unsupported file format"),
        "Unexpected error: {}",
        err_msg
    );
}

#[test]
fn test_load_nonexistent_file() {
    let result = load_dataset(std::path::Path::new("/nonexistent/path/data.csv"), 100);
    assert!(result.is_err());
}

#[test]
fn test_dataset_from_columns_keeps_order() {
    let df = dataset_from_columns(vec![
        Column::new("zeta".into(), [1.0f64, 2.0]),
        Column::new("alpha".into(), ["x", "y"]),
    ])
    .unwrap();

    assert_eq!(df.get_column_names(), &["zeta", "alpha"]);
}

#[test]
fn test_dataset_from_columns_rejects_ragged_input() {
    let err = dataset_from_columns(vec![
        Column::new("a".into(), [1i64, 2, 3]),
        Column::new("b".into(), [1i64]),
    ])
    .unwrap_err();

    match err {
        ProfileError::UnsupportedInput { reason } => {
            assert!(reason.contains("'b'"), "Reason should name the column: {}", reason)
        }
        other => panic!("Expected UnsupportedInput, got {:?}", other),
    }
}

#[test]
fn test_dataset_from_columns_empty() {
    let df = dataset_from_columns(Vec::new()).unwrap();
    assert_shape(&df, 0, 0);
}
