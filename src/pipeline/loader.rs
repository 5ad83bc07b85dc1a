//! Dataset ingestion: in-memory columns, or CSV and Parquet files for the CLI

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

use crate::error::{ProfileError, ProfileResult};

/// Build a dataset from columns, rejecting anything that is not rectangular
pub fn dataset_from_columns(columns: Vec<Column>) -> ProfileResult<DataFrame> {
    if let Some(first) = columns.first() {
        let expected = first.len();
        if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
            return Err(ProfileError::unsupported(format!(
                "column '{}' has {} rows, expected {}",
                bad.name(),
                bad.len(),
                expected
            )));
        }
    }

    DataFrame::new(columns).map_err(|e| ProfileError::unsupported(e.to_string()))
}

/// Load a dataset from a file (CSV or Parquet based on extension)
///
/// # Arguments
/// * `path` - Input file path
/// * `infer_schema_length` - Rows used for CSV schema inference, 0 for a full scan
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(schema_length)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: '{}'. Supported formats: csv, parquet",
            extension
        ),
    };

    lf.collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))
}
