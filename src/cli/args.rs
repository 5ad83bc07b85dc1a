//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{
    BinningStrategy, CorrelationMethod, HistogramConfig, NullMeanPolicy, ProfileConfig,
};

/// Tabscope - Profile a dataset: clean it, summarize a column and find related columns
#[derive(Parser, Debug)]
#[command(name = "tabscope")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Column to build the histogram for. Defaults to the first column of the cleaned dataset.
    #[arg(short, long)]
    pub column: Option<String>,

    /// Number of histogram bins. Defaults to Sturges' rule.
    #[arg(long, value_parser = validate_bins)]
    pub bins: Option<usize>,

    /// Binning strategy for numeric histograms: "equal-width" (default) or "equal-frequency"
    #[arg(long, default_value = "equal-width")]
    pub binning: BinningStrategy,

    /// Report a column's strongest partner only when |r| exceeds this value
    #[arg(long, default_value = "0.5", value_parser = validate_threshold)]
    pub relationship_threshold: f64,

    /// Fill value for numeric columns with no values at all: "zero" (default) or "error"
    #[arg(long, default_value = "zero")]
    pub null_mean: NullMeanPolicy,

    /// Correlation computation: "auto" (default), "pairwise" or "matrix"
    #[arg(long, default_value = "auto")]
    pub method: CorrelationMethod,

    /// Rows shown in the dataset preview
    #[arg(long, default_value = "5")]
    pub preview_rows: usize,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Write the full profile as JSON to this path
    #[arg(short, long)]
    pub export: Option<PathBuf>,

    /// Log level for diagnostics on stderr (RUST_LOG takes precedence)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Profile settings for this invocation.
    ///
    /// `histogram_column` is left as given; the caller resolves the default once
    /// the cleaned column list is known.
    pub fn profile_config(&self) -> ProfileConfig {
        ProfileConfig {
            histogram_column: self.column.clone(),
            histogram: HistogramConfig {
                bins: self.bins,
                strategy: self.binning,
            },
            null_mean_policy: self.null_mean,
            correlation_method: self.method,
            relationship_threshold: self.relationship_threshold,
        }
    }
}

/// Validator for relationship_threshold parameter
fn validate_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !(0.0..=1.0).contains(&value) {
        Err(format!(
            "relationship_threshold must be between 0.0 and 1.0, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}

/// Validator for bins parameter
fn validate_bins(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid bin count", s))?;

    if value == 0 {
        Err("bins must be at least 1".to_string())
    } else {
        Ok(value)
    }
}
