//! End-to-end profile: clean, summarize and correlate a dataset

use polars::prelude::*;
use serde::Serialize;
use tracing::info;

use super::cleaner::{clean_with_policy, NullMeanPolicy};
use super::correlation::{
    correlate_with_method, top_relationships, CorrelationMatrix, CorrelationMethod,
    RelationshipFinding, DEFAULT_RELATIONSHIP_THRESHOLD,
};
use super::summarize::{describe, histogram, DatasetShape, HistogramConfig, HistogramSummary};
use super::typer::{classify_columns, ColumnKind};
use crate::error::ProfileResult;

/// Settings for a profiling run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileConfig {
    /// Column to build the histogram for; `None` skips it
    pub histogram_column: Option<String>,
    pub histogram: HistogramConfig,
    pub null_mean_policy: NullMeanPolicy,
    pub correlation_method: CorrelationMethod,
    /// Coefficients must exceed this in absolute value to be reported
    pub relationship_threshold: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            histogram_column: None,
            histogram: HistogramConfig::default(),
            null_mean_policy: NullMeanPolicy::default(),
            correlation_method: CorrelationMethod::default(),
            relationship_threshold: DEFAULT_RELATIONSHIP_THRESHOLD,
        }
    }
}

/// Everything the presentation layer renders for one dataset
#[derive(Debug, Clone)]
pub struct DatasetProfile {
    pub cleaned: DataFrame,
    pub shape: DatasetShape,
    pub column_kinds: Vec<(String, ColumnKind)>,
    pub histogram: Option<HistogramSummary>,
    pub correlation: CorrelationMatrix,
    pub findings: Vec<RelationshipFinding>,
}

/// Profile a raw dataset.
///
/// The raw input is never modified; every stage reads the cleaned snapshot.
pub fn profile_dataset(raw: &DataFrame, config: &ProfileConfig) -> ProfileResult<DatasetProfile> {
    let cleaned = clean_with_policy(raw, config.null_mean_policy)?;
    let shape = describe(&cleaned);
    let column_kinds = classify_columns(&cleaned);

    let distribution = config
        .histogram_column
        .as_deref()
        .map(|name| histogram(&cleaned, name, &config.histogram))
        .transpose()?;

    let correlation = correlate_with_method(&cleaned, config.correlation_method)?;
    let findings = top_relationships(&correlation, config.relationship_threshold);

    info!(
        rows = shape.row_count,
        columns = shape.column_count,
        correlated_columns = correlation.len(),
        findings = findings.len(),
        "profiled dataset"
    );

    Ok(DatasetProfile {
        cleaned,
        shape,
        column_kinds,
        histogram: distribution,
        correlation,
        findings,
    })
}
