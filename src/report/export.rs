//! JSON export of a dataset profile

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{
    ColumnKind, CorrelationMatrix, DatasetProfile, DatasetShape, HistogramSummary,
    ProfileConfig, RelationshipFinding,
};

/// Metadata about the profiling run
#[derive(Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    pub tabscope_version: String,
    pub input_file: String,
    pub settings: ProfileConfig,
}

/// A column of the cleaned dataset
#[derive(Serialize)]
pub struct ColumnEntry {
    pub name: String,
    pub kind: ColumnKind,
}

/// A finding with its rendered callout
#[derive(Serialize)]
pub struct FindingEntry {
    #[serde(flatten)]
    pub finding: RelationshipFinding,
    pub description: String,
}

/// Complete profile export
#[derive(Serialize)]
pub struct ProfileExport {
    pub metadata: ExportMetadata,
    pub shape: DatasetShape,
    pub columns: Vec<ColumnEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram: Option<HistogramSummary>,
    pub correlation: CorrelationMatrix,
    pub findings: Vec<FindingEntry>,
}

impl ProfileExport {
    pub fn new(profile: &DatasetProfile, config: &ProfileConfig, input_file: &str) -> Self {
        Self {
            metadata: ExportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                tabscope_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: input_file.to_string(),
                settings: config.clone(),
            },
            shape: profile.shape,
            columns: profile
                .column_kinds
                .iter()
                .map(|(name, kind)| ColumnEntry {
                    name: name.clone(),
                    kind: *kind,
                })
                .collect(),
            histogram: profile.histogram.clone(),
            correlation: profile.correlation.clone(),
            findings: profile
                .findings
                .iter()
                .map(|f| FindingEntry {
                    finding: f.clone(),
                    description: f.describe(),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize profile to JSON")
    }
}

/// Export a profile to a JSON file
///
/// # Arguments
/// * `profile` - Profile produced by `profile_dataset`
/// * `config` - Settings the profile was produced with
/// * `input_file` - Source path recorded in the metadata
/// * `output_path` - Path to write the JSON file
pub fn export_profile(
    profile: &DatasetProfile,
    config: &ProfileConfig,
    input_file: &str,
    output_path: &Path,
) -> Result<()> {
    let json = ProfileExport::new(profile, config, input_file).to_json()?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write profile to {}", output_path.display()))?;

    Ok(())
}
