//! Type-aware cleaning: missing value imputation and index artifact removal

use polars::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use super::typer::{classify, ColumnKind};
use crate::error::{ProfileError, ProfileResult};

/// Placeholder written into missing cells of textual columns
pub const TEXT_PLACEHOLDER: &str = "NA";

/// Substring (matched case-insensitively) that marks a serialized index column
pub const INDEX_ARTIFACT_MARKER: &str = "unnamed";

/// What to do when a numeric column has no non-missing values to average
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NullMeanPolicy {
    /// Fill the column with 0.0
    #[default]
    Zero,
    /// Fail with `ProfileError::UndefinedStatistic`
    Error,
}

impl std::fmt::Display for NullMeanPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NullMeanPolicy::Zero => write!(f, "zero"),
            NullMeanPolicy::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for NullMeanPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zero" => Ok(NullMeanPolicy::Zero),
            "error" => Ok(NullMeanPolicy::Error),
            _ => Err(format!(
                "Unknown null-mean policy: '{}'. Use 'zero' or 'error'.",
                s
            )),
        }
    }
}

/// Clean a dataset with the default all-null policy
pub fn clean(df: &DataFrame) -> ProfileResult<DataFrame> {
    clean_with_policy(df, NullMeanPolicy::default())
}

/// Clean a dataset, returning a new snapshot.
///
/// - Index artifact columns (name contains "unnamed", any case) are removed,
///   whatever their kind.
/// - Textual columns: missing cells become `"NA"`.
/// - Numeric columns: missing cells (null or NaN) become the mean of the
///   original non-missing values.
///
/// The result contains no missing values and `clean(clean(d)) == clean(d)`.
pub fn clean_with_policy(df: &DataFrame, policy: NullMeanPolicy) -> ProfileResult<DataFrame> {
    // Artifacts go first so an all-null index column never reaches imputation
    let kept: Vec<&Column> = df
        .get_columns()
        .iter()
        .filter(|col| {
            let artifact = is_index_artifact(col.name().as_str());
            if artifact {
                debug!(column = %col.name(), "dropping index artifact column");
            }
            !artifact
        })
        .collect();

    let mut cleaned = Vec::with_capacity(kept.len());
    for col in kept {
        let filled = match classify(col) {
            ColumnKind::Numeric => impute_numeric(col, policy)?,
            ColumnKind::Textual => impute_textual(col)?,
        };
        cleaned.push(filled);
    }

    debug!(
        columns_in = df.width(),
        columns_out = cleaned.len(),
        rows = df.height(),
        "cleaned dataset"
    );

    Ok(DataFrame::new(cleaned)?)
}

/// Whether a column name looks like a re-serialized positional index
pub fn is_index_artifact(name: &str) -> bool {
    name.to_lowercase().contains(INDEX_ARTIFACT_MARKER)
}

/// Mean of the non-missing values of a numeric column, `None` if there are none
pub fn column_mean(col: &Column) -> ProfileResult<Option<f64>> {
    let floats = col.cast(&DataType::Float64)?;
    let ca = floats.f64()?;

    let (sum, count) = ca
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));

    Ok(if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    })
}

fn has_missing_numeric(col: &Column) -> ProfileResult<bool> {
    if col.null_count() > 0 {
        return Ok(true);
    }
    // NaN only exists in float storage
    match col.dtype() {
        DataType::Float32 | DataType::Float64 => {
            let floats = col.cast(&DataType::Float64)?;
            let has_nan = floats.f64()?.into_iter().flatten().any(|v| v.is_nan());
            Ok(has_nan)
        }
        _ => Ok(false),
    }
}

fn impute_numeric(col: &Column, policy: NullMeanPolicy) -> ProfileResult<Column> {
    if !has_missing_numeric(col)? {
        return Ok(col.clone());
    }

    let fill = match column_mean(col)? {
        Some(mean) => mean,
        None => match policy {
            NullMeanPolicy::Zero => {
                warn!(column = %col.name(), "numeric column has no values, imputing 0.0");
                0.0
            }
            NullMeanPolicy::Error => {
                return Err(ProfileError::undefined(
                    col.name().as_str(),
                    "mean of an entirely missing numeric column",
                ))
            }
        },
    };

    let floats = col.cast(&DataType::Float64)?;
    let values: Vec<f64> = floats
        .f64()?
        .into_iter()
        .map(|v| match v {
            Some(x) if !x.is_nan() => x,
            _ => fill,
        })
        .collect();

    debug!(column = %col.name(), fill, "imputed numeric column with mean");
    Ok(Column::new(col.name().clone(), values))
}

fn impute_textual(col: &Column) -> ProfileResult<Column> {
    if col.null_count() == 0 {
        return Ok(col.clone());
    }

    let strings = col.cast(&DataType::String).map_err(|e| {
        ProfileError::unsupported(format!(
            "column '{}' of type {} cannot hold the '{}' placeholder: {}",
            col.name(),
            col.dtype(),
            TEXT_PLACEHOLDER,
            e
        ))
    })?;

    let values: Vec<&str> = strings
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or(TEXT_PLACEHOLDER))
        .collect();

    Ok(Column::new(col.name().clone(), values))
}
