//! Error types for the profiling engine.
//!
//! Every engine operation returns `Result<T, ProfileError>`. The CLI wraps these
//! in `anyhow` with context, the presentation layer decides on any fallback.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while cleaning, summarizing or correlating a dataset.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Input is not a well-formed rectangular table, or a column cannot be
    /// represented in the cleaned form.
    #[error("unsupported input: {reason}")]
    UnsupportedInput { reason: String },

    /// The requested column does not exist in the dataset.
    #[error("column '{column}' not found")]
    NotFound { column: String },

    /// A statistic is undefined for the given column.
    ///
    /// Raised for an entirely null numeric column when the all-null policy is
    /// `NullMeanPolicy::Error`, and for correlation over a column that still
    /// carries missing values.
    #[error("undefined statistic for column '{column}': {reason}")]
    UndefinedStatistic { column: String, reason: String },

    /// Error raised by the underlying dataframe engine.
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl ProfileError {
    pub(crate) fn unsupported(reason: impl Into<String>) -> Self {
        ProfileError::UnsupportedInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(column: impl Into<String>) -> Self {
        ProfileError::NotFound {
            column: column.into(),
        }
    }

    pub(crate) fn undefined(column: impl Into<String>, reason: impl Into<String>) -> Self {
        ProfileError::UndefinedStatistic {
            column: column.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias used across the engine.
pub type ProfileResult<T> = Result<T, ProfileError>;
