//! Column classification by declared storage type

use polars::prelude::*;
use serde::Serialize;

/// Kind of a column, decided once from its storage dtype
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    /// Strings, booleans, temporal and nested types, and all-null columns
    #[default]
    Textual,
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Textual => write!(f, "textual"),
        }
    }
}

/// Classify a single column.
///
/// Only the container's dtype is inspected, never the values: an integer column
/// full of nulls is still numeric, a string column of digits is still textual.
pub fn classify(column: &Column) -> ColumnKind {
    if column.dtype().is_primitive_numeric() {
        ColumnKind::Numeric
    } else {
        ColumnKind::Textual
    }
}

/// Classify every column of the dataset, in declaration order
pub fn classify_columns(df: &DataFrame) -> Vec<(String, ColumnKind)> {
    df.get_columns()
        .iter()
        .map(|col| (col.name().to_string(), classify(col)))
        .collect()
}

/// Names of the numeric columns, in declaration order
pub fn numeric_column_names(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| classify(col) == ColumnKind::Numeric)
        .map(|col| col.name().to_string())
        .collect()
}
