//! Correlation-based relationship discovery

use faer::Mat;
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use super::typer::numeric_column_names;
use crate::error::{ProfileError, ProfileResult};

/// Default absolute coefficient a partner must exceed to be reported
pub const DEFAULT_RELATIONSHIP_THRESHOLD: f64 = 0.5;

/// Threshold for auto-selecting matrix vs pairwise correlation computation.
/// Matrix multiplication is more efficient when there are many columns.
const MATRIX_METHOD_COLUMN_THRESHOLD: usize = 15;

/// How the correlation matrix is computed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationMethod {
    /// Matrix method at 15+ columns, pairwise below
    #[default]
    Auto,
    /// One parallel task per column pair
    Pairwise,
    /// Standardized data matrix product
    Matrix,
}

impl std::fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorrelationMethod::Auto => write!(f, "auto"),
            CorrelationMethod::Pairwise => write!(f, "pairwise"),
            CorrelationMethod::Matrix => write!(f, "matrix"),
        }
    }
}

impl std::str::FromStr for CorrelationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(CorrelationMethod::Auto),
            "pairwise" => Ok(CorrelationMethod::Pairwise),
            "matrix" => Ok(CorrelationMethod::Matrix),
            _ => Err(format!(
                "Unknown correlation method: '{}'. Use 'auto', 'pairwise' or 'matrix'.",
                s
            )),
        }
    }
}

/// Square, symmetric Pearson correlation matrix over numeric columns.
///
/// The diagonal is exactly 1.0 and `get(a, b) == get(b, a)` bit for bit.
///
/// Numeric columns without a finite, non-zero variance have no defined
/// coefficient and are not part of the matrix: constant columns (including an
/// all-missing column zero-filled by cleaning) and columns whose variance
/// overflows. They are listed in `excluded()` instead, so the unit diagonal
/// holds for every column in `columns()`, not for every numeric column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Vec<Vec<f64>>,
    /// Numeric columns left out because their variance is zero or not finite
    excluded: Vec<String>,
}

impl CorrelationMatrix {
    /// Build from the upper triangle; the lower triangle is mirrored and the
    /// diagonal forced to 1.0.
    fn from_upper(columns: Vec<String>, mut values: Vec<Vec<f64>>, excluded: Vec<String>) -> Self {
        let n = columns.len();
        for i in 0..n {
            values[i][i] = 1.0;
            for j in (i + 1)..n {
                let v = values[i][j].clamp(-1.0, 1.0);
                values[i][j] = v;
                values[j][i] = v;
            }
        }
        Self {
            columns,
            values,
            excluded,
        }
    }

    /// Column names, in declaration order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficients of the `i`-th column against every column
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i]
    }

    /// Coefficient between two named columns
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        Some(self.values[i][j])
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Direction of a reported relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Positive,
    Negative,
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sign::Positive => write!(f, "positively"),
            Sign::Negative => write!(f, "negatively"),
        }
    }
}

/// The strongest partner of one column in the correlation matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipFinding {
    pub source: String,
    pub target: String,
    pub coefficient: f64,
    pub sign: Sign,
}

impl RelationshipFinding {
    /// Callout sentence, e.g. "Yield Per Colony is positively correlated with Price Per Lb"
    pub fn describe(&self) -> String {
        format!(
            "{} is {} correlated with {}",
            display_name(&self.target),
            self.sign,
            display_name(&self.source)
        )
    }
}

/// Presentation name of a column: underscores become spaces, words are title-cased
pub fn display_name(column: &str) -> String {
    column
        .replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// A numeric column cast to f64 with its population moments
struct NumericColumn {
    name: String,
    values: Vec<f64>,
    mean: f64,
    std: f64,
}

/// Extract numeric columns as f64 vectors, rejecting missing values
fn collect_numeric_columns(df: &DataFrame) -> ProfileResult<Vec<NumericColumn>> {
    let names = numeric_column_names(df);
    let mut columns = Vec::with_capacity(names.len());

    for name in names {
        let col = df.column(&name)?.cast(&DataType::Float64)?;
        let ca = col.f64()?;
        let mut values = Vec::with_capacity(ca.len());
        for v in ca.into_iter() {
            match v {
                Some(x) if !x.is_nan() => values.push(x),
                _ => {
                    return Err(ProfileError::undefined(
                        name,
                        "column contains missing values; clean the dataset first",
                    ))
                }
            }
        }

        let n = values.len() as f64;
        let (mean, std) = if values.is_empty() {
            (0.0, 0.0)
        } else {
            let mean = values.iter().sum::<f64>() / n;
            let var = values.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n;
            (mean, var.sqrt())
        };

        columns.push(NumericColumn {
            name,
            values,
            mean,
            std,
        });
    }

    Ok(columns)
}

/// Compute Pearson correlation between every pair of numeric columns
pub fn correlate(df: &DataFrame) -> ProfileResult<CorrelationMatrix> {
    correlate_with_method(df, CorrelationMethod::Auto)
}

/// Compute the correlation matrix with an explicit method.
///
/// Fewer than two usable numeric columns yield an empty matrix. Columns with
/// zero or overflowing variance have no defined coefficient and are listed in
/// `excluded()` instead.
pub fn correlate_with_method(
    df: &DataFrame,
    method: CorrelationMethod,
) -> ProfileResult<CorrelationMatrix> {
    let (usable, degenerate): (Vec<NumericColumn>, Vec<NumericColumn>) =
        collect_numeric_columns(df)?
            .into_iter()
            .partition(|c| c.std.is_finite() && c.std > 0.0);

    let excluded: Vec<String> = degenerate.into_iter().map(|c| c.name).collect();
    if !excluded.is_empty() {
        warn!(columns = ?excluded, "excluding columns without finite non-zero variance from correlation");
    }

    if usable.len() < 2 {
        debug!(
            numeric_columns = usable.len(),
            "fewer than two usable numeric columns, correlation matrix is empty"
        );
        return Ok(CorrelationMatrix {
            excluded,
            ..Default::default()
        });
    }

    let method = match method {
        CorrelationMethod::Auto if usable.len() >= MATRIX_METHOD_COLUMN_THRESHOLD => {
            CorrelationMethod::Matrix
        }
        CorrelationMethod::Auto => CorrelationMethod::Pairwise,
        other => other,
    };

    let values = match method {
        CorrelationMethod::Matrix => compute_correlation_matrix_fast(&usable),
        _ => compute_correlation_pairwise(&usable),
    };

    debug!(
        columns = usable.len(),
        method = %method,
        "computed correlation matrix"
    );

    let columns = usable.into_iter().map(|c| c.name).collect();
    Ok(CorrelationMatrix::from_upper(columns, values, excluded))
}

/// Upper triangle via one Pearson computation per pair, in parallel
fn compute_correlation_pairwise(columns: &[NumericColumn]) -> Vec<Vec<f64>> {
    let n = columns.len();

    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect();

    let coefficients: Vec<(usize, usize, f64)> = pairs
        .par_iter()
        .map(|&(i, j)| {
            let r = pearson_correlation(&columns[i].values, &columns[j].values).unwrap_or(0.0);
            (i, j, r)
        })
        .collect();

    let mut values = vec![vec![0.0; n]; n];
    for (i, j, r) in coefficients {
        values[i][j] = r;
    }
    values
}

/// Pearson correlation using Welford's single-pass algorithm.
///
/// Returns `None` for mismatched or empty input and for zero variance.
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len();
    if n == 0 || n != ys.len() {
        return None;
    }

    let mut count = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut m2_x = 0.0;
    let mut m2_y = 0.0;
    let mut cov_xy = 0.0;

    for (&x, &y) in xs.iter().zip(ys.iter()) {
        count += 1.0;
        let dx = x - mean_x;
        let dy = y - mean_y;
        mean_x += dx / count;
        mean_y += dy / count;
        m2_x += dx * (x - mean_x);
        m2_y += dy * (y - mean_y);
        cov_xy += dx * (y - mean_y);
    }

    if m2_x == 0.0 || m2_y == 0.0 {
        return None;
    }

    Some(cov_xy / (m2_x.sqrt() * m2_y.sqrt()))
}

/// Upper triangle via the standardized data matrix.
///
/// Algorithm:
/// 1. Standardize each column: z = (x - mean) / (std * sqrt(n))
/// 2. Compute R = Z^T * Z
fn compute_correlation_matrix_fast(columns: &[NumericColumn]) -> Vec<Vec<f64>> {
    let n_cols = columns.len();
    let n_rows = columns[0].values.len();
    let scale = (n_rows as f64).sqrt();

    let standardized: Vec<Vec<f64>> = columns
        .par_iter()
        .map(|c| {
            c.values
                .iter()
                .map(|x| (x - c.mean) / (c.std * scale))
                .collect()
        })
        .collect();

    let mut z = Mat::<f64>::zeros(n_rows, n_cols);
    for (col_idx, col_data) in standardized.iter().enumerate() {
        for (row_idx, &val) in col_data.iter().enumerate() {
            z[(row_idx, col_idx)] = val;
        }
    }

    let corr = z.transpose() * &z;

    let mut values = vec![vec![0.0; n_cols]; n_cols];
    for i in 0..n_cols {
        for j in (i + 1)..n_cols {
            values[i][j] = corr[(i, j)];
        }
    }
    values
}

/// Pick each column's most strongly correlated partner.
///
/// For every row the off-diagonal entry with the largest absolute value wins,
/// the earliest column on ties. A finding is emitted when that coefficient is
/// above `threshold` (positive) or below `-threshold` (negative). Rows are
/// reported independently, so a pair can appear once from each side.
pub fn top_relationships(matrix: &CorrelationMatrix, threshold: f64) -> Vec<RelationshipFinding> {
    let mut findings = Vec::new();

    for (i, source) in matrix.columns().iter().enumerate() {
        let row = matrix.row(i);

        let mut best: Option<(usize, f64)> = None;
        for (j, &coefficient) in row.iter().enumerate() {
            if j == i {
                continue;
            }
            match best {
                Some((_, current)) if coefficient.abs() <= current.abs() => {}
                _ => best = Some((j, coefficient)),
            }
        }

        let Some((j, coefficient)) = best else {
            continue;
        };

        let sign = if coefficient > threshold {
            Sign::Positive
        } else if coefficient < -threshold {
            Sign::Negative
        } else {
            continue;
        };

        findings.push(RelationshipFinding {
            source: source.clone(),
            target: matrix.columns()[j].clone(),
            coefficient,
            sign,
        });
    }

    debug!(findings = findings.len(), threshold, "extracted top relationships");
    findings
}
