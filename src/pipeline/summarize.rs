//! Shape summary and per-column value distribution

use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use super::typer::{classify, ColumnKind};
use crate::error::{ProfileError, ProfileResult};

/// Row and column counts of a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetShape {
    pub row_count: usize,
    pub column_count: usize,
}

/// Binning strategy for numeric histograms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BinningStrategy {
    /// Bins of equal width across the value range (default)
    #[default]
    EqualWidth,
    /// Bins holding approximately equal numbers of values
    EqualFrequency,
}

impl std::fmt::Display for BinningStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinningStrategy::EqualWidth => write!(f, "equal-width"),
            BinningStrategy::EqualFrequency => write!(f, "equal-frequency"),
        }
    }
}

impl std::str::FromStr for BinningStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "equal-width" | "width" => Ok(BinningStrategy::EqualWidth),
            "equal-frequency" | "frequency" | "quantile" => Ok(BinningStrategy::EqualFrequency),
            _ => Err(format!(
                "Unknown binning strategy: '{}'. Use 'equal-width' or 'equal-frequency'.",
                s
            )),
        }
    }
}

/// Histogram settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HistogramConfig {
    /// Number of bins; `None` picks Sturges' rule from the value count
    pub bins: Option<usize>,
    pub strategy: BinningStrategy,
}

/// The span of values a bin covers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BinRange {
    /// `[lower, upper)`, closed on the right for the last bin
    Interval { lower: f64, upper: f64 },
    /// A single distinct value of a textual column
    Category { value: String },
}

impl std::fmt::Display for BinRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinRange::Interval { lower, upper } => write!(f, "[{:.4}, {:.4}]", lower, upper),
            BinRange::Category { value } => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub range: BinRange,
    pub count: usize,
}

/// Boxplot marginal: min, quartiles and max
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Distribution of a single column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramSummary {
    pub column: String,
    pub kind: ColumnKind,
    pub bins: Vec<HistogramBin>,
    /// Absent for textual columns and columns without values
    pub five_number: Option<FiveNumberSummary>,
}

impl HistogramSummary {
    /// Total number of values counted across all bins
    pub fn total_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Report the row and column counts
pub fn describe(df: &DataFrame) -> DatasetShape {
    let (row_count, column_count) = df.shape();
    DatasetShape {
        row_count,
        column_count,
    }
}

/// Compute the histogram and five-number summary of one column.
///
/// Missing values are skipped. Textual columns get one bin per distinct value,
/// in order of first appearance.
pub fn histogram(
    df: &DataFrame,
    column_name: &str,
    config: &HistogramConfig,
) -> ProfileResult<HistogramSummary> {
    let col = df
        .get_columns()
        .iter()
        .find(|c| c.name().as_str() == column_name)
        .ok_or_else(|| ProfileError::not_found(column_name))?;

    let kind = classify(col);
    let summary = match kind {
        ColumnKind::Numeric => {
            let floats = col.cast(&DataType::Float64)?;
            let mut values: Vec<f64> = floats
                .f64()?
                .into_iter()
                .flatten()
                .filter(|v| !v.is_nan())
                .collect();
            values.sort_by(|a, b| a.total_cmp(b));

            let bin_count = config.bins.unwrap_or_else(|| sturges_bins(values.len()));
            let bins = match config.strategy {
                BinningStrategy::EqualWidth => equal_width_bins(&values, bin_count),
                BinningStrategy::EqualFrequency => equal_frequency_bins(&values, bin_count),
            };

            HistogramSummary {
                column: column_name.to_string(),
                kind,
                bins,
                five_number: five_number_summary(&values),
            }
        }
        ColumnKind::Textual => {
            let labels = textual_labels(col)?;
            HistogramSummary {
                column: column_name.to_string(),
                kind,
                bins: category_bins(labels.iter().map(String::as_str)),
                five_number: None,
            }
        }
    };

    debug!(
        column = column_name,
        kind = %kind,
        bins = summary.bins.len(),
        "computed histogram"
    );

    Ok(summary)
}

/// Sturges' rule: k = ceil(log2(n)) + 1
pub fn sturges_bins(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    (n as f64).log2().ceil() as usize + 1
}

/// Equal-width bins over sorted values
fn equal_width_bins(sorted: &[f64], bin_count: usize) -> Vec<HistogramBin> {
    let (min, max) = match (sorted.first(), sorted.last()) {
        (Some(&min), Some(&max)) => (min, max),
        _ => return Vec::new(),
    };

    // A constant column collapses to a single degenerate bin
    if min == max {
        return vec![HistogramBin {
            range: BinRange::Interval {
                lower: min,
                upper: max,
            },
            count: sorted.len(),
        }];
    }

    let bin_count = bin_count.max(1);
    let width = (max - min) / bin_count as f64;
    let mut counts = vec![0usize; bin_count];

    for &v in sorted {
        let idx = (((v - min) / width).floor() as usize).min(bin_count - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let lower = min + width * i as f64;
            let upper = if i + 1 == bin_count {
                max
            } else {
                min + width * (i + 1) as f64
            };
            HistogramBin {
                range: BinRange::Interval { lower, upper },
                count,
            }
        })
        .collect()
}

/// Equal-frequency bins over sorted values
fn equal_frequency_bins(sorted: &[f64], bin_count: usize) -> Vec<HistogramBin> {
    let n = sorted.len();
    if n == 0 {
        return Vec::new();
    }

    let bin_count = bin_count.clamp(1, n);
    let bin_size = n.div_ceil(bin_count);

    sorted
        .chunks(bin_size)
        .enumerate()
        .map(|(i, chunk)| {
            let end = (i + 1) * bin_size;
            let lower = chunk[0];
            let upper = if end < n { sorted[end] } else { sorted[n - 1] };
            HistogramBin {
                range: BinRange::Interval { lower, upper },
                count: chunk.len(),
            }
        })
        .collect()
}

/// Non-null values of a textual column rendered as category labels.
///
/// List, struct and binary columns cannot be cast to strings, so their values
/// are rendered one by one.
fn textual_labels(col: &Column) -> ProfileResult<Vec<String>> {
    if let Ok(strings) = col.cast(&DataType::String) {
        let labels = strings
            .str()?
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();
        return Ok(labels);
    }

    let mut labels = Vec::with_capacity(col.len());
    for idx in 0..col.len() {
        let value = col.get(idx)?;
        if !value.is_null() {
            labels.push(value.str_value().to_string());
        }
    }
    Ok(labels)
}

fn category_bins<'a>(values: impl Iterator<Item = &'a str>) -> Vec<HistogramBin> {
    let mut bins: Vec<HistogramBin> = Vec::new();
    let mut positions: std::collections::HashMap<&'a str, usize> =
        std::collections::HashMap::new();

    for v in values {
        match positions.get(v) {
            Some(&idx) => bins[idx].count += 1,
            None => {
                positions.insert(v, bins.len());
                bins.push(HistogramBin {
                    range: BinRange::Category {
                        value: v.to_string(),
                    },
                    count: 1,
                });
            }
        }
    }

    bins
}

/// Five-number summary of sorted values using linear interpolation quantiles
pub fn five_number_summary(sorted: &[f64]) -> Option<FiveNumberSummary> {
    let min = *sorted.first()?;
    let max = *sorted.last()?;

    Some(FiveNumberSummary {
        min,
        q1: quantile(sorted, 0.25),
        median: quantile(sorted, 0.5),
        q3: quantile(sorted, 0.75),
        max,
    })
}

/// Linearly interpolated quantile of non-empty sorted values
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sturges_bins() {
        assert_eq!(sturges_bins(0), 1);
        assert_eq!(sturges_bins(1), 1);
        assert_eq!(sturges_bins(8), 4);
        assert_eq!(sturges_bins(100), 8);
    }

    #[test]
    fn test_quantile_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 0.25), 1.75);
        assert_eq!(quantile(&sorted, 0.75), 3.25);
    }

    #[test]
    fn test_equal_width_max_lands_in_last_bin() {
        let sorted = [0.0, 1.0, 2.0, 3.0, 4.0];
        let bins = equal_width_bins(&sorted, 2);
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].count, 2);
        assert_eq!(bins[1].count, 3);
        assert_eq!(
            bins[1].range,
            BinRange::Interval {
                lower: 2.0,
                upper: 4.0
            }
        );
    }

    #[test]
    fn test_equal_frequency_chunks() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let bins = equal_frequency_bins(&sorted, 3);
        let counts: Vec<usize> = bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![3, 3, 1]);
    }

    #[test]
    fn test_binning_strategy_from_str() {
        assert_eq!(
            "equal-width".parse::<BinningStrategy>().unwrap(),
            BinningStrategy::EqualWidth
        );
        assert_eq!(
            "Quantile".parse::<BinningStrategy>().unwrap(),
            BinningStrategy::EqualFrequency
        );
        assert!("cart".parse::<BinningStrategy>().is_err());
    }

    #[test]
    fn test_bin_range_display() {
        let range = BinRange::Interval {
            lower: 1.0,
            upper: 2.5,
        };
        assert_eq!(range.to_string(), "[1.0000, 2.5000]");
        let cat = BinRange::Category {
            value: "NA".to_string(),
        };
        assert_eq!(cat.to_string(), "NA");
    }
}
