//! Terminal rendering of a dataset profile

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use polars::prelude::*;
use std::time::Duration;

use crate::pipeline::{
    display_name, ColumnKind, CorrelationMatrix, DatasetShape, HistogramSummary,
    RelationshipFinding, Sign,
};
use crate::utils::print_indented;

/// Width of the widest histogram bar
const BAR_WIDTH: usize = 30;

/// Summary of one profiling run
#[derive(Debug, Default)]
pub struct ProfileSummary {
    pub initial_columns: usize,
    pub final_columns: usize,
    pub rows: usize,
    /// Index artifact columns removed during cleaning
    pub dropped_columns: Vec<String>,
    /// Columns that had at least one missing cell before cleaning
    pub imputed_columns: Vec<String>,
    pub numeric_columns: usize,
    pub findings: usize,
    pub load_time: Duration,
    /// Cleaning, histogram and correlation in one `profile_dataset` call
    pub profile_time: Duration,
    pub report_time: Duration,
}

impl ProfileSummary {
    pub fn new(initial_columns: usize, rows: usize) -> Self {
        Self {
            initial_columns,
            final_columns: initial_columns,
            rows,
            ..Default::default()
        }
    }

    pub fn set_dropped_columns(&mut self, columns: Vec<String>) {
        self.final_columns = self.initial_columns.saturating_sub(columns.len());
        self.dropped_columns = columns;
    }

    pub fn set_imputed_columns(&mut self, columns: Vec<String>) {
        self.imputed_columns = columns;
    }

    pub fn set_load_time(&mut self, elapsed: Duration) {
        self.load_time = elapsed;
    }

    pub fn set_profile_time(&mut self, elapsed: Duration) {
        self.profile_time = elapsed;
    }

    /// Accumulates, since every rendering step reports its own time
    pub fn add_report_time(&mut self, elapsed: Duration) {
        self.report_time += elapsed;
    }

    pub fn total_time(&self) -> Duration {
        self.load_time + self.profile_time + self.report_time
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("📁 Rows"), Cell::new(self.rows)]);
        table.add_row(vec![
            Cell::new("📁 Initial Columns"),
            Cell::new(self.initial_columns),
        ]);
        table.add_row(vec![
            Cell::new("🗑️  Dropped (Index Artifacts)"),
            Cell::new(self.dropped_columns.len()).fg(if self.dropped_columns.is_empty() {
                Color::White
            } else {
                Color::Red
            }),
        ]);
        table.add_row(vec![
            Cell::new("🩹 Imputed Columns"),
            Cell::new(self.imputed_columns.len()).fg(if self.imputed_columns.is_empty() {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);
        table.add_row(vec![
            Cell::new("🔢 Numeric Columns"),
            Cell::new(self.numeric_columns),
        ]);
        table.add_row(vec![
            Cell::new("🔗 Relationships"),
            Cell::new(self.findings)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("⏱️  Total Time"),
            Cell::new(format!("{:.2}s", self.total_time().as_secs_f64())),
        ]);

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("PROFILE SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        print_indented(&self.to_table().to_string());

        if !self.dropped_columns.is_empty() {
            println!();
            println!(
                "      {} {}:",
                style("Index Artifacts").yellow(),
                style(format!("({})", self.dropped_columns.len())).dim()
            );
            for column in &self.dropped_columns {
                println!("        {} {}", style("•").dim(), column);
            }
        }
    }
}

/// "This dataset has N rows and M columns."
pub fn shape_sentence(shape: &DatasetShape) -> String {
    format!(
        "This dataset has {} rows and {} columns.",
        shape.row_count, shape.column_count
    )
}

/// Comma-separated display names of all columns
pub fn column_list(kinds: &[(String, ColumnKind)]) -> String {
    kinds
        .iter()
        .map(|(name, _)| display_name(name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Column name and kind per row
pub fn column_kinds_table(kinds: &[(String, ColumnKind)]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Kind").add_attribute(Attribute::Bold),
    ]);

    for (name, kind) in kinds {
        let color = match kind {
            ColumnKind::Numeric => Color::Cyan,
            ColumnKind::Textual => Color::Magenta,
        };
        table.add_row(vec![Cell::new(name), Cell::new(kind).fg(color)]);
    }

    table
}

/// First `rows` rows of a dataset, values rendered as text
pub fn preview_table(df: &DataFrame, rows: usize) -> Table {
    let head = df.head(Some(rows));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        head.get_column_names()
            .iter()
            .map(|name| Cell::new(name.as_str()).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );

    // Indexed access works across chunk boundaries
    for row_idx in 0..head.height() {
        table.add_row(
            head.get_columns()
                .iter()
                .map(|col| {
                    let value = col
                        .get(row_idx)
                        .map(|v| v.str_value().to_string())
                        .unwrap_or_default();
                    Cell::new(value)
                })
                .collect::<Vec<_>>(),
        );
    }

    table
}

/// Bins with counts and a proportional bar
pub fn histogram_table(summary: &HistogramSummary) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Range").add_attribute(Attribute::Bold),
        Cell::new("Count").add_attribute(Attribute::Bold),
        Cell::new("").add_attribute(Attribute::Bold),
    ]);

    let max_count = summary.bins.iter().map(|b| b.count).max().unwrap_or(0);
    for bin in &summary.bins {
        let width = if max_count == 0 {
            0
        } else {
            (bin.count * BAR_WIDTH).div_ceil(max_count)
        };
        table.add_row(vec![
            Cell::new(bin.range.to_string()),
            Cell::new(bin.count),
            Cell::new("█".repeat(width)).fg(Color::Cyan),
        ]);
    }

    table
}

/// Five-number summary as a single-row table, if the column has one
pub fn five_number_table(summary: &HistogramSummary) -> Option<Table> {
    let five = summary.five_number?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        ["Min", "Q1", "Median", "Q3", "Max"]
            .iter()
            .map(|h| Cell::new(*h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table.add_row(
        [five.min, five.q1, five.median, five.q3, five.max]
            .iter()
            .map(|v| Cell::new(format!("{:.4}", v)))
            .collect::<Vec<_>>(),
    );

    Some(table)
}

/// Full correlation matrix with strong coefficients highlighted
pub fn correlation_table(matrix: &CorrelationMatrix, threshold: f64) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);

    let mut header = vec![Cell::new("")];
    header.extend(
        matrix
            .columns()
            .iter()
            .map(|c| Cell::new(c).add_attribute(Attribute::Bold)),
    );
    table.set_header(header);

    for (i, name) in matrix.columns().iter().enumerate() {
        let mut row = vec![Cell::new(name).add_attribute(Attribute::Bold)];
        row.extend(matrix.row(i).iter().enumerate().map(|(j, &r)| {
            let cell = Cell::new(format!("{:.3}", r));
            if i == j {
                cell.fg(Color::DarkGrey)
            } else if r > threshold {
                cell.fg(Color::Green)
            } else if r < -threshold {
                cell.fg(Color::Red)
            } else {
                cell
            }
        }));
        table.add_row(row);
    }

    table
}

/// Print one styled callout per finding
pub fn display_findings(findings: &[RelationshipFinding]) {
    for finding in findings {
        let sign = match finding.sign {
            Sign::Positive => style(finding.sign.to_string()).green().bold(),
            Sign::Negative => style(finding.sign.to_string()).red().bold(),
        };
        println!(
            "      {} {} is {} correlated with {} {}",
            style("•").dim(),
            style(display_name(&finding.target)).color256(214).bold(),
            sign,
            style(display_name(&finding.source)).cyan().bold(),
            style(format!("(r = {:.3})", finding.coefficient)).dim()
        );
    }
}
