//! Tabscope: Tabular Profiling CLI Tool
//!
//! Loads a dataset, cleans it, summarizes a column's distribution and
//! reports the strongest linear relationships between numeric columns.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use tabscope::cli::{init_logging, Cli};
use tabscope::pipeline::{
    describe, display_name, is_index_artifact, load_dataset, profile_dataset, ColumnKind,
};
use tabscope::report::{
    column_kinds_table, column_list, correlation_table, display_findings, export_profile,
    five_number_table, histogram_table, preview_table, shape_sentence, ProfileSummary,
};
use tabscope::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_indented, print_info, print_step_header, print_step_time,
    print_success, print_warning,
};
use tabscope::ProfileError;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let mut config = cli.profile_config();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        &cli.input,
        cli.column.as_deref(),
        cli.export.as_deref(),
        cli.bins,
        cli.relationship_threshold,
    );

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");

    let step_start = Instant::now();
    let spinner = create_spinner("Reading dataset...");
    let raw = load_dataset(&cli.input, cli.infer_schema_length)?;
    finish_with_success(&spinner, "Dataset loaded");

    let raw_shape = describe(&raw);
    let mut summary = ProfileSummary::new(raw_shape.column_count, raw_shape.row_count);
    let load_elapsed = step_start.elapsed();
    summary.set_load_time(load_elapsed);
    print_step_time(load_elapsed);

    // Cleaning keeps column order, so the first cleaned column is the first
    // raw column that is not an index artifact
    if config.histogram_column.is_none() {
        config.histogram_column = raw
            .get_column_names()
            .iter()
            .map(|name| name.as_str())
            .find(|name| !is_index_artifact(name))
            .map(str::to_string);
    }

    // Step 2: Profile
    print_step_header(2, "Profile Dataset");

    let step_start = Instant::now();
    let spinner = create_spinner("Cleaning, summarizing and correlating...");
    let profile = match profile_dataset(&raw, &config) {
        Ok(profile) => profile,
        Err(e) => {
            finish_with_warning(&spinner, "Profiling failed");
            // Only cleaning rejects a dataset this way; show what it rejected
            if matches!(
                e,
                ProfileError::UndefinedStatistic { .. } | ProfileError::UnsupportedInput { .. }
            ) {
                print_warning("Showing the raw, uncleaned dataset");
                print_indented(&preview_table(&raw, cli.preview_rows).to_string());
            }
            return Err(e).context("Failed to profile dataset");
        }
    };
    finish_with_success(&spinner, "Dataset profiled");

    summary.set_dropped_columns(
        raw.get_column_names()
            .iter()
            .filter(|name| is_index_artifact(name.as_str()))
            .map(|name| name.to_string())
            .collect(),
    );
    summary.set_imputed_columns(
        raw.get_columns()
            .iter()
            .filter(|col| col.null_count() > 0 && !is_index_artifact(col.name().as_str()))
            .map(|col| col.name().to_string())
            .collect(),
    );
    summary.numeric_columns = profile
        .column_kinds
        .iter()
        .filter(|(_, kind)| *kind == ColumnKind::Numeric)
        .count();
    summary.findings = profile.findings.len();

    let profile_elapsed = step_start.elapsed();
    summary.set_profile_time(profile_elapsed);
    print_step_time(profile_elapsed);

    // Step 3: Overview
    print_step_header(3, "Dataset Overview");

    let step_start = Instant::now();
    println!();
    println!("    {}", style(shape_sentence(&profile.shape)).white().bold());
    println!(
        "    Columns: {}",
        style(column_list(&profile.column_kinds)).italic().bold()
    );
    println!();
    print_indented(&column_kinds_table(&profile.column_kinds).to_string());
    println!();
    print_indented(&preview_table(&profile.cleaned, cli.preview_rows).to_string());

    let overview_elapsed = step_start.elapsed();
    summary.add_report_time(overview_elapsed);
    print_step_time(overview_elapsed);

    // Step 4: Histogram
    print_step_header(4, "Histogram");

    let step_start = Instant::now();
    match &profile.histogram {
        Some(hist) => {
            println!(
                "      Value to check: {}",
                style(display_name(&hist.column)).cyan().bold()
            );
            print_indented(&histogram_table(hist).to_string());
            if let Some(table) = five_number_table(hist) {
                println!();
                print_indented(&table.to_string());
            }
        }
        None => print_info("Dataset has no columns to summarize"),
    }

    let histogram_elapsed = step_start.elapsed();
    summary.add_report_time(histogram_elapsed);
    print_step_time(histogram_elapsed);

    // Step 5: Correlation
    print_step_header(5, "Correlation Analysis");

    let step_start = Instant::now();
    let correlation = &profile.correlation;
    if !correlation.excluded().is_empty() {
        print_warning(&format!(
            "Excluded column(s) without usable variance: {}",
            correlation.excluded().join(", ")
        ));
    }

    if correlation.is_empty() {
        print_info("Fewer than two numeric columns with variance, nothing to correlate");
    } else {
        print_indented(&correlation_table(correlation, config.relationship_threshold).to_string());
        println!();
        if profile.findings.is_empty() {
            print_info(&format!(
                "No column has a partner with |r| > {:.2}",
                config.relationship_threshold
            ));
        } else {
            display_findings(&profile.findings);
        }
    }

    let correlation_elapsed = step_start.elapsed();
    summary.add_report_time(correlation_elapsed);
    print_step_time(correlation_elapsed);

    // Step 6: Export
    if let Some(export_path) = &cli.export {
        print_step_header(6, "Export Profile");

        export_profile(
            &profile,
            &config,
            &cli.input.display().to_string(),
            export_path,
        )?;
        print_success(&format!("Saved to {}", export_path.display()));
    }

    summary.display();
    print_completion();

    Ok(())
}
