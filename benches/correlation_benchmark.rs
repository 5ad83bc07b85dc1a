//! Benchmark comparing Pairwise vs Matrix-based correlation computation
//!
//! Run with: cargo bench --bench correlation_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polars::prelude::*;
use rand::prelude::*;
use rand::SeedableRng;

use tabscope::pipeline::{
    clean, correlate_with_method, top_relationships, CorrelationMethod,
    DEFAULT_RELATIONSHIP_THRESHOLD,
};

/// Generate synthetic data with controlled characteristics
fn generate_test_dataframe(n_rows: usize, n_features: usize, seed: u64) -> DataFrame {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(n_features);

    for i in 0..n_features {
        let values: Vec<f64> = match i % 3 {
            0 => (0..n_rows).map(|_| rng.gen::<f64>() * 100.0).collect(),
            1 => (0..n_rows)
                .map(|_| {
                    let v = rng.gen::<f64>();
                    (v * v * v) * 100.0
                })
                .collect(),
            _ => {
                // Noisy copy of the previous column, so some rows report findings
                columns[i - 1]
                    .iter()
                    .map(|v| v + rng.gen::<f64>() * 10.0 - 5.0)
                    .collect()
            }
        };
        columns.push(values);
    }

    let columns: Vec<Column> = columns
        .into_iter()
        .enumerate()
        .map(|(i, values)| Column::new(format!("feature_{}", i).into(), values))
        .collect();

    DataFrame::new(columns).expect("Failed to create DataFrame")
}

/// Punch nulls into every column so cleaning has work to do
fn with_missing_values(df: &DataFrame, every: usize) -> DataFrame {
    let columns: Vec<Column> = df
        .get_columns()
        .iter()
        .map(|col| {
            let values: Vec<Option<f64>> = col
                .f64()
                .expect("numeric column")
                .into_iter()
                .enumerate()
                .map(|(row, v)| if row % every == 0 { None } else { v })
                .collect();
            Column::new(col.name().clone(), values)
        })
        .collect();

    DataFrame::new(columns).expect("Failed to create DataFrame")
}

/// Benchmark pairwise vs matrix correlation for varying column counts
fn benchmark_correlation_by_columns(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation_by_columns");
    group.sample_size(30);

    let n_rows = 10_000;
    let column_counts = [5, 10, 25, 50, 100];

    for n_cols in column_counts {
        let df = generate_test_dataframe(n_rows, n_cols, 42);

        group.throughput(Throughput::Elements(((n_cols * (n_cols - 1)) / 2) as u64));

        for (label, method) in [
            ("pairwise", CorrelationMethod::Pairwise),
            ("matrix", CorrelationMethod::Matrix),
        ] {
            group.bench_with_input(BenchmarkId::new(label, n_cols), &df, |b, df| {
                b.iter(|| {
                    let _ = correlate_with_method(black_box(df), black_box(method));
                });
            });
        }
    }

    group.finish();
}

/// Benchmark pairwise vs matrix correlation for varying row counts
fn benchmark_correlation_by_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation_by_rows");
    group.sample_size(20);

    let n_cols = 20;
    let row_counts = [1_000, 10_000, 50_000, 100_000];

    for n_rows in row_counts {
        let df = generate_test_dataframe(n_rows, n_cols, 42);

        group.throughput(Throughput::Elements(n_rows as u64));

        for (label, method) in [
            ("pairwise", CorrelationMethod::Pairwise),
            ("matrix", CorrelationMethod::Matrix),
        ] {
            group.bench_with_input(BenchmarkId::new(label, n_rows), &df, |b, df| {
                b.iter(|| {
                    let _ = correlate_with_method(black_box(df), black_box(method));
                });
            });
        }
    }

    group.finish();
}

/// Clean, correlate and extract findings in one pass
fn benchmark_profile_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean_and_correlate");
    group.sample_size(10);

    let scenarios = [("small_dataset", 5_000, 10), ("medium_dataset", 50_000, 30)];

    for (name, n_rows, n_cols) in scenarios {
        let df = with_missing_values(&generate_test_dataframe(n_rows, n_cols, 7), 17);

        group.bench_with_input(BenchmarkId::new("auto", name), &df, |b, df| {
            b.iter(|| {
                let cleaned = clean(black_box(df)).expect("clean");
                let matrix = correlate_with_method(&cleaned, CorrelationMethod::Auto)
                    .expect("correlate");
                top_relationships(&matrix, DEFAULT_RELATIONSHIP_THRESHOLD)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_correlation_by_columns,
    benchmark_correlation_by_rows,
    benchmark_profile_pipeline,
);
criterion_main!(benches);
