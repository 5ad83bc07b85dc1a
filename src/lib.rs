//! Tabscope: Tabular Profiling Library
//!
//! Type-aware cleaning, shape and distribution summaries, and
//! correlation-based relationship discovery over polars DataFrames.

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use error::{ProfileError, ProfileResult};
