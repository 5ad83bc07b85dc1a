//! Pipeline module - cleaning, summarization and correlation stages

pub mod cleaner;
pub mod correlation;
pub mod loader;
pub mod profile;
pub mod summarize;
pub mod typer;

pub use cleaner::*;
pub use correlation::*;
pub use loader::*;
pub use profile::*;
pub use summarize::*;
pub use typer::*;
