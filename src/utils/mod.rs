//! Terminal helpers shared by the CLI and report rendering

pub mod progress;
pub mod styling;

pub use progress::*;
pub use styling::*;
