//! CLI module - argument parsing and logging setup

mod args;
mod logging;

pub use args::Cli;
pub use logging::init_logging;
