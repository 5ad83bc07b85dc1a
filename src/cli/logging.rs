//! Tracing subscriber setup for the binary

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Logs go to stderr so stdout stays reserved for the report. `RUST_LOG`
/// overrides `level` when set.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A second init (e.g. from tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
