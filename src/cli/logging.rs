//! Diagnostic logging setup.
//!
//! Logs go to stderr so stdout stays reserved for the report.

use tracing_subscriber::EnvFilter;

/// Filter used when neither `--log-level` nor `FWCHECK_LOG` is given.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Pick the effective filter directive.
pub fn log_filter(level: Option<&str>, verbose: bool) -> String {
    match level {
        Some(level) if !level.trim().is_empty() => level.trim().to_string(),
        _ if verbose => "debug".to_string(),
        _ => DEFAULT_LOG_FILTER.to_string(),
    }
}

/// Install the stderr subscriber.
///
/// Uses `try_init`, so calling it more than once is harmless; an invalid
/// filter falls back to the default.
pub fn init_logging(level: Option<&str>, verbose: bool) {
    let directive = log_filter(level, verbose);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
