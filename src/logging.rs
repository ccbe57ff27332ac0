//! Diagnostic logging setup.
//!
//! Logs go to stderr so replay output on stdout stays clean. Filter
//! precedence: `RUST_LOG`, then `-v` flags, then the config file level.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Filter directive for the given verbosity and configured level.
pub fn filter_directive(verbose: u8, config: &LoggingConfig) -> String {
    match verbose {
        0 => config.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global subscriber. Safe to call more than once; later
/// calls are no-ops.
pub fn init(verbose: u8, config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose, config)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
