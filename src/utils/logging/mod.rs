//! Logging setup
//!
//! Installs the global `tracing` subscriber. `RUST_LOG` wins over the
//! configured level when set.

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Build the filter from `RUST_LOG`, falling back to `level`
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Returns false when one was already set.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.level))
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    if config.is_json() {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}
