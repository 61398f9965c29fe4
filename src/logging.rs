//! Tracing setup for the `recall` binary.

use tracing_subscriber::EnvFilter;

/// Environment variable consulted before any configured level
pub const LOG_ENV: &str = "RECALL_LOG";

/// Builds the filter: `RECALL_LOG` wins, then `fallback`, then `info`
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs a stderr subscriber; stdout is reserved for protocol replies.
pub fn init_tracing(fallback: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(fallback))
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

