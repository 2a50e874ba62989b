//! Tracing setup: structured logging with span definitions and event types.

pub mod events;
pub mod spans;

use metlab_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Filter from the resolved config directive, or `info` when it does not
/// parse. `METLAB_LOG` and `--log` reach it through config layering.
pub fn build_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_new(config.effective_log_filter()).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. JSON lines unless the config turns them
/// off. Returns `false` when a subscriber was already installed.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter = build_filter(config);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if config.effective_json() {
        builder
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
            .is_ok()
    } else {
        builder.compact().try_init().is_ok()
    }
}

/// Installs a JSON subscriber with an explicit filter (tests, embedding).
pub fn init_tracing_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .with_writer(std::io::stderr)
        .json()
        .try_init()
        .is_ok()
}
