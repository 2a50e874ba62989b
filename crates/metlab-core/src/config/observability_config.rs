use serde::{Deserialize, Serialize};

use super::defaults;

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// `EnvFilter` directive. Layered like every other value: `METLAB_LOG`
    /// beats the files and `--log` beats `METLAB_LOG`.
    pub log_filter: Option<String>,
    /// Emit JSON lines instead of human-readable output. Default: true.
    pub json: Option<bool>,
}

impl ObservabilityConfig {
    pub fn effective_log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(defaults::DEFAULT_LOG_FILTER)
    }

    pub fn effective_json(&self) -> bool {
        self.json.unwrap_or(defaults::DEFAULT_LOG_JSON)
    }
}
