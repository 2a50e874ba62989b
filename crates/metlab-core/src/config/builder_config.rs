//! Lab builder configuration.

use serde::{Deserialize, Serialize};

use super::defaults;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BuilderConfig {
    /// Maximum sessions kept by the in-process session manager. Default: 1024.
    pub session_capacity: Option<usize>,
    /// Site path of the etchant selector tool linked from etching advice.
    pub etchant_selector_path: Option<String>,
    /// Site path of the etchant database linked from etching advice.
    pub etchant_database_path: Option<String>,
}

impl BuilderConfig {
    pub fn effective_session_capacity(&self) -> usize {
        self.session_capacity.unwrap_or(defaults::DEFAULT_SESSION_CAPACITY)
    }

    pub fn effective_etchant_selector_path(&self) -> &str {
        self.etchant_selector_path
            .as_deref()
            .unwrap_or(defaults::DEFAULT_ETCHANT_SELECTOR_PATH)
    }

    pub fn effective_etchant_database_path(&self) -> &str {
        self.etchant_database_path
            .as_deref()
            .unwrap_or(defaults::DEFAULT_ETCHANT_DATABASE_PATH)
    }
}
