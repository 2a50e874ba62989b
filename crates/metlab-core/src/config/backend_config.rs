//! Managed backend (table + storage API) configuration.

use serde::{Deserialize, Serialize};

use super::defaults;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BackendConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`.
    pub url: Option<String>,
    /// Anonymous or service API key sent as `apikey`.
    pub api_key: Option<String>,
    /// Bearer token of a signed-in admin. Falls back to the API key.
    pub access_token: Option<String>,
    /// Request timeout in seconds. Default: 30.
    pub timeout_secs: Option<u64>,
    /// Retries per request. Default: 0.
    pub max_retries: Option<u32>,
    /// Initial backoff between retries in milliseconds. Default: 500.
    pub backoff_ms: Option<u64>,
}

impl BackendConfig {
    pub fn effective_timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(defaults::DEFAULT_BACKEND_TIMEOUT_SECS)
    }

    pub fn effective_max_retries(&self) -> u32 {
        self.max_retries.unwrap_or(defaults::DEFAULT_BACKEND_MAX_RETRIES)
    }

    pub fn effective_backoff_ms(&self) -> u64 {
        self.backoff_ms.unwrap_or(defaults::DEFAULT_BACKEND_BACKOFF_MS)
    }

    /// Token for the `Authorization` header.
    pub fn bearer_token(&self) -> Option<&str> {
        self.access_token.as_deref().or(self.api_key.as_deref())
    }

    pub fn is_configured(&self) -> bool {
        self.url.as_deref().is_some_and(|u| !u.trim().is_empty())
            && self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}
