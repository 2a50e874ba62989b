//! Top-level metlab configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{defaults, BackendConfig, BuilderConfig, ExportConfig, ObservabilityConfig};
use crate::errors::ConfigError;

/// Project config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "metlab.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`METLAB_*`)
/// 3. Project config (`metlab.toml` in the project root)
/// 4. User config (`~/.metlab/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MetlabConfig {
    pub backend: BackendConfig,
    pub builder: BuilderConfig,
    pub export: ExportConfig,
    pub observability: ObservabilityConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub backend_url: Option<String>,
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    pub review_recipient: Option<String>,
    pub log_filter: Option<String>,
}

impl MetlabConfig {
    /// Load configuration with layered resolution from the process
    /// environment and the user's home directory.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        Self::load_with(
            root,
            user_config_path().as_deref(),
            |key| std::env::var(key).ok(),
            cli_overrides,
        )
    }

    /// Same as [`MetlabConfig::load`] with the user config location and the
    /// environment supplied by the caller.
    pub fn load_with<F>(
        root: &Path,
        user_config: Option<&Path>,
        env: F,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // User config: unreadable files are skipped, bad TOML is fatal.
        if let Some(path) = user_config {
            if path.exists() {
                match Self::merge_toml_file(&mut config, path) {
                    Ok(()) | Err(ConfigError::FileNotFound { .. }) => {}
                    Err(e) => return Err(e),
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config, env);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialize>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &MetlabConfig) -> Result<(), ConfigError> {
        if let Some(url) = config.backend.url.as_deref() {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::ValidationFailed {
                    field: "backend.url".to_string(),
                    message: "must start with http:// or https://".to_string(),
                });
            }
        }
        if config.backend.timeout_secs == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "backend.timeout_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(retries) = config.backend.max_retries {
            if retries > 10 {
                return Err(ConfigError::ValidationFailed {
                    field: "backend.max_retries".to_string(),
                    message: "must be at most 10".to_string(),
                });
            }
        }
        if config.builder.session_capacity == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "builder.session_capacity".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(recipient) = config.export.review_recipient.as_deref() {
            if !recipient.contains('@') {
                return Err(ConfigError::ValidationFailed {
                    field: "export.review_recipient".to_string(),
                    message: "must be an email address".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut MetlabConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: MetlabConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, file_config);
        Ok(())
    }

    /// Values set in `other` replace those in `base`.
    fn merge(base: &mut MetlabConfig, other: MetlabConfig) {
        let MetlabConfig {
            backend,
            builder,
            export,
            observability,
        } = other;

        // Backend
        override_opt(&mut base.backend.url, backend.url);
        override_opt(&mut base.backend.api_key, backend.api_key);
        override_opt(&mut base.backend.access_token, backend.access_token);
        override_opt(&mut base.backend.timeout_secs, backend.timeout_secs);
        override_opt(&mut base.backend.max_retries, backend.max_retries);
        override_opt(&mut base.backend.backoff_ms, backend.backoff_ms);

        // Builder
        override_opt(&mut base.builder.session_capacity, builder.session_capacity);
        override_opt(
            &mut base.builder.etchant_selector_path,
            builder.etchant_selector_path,
        );
        override_opt(
            &mut base.builder.etchant_database_path,
            builder.etchant_database_path,
        );

        // Export
        override_opt(&mut base.export.review_recipient, export.review_recipient);
        override_opt(&mut base.export.site_label, export.site_label);
        override_opt(&mut base.export.pdf_file_prefix, export.pdf_file_prefix);

        // Observability
        override_opt(&mut base.observability.log_filter, observability.log_filter);
        override_opt(&mut base.observability.json, observability.json);
    }

    /// Apply environment variable overrides.
    /// Pattern: `METLAB_BACKEND_URL`, `METLAB_EXPORT_REVIEW_RECIPIENT`, etc.
    /// The log filter comes from `METLAB_LOG`.
    /// Unparseable numeric values are ignored.
    fn apply_env_overrides<F>(config: &mut MetlabConfig, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = env("METLAB_BACKEND_URL") {
            config.backend.url = Some(val);
        }
        if let Some(val) = env("METLAB_BACKEND_API_KEY") {
            config.backend.api_key = Some(val);
        }
        if let Some(val) = env("METLAB_BACKEND_ACCESS_TOKEN") {
            config.backend.access_token = Some(val);
        }
        if let Some(v) = env("METLAB_BACKEND_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            config.backend.timeout_secs = Some(v);
        }
        if let Some(v) = env("METLAB_BACKEND_MAX_RETRIES").and_then(|s| s.parse().ok()) {
            config.backend.max_retries = Some(v);
        }
        if let Some(v) = env("METLAB_BUILDER_SESSION_CAPACITY").and_then(|s| s.parse().ok()) {
            config.builder.session_capacity = Some(v);
        }
        if let Some(val) = env("METLAB_EXPORT_REVIEW_RECIPIENT") {
            config.export.review_recipient = Some(val);
        }
        if let Some(val) = env(defaults::LOG_ENV_VAR) {
            config.observability.log_filter = Some(val);
        }
        if let Some(v) = env("METLAB_LOG_JSON").and_then(|s| s.parse().ok()) {
            config.observability.json = Some(v);
        }
    }

    /// Apply CLI flag overrides (highest priority).
    pub fn apply_cli_overrides(config: &mut MetlabConfig, cli: &CliOverrides) {
        override_opt(&mut config.backend.url, cli.backend_url.clone());
        override_opt(&mut config.backend.api_key, cli.api_key.clone());
        override_opt(&mut config.backend.access_token, cli.access_token.clone());
        override_opt(&mut config.export.review_recipient, cli.review_recipient.clone());
        override_opt(&mut config.observability.log_filter, cli.log_filter.clone());
    }
}

fn override_opt<T>(base: &mut Option<T>, other: Option<T>) {
    if other.is_some() {
        *base = other;
    }
}

/// Returns the user config path: `~/.metlab/config.toml`.
pub fn user_config_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".metlab").join("config.toml"))
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
