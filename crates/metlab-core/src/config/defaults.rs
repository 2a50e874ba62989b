//! Single source of default configuration values.

pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BACKEND_MAX_RETRIES: u32 = 0;
pub const DEFAULT_BACKEND_BACKOFF_MS: u64 = 500;

pub const DEFAULT_SESSION_CAPACITY: usize = 1024;
pub const DEFAULT_SURFACE_FINISH: &str = "Standard";

pub const DEFAULT_REVIEW_RECIPIENT: &str = "sales@metallographic.com";
pub const DEFAULT_SITE_LABEL: &str = "metallography.org";
pub const DEFAULT_PDF_FILE_PREFIX: &str = "lab-builder-recommendations";
pub const DEFAULT_ETCHANT_SELECTOR_PATH: &str = "/tools/etchant-selector";
pub const DEFAULT_ETCHANT_DATABASE_PATH: &str = "/etchants";

pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_LOG_JSON: bool = true;

/// Environment variable read for the log filter.
pub const LOG_ENV_VAR: &str = "METLAB_LOG";
