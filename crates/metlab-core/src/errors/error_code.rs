//! Stable error codes for surfacing failures outside the library.

/// Every metlab error enum implements this so callers (CLI, UI bindings)
/// can branch on a stable code instead of message text.
pub trait MetlabErrorCode {
    /// Returns the error code string (e.g., "BACKEND_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const BUILDER_ERROR: &str = "BUILDER_ERROR";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const GENERATION_FAILED: &str = "GENERATION_FAILED";
pub const SESSION_ERROR: &str = "SESSION_ERROR";
pub const CATALOG_ERROR: &str = "CATALOG_ERROR";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const ROLLBACK_FAILED: &str = "ROLLBACK_FAILED";
pub const BROCHURE_REJECTED: &str = "BROCHURE_REJECTED";
pub const BACKEND_ERROR: &str = "BACKEND_ERROR";
pub const EXPORT_ERROR: &str = "EXPORT_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
