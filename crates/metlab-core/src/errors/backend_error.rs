use super::error_code::{self, MetlabErrorCode};

/// Failures talking to the managed backend (table API or object storage).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("network error: {reason}")]
    Network { reason: String },

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("response could not be decoded: {reason}")]
    Decode { reason: String },

    #[error("backend not configured: {what}")]
    NotConfigured { what: String },

    #[error("{operation} on {target} rejected: {message}")]
    Rejected {
        operation: String,
        target: String,
        message: String,
    },
}

impl MetlabErrorCode for BackendError {
    fn error_code(&self) -> &'static str {
        error_code::BACKEND_ERROR
    }
}
