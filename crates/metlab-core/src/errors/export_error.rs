use super::error_code::{self, MetlabErrorCode};

/// Rendering and export errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("Please fill in {field}.")]
    MissingContact { field: &'static str },

    #[error("nothing to export: no recommendations")]
    Empty,

    #[error("PDF generation failed: {reason}")]
    Pdf { reason: String },

    #[error("cannot write {path}: {reason}")]
    Io { path: String, reason: String },
}

impl MetlabErrorCode for ExportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingContact { .. } => error_code::VALIDATION_ERROR,
            _ => error_code::EXPORT_ERROR,
        }
    }
}
