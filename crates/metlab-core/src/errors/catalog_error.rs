use super::error_code::{self, MetlabErrorCode};
use super::BackendError;

/// Equipment catalog and brochure errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("equipment not found: {key}")]
    NotFound { key: String },

    #[error("Failed to create {table}: {reason}")]
    SideRecordCreate { table: String, reason: String },

    #[error("Failed to update {table}: {reason}")]
    SideRecordUpdate { table: String, reason: String },

    #[error(
        "Failed to create {table}: {reason}; cleanup of equipment {equipment_id} also failed: {cleanup_reason}"
    )]
    RollbackFailed {
        table: String,
        equipment_id: String,
        reason: String,
        cleanup_reason: String,
    },

    #[error("Please select a PDF file (got {content_type})")]
    BrochureNotPdf { content_type: String },

    #[error("Brochure size must be less than 50MB ({size} bytes)")]
    BrochureTooLarge { size: u64, limit: u64 },

    #[error("Invalid brochure URL: {url}")]
    InvalidBrochureUrl { url: String },

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl MetlabErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => error_code::VALIDATION_ERROR,
            Self::NotFound { .. } => error_code::NOT_FOUND,
            Self::RollbackFailed { .. } => error_code::ROLLBACK_FAILED,
            Self::BrochureNotPdf { .. }
            | Self::BrochureTooLarge { .. }
            | Self::InvalidBrochureUrl { .. } => error_code::BROCHURE_REJECTED,
            Self::Backend(_) => error_code::BACKEND_ERROR,
            Self::SideRecordCreate { .. } | Self::SideRecordUpdate { .. } => {
                error_code::CATALOG_ERROR
            }
        }
    }
}
