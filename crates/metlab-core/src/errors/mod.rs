//! Error taxonomy: one enum per subsystem, aggregated into [`MetlabError`].

mod backend_error;
mod builder_error;
mod catalog_error;
mod config_error;
pub mod error_code;
mod export_error;
mod session_error;

pub use backend_error::BackendError;
pub use builder_error::{BuilderError, GENERATION_FAILED_MESSAGE};
pub use catalog_error::CatalogError;
pub use config_error::ConfigError;
pub use error_code::MetlabErrorCode;
pub use export_error::ExportError;
pub use session_error::SessionError;

/// Top-level error for everything metlab does.
#[derive(Debug, thiserror::Error)]
pub enum MetlabError {
    #[error(transparent)]
    Builder(#[from] BuilderError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MetlabErrorCode for MetlabError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Builder(e) => e.error_code(),
            Self::Session(e) => e.error_code(),
            Self::Catalog(e) => e.error_code(),
            Self::Backend(e) => e.error_code(),
            Self::Export(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Serialization(_) => error_code::SESSION_ERROR,
        }
    }
}

pub type MetlabResult<T> = Result<T, MetlabError>;
