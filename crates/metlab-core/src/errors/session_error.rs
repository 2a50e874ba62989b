use super::error_code::{self, MetlabErrorCode};

/// Wizard session snapshot errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("snapshot version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("snapshot could not be decoded: {reason}")]
    Corrupt { reason: String },

    #[error("no saved session: {session_id}")]
    NotFound { session_id: String },
}

impl MetlabErrorCode for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::NOT_FOUND,
            _ => error_code::SESSION_ERROR,
        }
    }
}
