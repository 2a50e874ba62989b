use super::error_code::{self, MetlabErrorCode};

/// Message shown to the end user when generation fails for any reason
/// other than missing input.
pub const GENERATION_FAILED_MESSAGE: &str =
    "There was an error generating recommendations. Please try again.";

/// Lab Builder intake and generation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuilderError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("select at least one process stage")]
    NoStagesSelected,

    #[error("invalid value for {field}: {value:?}")]
    InvalidValue { field: String, value: String },

    #[error("cannot leave step {step}: {reason}")]
    StepBlocked { step: u8, reason: String },

    #[error("{}", GENERATION_FAILED_MESSAGE)]
    GenerationFailed { detail: String },
}

impl BuilderError {
    /// Text suitable for an inline banner next to the wizard controls.
    pub fn user_message(&self) -> String {
        match self {
            Self::GenerationFailed { .. } => GENERATION_FAILED_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl MetlabErrorCode for BuilderError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } | Self::NoStagesSelected | Self::StepBlocked { .. } => {
                error_code::VALIDATION_ERROR
            }
            Self::GenerationFailed { .. } => error_code::GENERATION_FAILED,
            Self::InvalidValue { .. } => error_code::BUILDER_ERROR,
        }
    }
}
