//! Hypothesis errors. Fatal for the hypothesis they concern, never for the batch.

use super::error_code::{self, AitiaErrorCode};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HypothesisError {
    #[error("label `{label}` is not in the observation alphabet")]
    UnknownLabel { label: String },

    #[error("invalid window ({start}, {end}): start must not exceed end and both must be finite")]
    InvalidWindow { start: f64, end: f64 },

    #[error("label `{label}` cannot be its own cause")]
    SelfCause { label: String },
}

impl AitiaErrorCode for HypothesisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownLabel { .. } => error_code::UNKNOWN_LABEL,
            Self::InvalidWindow { .. } => error_code::INVALID_WINDOW,
            Self::SelfCause { .. } => error_code::SELF_CAUSE,
        }
    }
}
