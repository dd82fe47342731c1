//! Pipeline errors and non-fatal error collection.

use super::error_code::AitiaErrorCode;
use super::{ConfigError, ExportError, HypothesisError, SchemaError};

/// Errors that can surface from any stage of an analysis run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Hypothesis error: {0}")]
    Hypothesis(#[from] HypothesisError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AitiaErrorCode for InferenceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Schema(e) => e.error_code(),
            Self::Hypothesis(e) => e.error_code(),
            Self::Export(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Result of a stage that accumulates non-fatal errors.
/// Skipped hypotheses land in `errors`; everything else lands in `data`.
#[derive(Debug, Default)]
pub struct PipelineResult<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal errors collected during the run.
    pub errors: Vec<InferenceError>,
}

impl<T: Default> PipelineResult<T> {
    /// Create a new pipeline result with no errors.
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    /// Add a non-fatal error to the result.
    pub fn add_error(&mut self, error: impl Into<InferenceError>) {
        self.errors.push(error.into());
    }

    /// Returns true if there are no non-fatal errors.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of non-fatal errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
