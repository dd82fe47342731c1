//! Ingestion schema errors. All of them abort ingestion.

use super::error_code::{self, AitiaErrorCode};

/// Errors raised while turning rows into observation records.
/// `row` is the 1-based record position, not counting the header.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("observation table has no header row")]
    MissingHeader,

    #[error("row {row}: expected 3 fields, found {found}")]
    FieldCount { row: usize, found: usize },

    #[error("row {row}: missing required field `{field}`")]
    MissingField { row: usize, field: &'static str },

    #[error("row {row}: timestamp `{value}` is not a finite number")]
    InvalidTimestamp { row: usize, value: String },

    #[error("failed to read observations: {message}")]
    Read { message: String },
}

impl AitiaErrorCode for SchemaError {
    fn error_code(&self) -> &'static str {
        error_code::SCHEMA_ERROR
    }
}
