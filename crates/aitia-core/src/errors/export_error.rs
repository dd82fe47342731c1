//! Result table errors.

use super::error_code::{self, AitiaErrorCode};

/// Errors raised while writing or re-reading the epsilon result table.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error on result table: {message}")]
    Io { message: String },

    #[error("result table has no header row")]
    MissingHeader,

    #[error("result row {row}: {message}")]
    MalformedRow { row: usize, message: String },
}

impl AitiaErrorCode for ExportError {
    fn error_code(&self) -> &'static str {
        error_code::EXPORT_ERROR
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        Self::Io {
            message: e.to_string(),
        }
    }
}
