//! AitiaErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a structured code string
/// alongside its human-readable message.
pub trait AitiaErrorCode {
    /// Returns the error code string (e.g., "SCHEMA_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const SCHEMA_ERROR: &str = "SCHEMA_ERROR";
pub const UNKNOWN_LABEL: &str = "UNKNOWN_LABEL";
pub const INVALID_WINDOW: &str = "INVALID_WINDOW";
pub const SELF_CAUSE: &str = "SELF_CAUSE";
pub const EXPORT_ERROR: &str = "EXPORT_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
