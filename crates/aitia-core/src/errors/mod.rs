//! Error handling for Aitia.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod export_error;
pub mod hypothesis_error;
pub mod pipeline_error;
pub mod schema_error;

pub use config_error::ConfigError;
pub use error_code::AitiaErrorCode;
pub use export_error::ExportError;
pub use hypothesis_error::HypothesisError;
pub use pipeline_error::{InferenceError, PipelineResult};
pub use schema_error::SchemaError;
