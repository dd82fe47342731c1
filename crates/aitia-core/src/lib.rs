//! # aitia-core
//!
//! Foundation crate for the Aitia causal discovery engine.
//! Defines observation types, errors, config, progress events, tracing, and constants.
//! The engine crate depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::AitiaConfig;
pub use errors::{InferenceError, PipelineResult};
pub use types::{CaseId, Interval, Observation, OverlapRule, Window};
