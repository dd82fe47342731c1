//! Configuration system for Aitia.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod aitia_config;
pub mod export_config;
pub mod inference_config;
pub mod ingest_config;

pub use aitia_config::{AitiaConfig, ConfigOverrides};
pub use export_config::ExportConfig;
pub use inference_config::InferenceConfig;
pub use ingest_config::IngestConfig;
