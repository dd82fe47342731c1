//! Top-level Aitia configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ExportConfig, InferenceConfig, IngestConfig};
use crate::constants::{PROJECT_CONFIG_FILE, USER_CONFIG_DIR};
use crate::errors::ConfigError;
use crate::types::OverlapRule;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Programmatic overrides (applied via `apply_overrides`)
/// 2. Environment variables (`AITIA_*`)
/// 3. Project config (`aitia.toml` in project root)
/// 4. User config (`~/.aitia/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AitiaConfig {
    pub ingest: IngestConfig,
    pub inference: InferenceConfig,
    pub export: ExportConfig,
}

/// Override values supplied by the embedding application.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub overlap_rule: Option<OverlapRule>,
    pub parallel: Option<bool>,
    pub window: Option<(f64, f64)>,
    pub undefined_marker: Option<String>,
}

impl AitiaConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(ConfigError::ParseError { .. }) => {
                        return Err(ConfigError::ParseError {
                            path: user_config_path.display().to_string(),
                            message: "invalid TOML in user config".to_string(),
                        });
                    }
                    Err(e) => {
                        ::tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config)?;

        // Layer 1 (highest priority): overrides
        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &AitiaConfig) -> Result<(), ConfigError> {
        for (field, delimiter) in [
            ("ingest.delimiter", &config.ingest.delimiter),
            ("export.delimiter", &config.export.delimiter),
        ] {
            if let Some(d) = delimiter {
                if d.chars().count() != 1 || d == "\"" || d == "\n" {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: "must be a single character other than a quote or newline"
                            .to_string(),
                    });
                }
            }
        }

        match (config.inference.window_start, config.inference.window_end) {
            (Some(start), Some(end)) => {
                if !start.is_finite() || !end.is_finite() || start > end {
                    return Err(ConfigError::ValidationFailed {
                        field: "inference.window_start".to_string(),
                        message: "window bounds must be finite with start <= end".to_string(),
                    });
                }
            }
            (None, None) => {}
            _ => {
                return Err(ConfigError::ValidationFailed {
                    field: "inference.window_start".to_string(),
                    message: "window_start and window_end must be set together".to_string(),
                });
            }
        }

        if let Some(ref marker) = config.export.undefined_marker {
            if marker.parse::<f64>().is_ok() {
                return Err(ConfigError::ValidationFailed {
                    field: "export.undefined_marker".to_string(),
                    message: "must not parse as a number".to_string(),
                });
            }
            if marker.contains(config.export.effective_delimiter()) {
                return Err(ConfigError::ValidationFailed {
                    field: "export.undefined_marker".to_string(),
                    message: "must not contain the delimiter".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.aitia/config.toml`.
    fn user_config_path() -> Option<std::path::PathBuf> {
        home_dir().map(|h| h.join(USER_CONFIG_DIR).join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut AitiaConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: AitiaConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut AitiaConfig, other: &AitiaConfig) {
        // Ingest
        if other.ingest.delimiter.is_some() {
            base.ingest.delimiter = other.ingest.delimiter.clone();
        }
        if other.ingest.has_header.is_some() {
            base.ingest.has_header = other.ingest.has_header;
        }

        // Inference
        if other.inference.overlap_rule.is_some() {
            base.inference.overlap_rule = other.inference.overlap_rule;
        }
        if other.inference.parallel.is_some() {
            base.inference.parallel = other.inference.parallel;
        }
        if other.inference.window_start.is_some() || other.inference.window_end.is_some() {
            base.inference.window_start = other.inference.window_start;
            base.inference.window_end = other.inference.window_end;
        }

        // Export
        if other.export.undefined_marker.is_some() {
            base.export.undefined_marker = other.export.undefined_marker.clone();
        }
        if other.export.delimiter.is_some() {
            base.export.delimiter = other.export.delimiter.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `AITIA_OVERLAP_RULE`, `AITIA_WINDOW_START`, etc.
    fn apply_env_overrides(config: &mut AitiaConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("AITIA_OVERLAP_RULE") {
            config.inference.overlap_rule =
                Some(OverlapRule::from_str_name(&val).ok_or_else(|| {
                    ConfigError::InvalidValue {
                        field: "AITIA_OVERLAP_RULE".to_string(),
                        message: format!("unknown overlap rule `{val}`"),
                    }
                })?);
        }
        if let Ok(val) = std::env::var("AITIA_PARALLEL") {
            if let Ok(v) = val.parse::<bool>() {
                config.inference.parallel = Some(v);
            }
        }
        if let Ok(val) = std::env::var("AITIA_WINDOW_START") {
            if let Ok(v) = val.parse::<f64>() {
                config.inference.window_start = Some(v);
            }
        }
        if let Ok(val) = std::env::var("AITIA_WINDOW_END") {
            if let Ok(v) = val.parse::<f64>() {
                config.inference.window_end = Some(v);
            }
        }
        if let Ok(val) = std::env::var("AITIA_DELIMITER") {
            config.ingest.delimiter = Some(val.clone());
            config.export.delimiter = Some(val);
        }
        if let Ok(val) = std::env::var("AITIA_UNDEFINED_MARKER") {
            config.export.undefined_marker = Some(val);
        }
        Ok(())
    }

    /// Apply programmatic overrides (highest priority).
    pub fn apply_overrides(config: &mut AitiaConfig, overrides: &ConfigOverrides) {
        if let Some(rule) = overrides.overlap_rule {
            config.inference.overlap_rule = Some(rule);
        }
        if let Some(parallel) = overrides.parallel {
            config.inference.parallel = Some(parallel);
        }
        if let Some((start, end)) = overrides.window {
            config.inference.window_start = Some(start);
            config.inference.window_end = Some(end);
        }
        if let Some(ref marker) = overrides.undefined_marker {
            config.export.undefined_marker = Some(marker.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
