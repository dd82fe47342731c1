//! Ingestion configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_DELIMITER;

/// Configuration for reading observation tables.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IngestConfig {
    /// Field delimiter, a single character. Default: `,`.
    pub delimiter: Option<String>,
    /// Whether the first row is a header. Default: true.
    pub has_header: Option<bool>,
}

impl IngestConfig {
    /// Returns the effective delimiter, defaulting to `,`.
    pub fn effective_delimiter(&self) -> char {
        self.delimiter
            .as_deref()
            .and_then(|d| d.chars().next())
            .unwrap_or(DEFAULT_DELIMITER)
    }

    /// Returns whether a header row is expected, defaulting to true.
    pub fn effective_has_header(&self) -> bool {
        self.has_header.unwrap_or(true)
    }
}
