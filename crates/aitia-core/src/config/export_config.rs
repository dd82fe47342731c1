//! Export configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DELIMITER, DEFAULT_UNDEFINED_MARKER};

/// Configuration for the epsilon result table.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExportConfig {
    /// Token written for an undefined epsilon. Default: `None`.
    pub undefined_marker: Option<String>,
    /// Field delimiter, a single character. Default: `,`.
    pub delimiter: Option<String>,
}

impl ExportConfig {
    /// Returns the effective undefined marker, defaulting to `None`.
    pub fn effective_undefined_marker(&self) -> &str {
        self.undefined_marker
            .as_deref()
            .unwrap_or(DEFAULT_UNDEFINED_MARKER)
    }

    /// Returns the effective delimiter, defaulting to `,`.
    pub fn effective_delimiter(&self) -> char {
        self.delimiter
            .as_deref()
            .and_then(|d| d.chars().next())
            .unwrap_or(DEFAULT_DELIMITER)
    }
}
