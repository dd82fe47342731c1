//! Inference configuration.

use serde::{Deserialize, Serialize};

use crate::errors::HypothesisError;
use crate::types::{OverlapRule, Window};

/// Configuration for the tester and the averager.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InferenceConfig {
    /// Overlap rule for the window engine. Default: `reference`.
    pub overlap_rule: Option<OverlapRule>,
    /// Run per-hypothesis and per-cause loops on the rayon pool. Default: false.
    pub parallel: Option<bool>,
    /// Start of the window used when the caller supplies none.
    pub window_start: Option<f64>,
    /// End of the window used when the caller supplies none.
    pub window_end: Option<f64>,
}

impl InferenceConfig {
    /// Returns the effective overlap rule, defaulting to `Reference`.
    pub fn effective_overlap_rule(&self) -> OverlapRule {
        self.overlap_rule.unwrap_or_default()
    }

    /// Returns whether loops run in parallel, defaulting to false.
    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(false)
    }

    /// The configured default window, if both bounds are set.
    pub fn default_window(&self) -> Result<Option<Window>, HypothesisError> {
        match (self.window_start, self.window_end) {
            (Some(start), Some(end)) => Window::new(start, end).map(Some),
            _ => Ok(None),
        }
    }
}
