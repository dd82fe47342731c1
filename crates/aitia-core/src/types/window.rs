//! Time windows and closed intervals.

use serde::{Deserialize, Serialize};

use crate::errors::HypothesisError;

/// Offset range `(r, s)` relative to a cause occurrence.
///
/// An effect at time `e` is attributed to a cause at time `t` when
/// `t + r <= e <= t + s`. Construction guarantees `r <= s` and finite bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct Window {
    start: f64,
    end: f64,
}

#[derive(Deserialize)]
struct RawWindow {
    start: f64,
    end: f64,
}

impl TryFrom<RawWindow> for Window {
    type Error = HypothesisError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        Window::new(raw.start, raw.end)
    }
}

impl Window {
    /// Create a window, rejecting `start > end` and non-finite bounds.
    pub fn new(start: f64, end: f64) -> Result<Self, HypothesisError> {
        if !start.is_finite() || !end.is_finite() || start > end {
            return Err(HypothesisError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// `s - r`. Every window anchored from this one has this width.
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// The absolute interval `[t + r, t + s]`.
    pub fn anchored_at(&self, t: f64) -> Interval {
        Interval::new(t + self.start, t + self.end)
    }
}

/// Closed absolute interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// How two anchored windows are intersected by the overlap engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapRule {
    /// `(second.start, first.end)` after ordering by start. Differs from set
    /// intersection only for nested intervals.
    #[default]
    Reference,
    /// `[max(starts), min(ends)]`.
    StrictIntersection,
}

impl OverlapRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::StrictIntersection => "strict_intersection",
        }
    }

    /// Parse from string (matching the serde rename).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s {
            "reference" => Some(Self::Reference),
            "strict_intersection" => Some(Self::StrictIntersection),
            _ => None,
        }
    }
}

impl std::fmt::Display for OverlapRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
