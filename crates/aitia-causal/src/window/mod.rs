//! Window-overlap engine shared by the tester and the averager.
//!
//! Given two labels' timelines and a common window `(r, s)`, computes the
//! case-respecting intervals in which both hold (`and_windows`), or in which
//! the second holds without the first (`not_windows`), and counts how many of
//! those intervals contain the effect in one of their cases (`count_effect`).

pub mod combine;
pub mod count;
pub mod overlap;

use aitia_core::Interval;

use crate::index::CaseList;

pub use combine::{and_windows, candidates_near, not_windows};
pub use count::count_effect;
pub use overlap::{only_x, overlap, overlap_with, strict_overlap};

/// An absolute interval paired with the cases it applies to.
/// Intermediate value of the overlap engine, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowedCases {
    pub interval: Interval,
    pub cases: CaseList,
}
