//! Spur-based identifier for interned case ids.

use lasso::Spur;
use serde::{Deserialize, Serialize};

/// Interned process-instance identifier.
///
/// Cases are interned once during ingestion; the index resolves them back to
/// their original string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseId(pub Spur);

impl CaseId {
    /// Create a new ID from a `Spur`.
    pub fn new(spur: Spur) -> Self {
        Self(spur)
    }

    /// Get the inner `Spur`.
    pub fn inner(self) -> Spur {
        self.0
    }
}

impl From<Spur> for CaseId {
    fn from(spur: Spur) -> Self {
        Self(spur)
    }
}

impl From<CaseId> for Spur {
    fn from(id: CaseId) -> Self {
        id.0
    }
}
