use serde::{Deserialize, Serialize};

/// One observation record: a label seen in a case at a point in time.
///
/// `timestamp` is in whatever unit the producer chose (hours, seconds, ...);
/// the engine only requires the unit to be consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub case_id: String,
    pub label: String,
    pub timestamp: f64,
}

impl Observation {
    pub fn new(case_id: impl Into<String>, label: impl Into<String>, timestamp: f64) -> Self {
        Self {
            case_id: case_id.into(),
            label: label.into(),
            timestamp,
        }
    }
}
