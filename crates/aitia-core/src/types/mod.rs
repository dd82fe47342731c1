//! Value types shared across the engine.

pub mod collections;
pub mod identifiers;
pub mod observation;
pub mod window;

pub use identifiers::CaseId;
pub use observation::Observation;
pub use window::{Interval, OverlapRule, Window};
