//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;
pub use std::collections::BTreeMap;

/// SmallVec sized for the cases sharing one timestamp under one label (usually <4).
pub type SmallVec4<T> = SmallVec<[T; 4]>;
