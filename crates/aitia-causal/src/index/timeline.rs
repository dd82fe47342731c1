//! Per-label timeline: timestamp → cases observed at that instant.

use std::collections::BTreeMap;

use aitia_core::types::collections::SmallVec4;
use aitia_core::CaseId;
use ordered_float::OrderedFloat;

/// Cases sharing one timestamp under one label.
pub type CaseList = SmallVec4<CaseId>;

/// Ordered map from timestamp to the cases in which a label was observed.
///
/// Duplicated records keep their duplicates; the bucket lengths always sum
/// to the number of records ingested for the label.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    points: BTreeMap<OrderedFloat<f64>, CaseList>,
}

impl Timeline {
    pub(crate) fn insert(&mut self, timestamp: f64, case: CaseId) {
        self.points
            .entry(OrderedFloat(timestamp))
            .or_default()
            .push(case);
    }

    /// Number of distinct timestamps.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total number of records, counting every case at every timestamp.
    pub fn occurrence_count(&self) -> usize {
        self.points.values().map(|cases| cases.len()).sum()
    }

    /// Timestamps in ascending order with their cases.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &[CaseId])> + '_ {
        self.points.iter().map(|(t, cases)| (t.into_inner(), cases.as_slice()))
    }

    pub fn cases_at(&self, timestamp: f64) -> Option<&[CaseId]> {
        self.points
            .get(&OrderedFloat(timestamp))
            .map(|cases| cases.as_slice())
    }

    /// Points with `lo <= t <= hi`. Empty when `lo > hi` or either bound is NaN.
    pub fn between(&self, lo: f64, hi: f64) -> impl Iterator<Item = (f64, &[CaseId])> + '_ {
        let range = (lo <= hi).then(|| self.points.range(OrderedFloat(lo)..=OrderedFloat(hi)));
        range
            .into_iter()
            .flatten()
            .map(|(t, cases)| (t.into_inner(), cases.as_slice()))
    }
}
