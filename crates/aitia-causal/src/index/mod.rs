//! Observation index: lookup structures built once from the record set.

pub mod timeline;

use std::collections::BTreeMap;

use aitia_core::errors::SchemaError;
use aitia_core::types::collections::FxHashMap;
use aitia_core::{CaseId, Observation};
use lasso::{Rodeo, RodeoReader};
use ordered_float::OrderedFloat;
use tracing::{debug, info};

pub use timeline::{CaseList, Timeline};

/// Immutable index over every ingested observation.
///
/// Holds the label-major view used by the engine (`label → timestamp → cases`),
/// a time-major view of the same records, the alphabet, the record count used
/// as base-rate denominator, and the latest timestamp.
pub struct ObservationIndex {
    /// Timelines in alphabet order.
    timelines: Vec<Timeline>,
    /// Label → position in `alphabet` / `timelines`.
    slots: FxHashMap<String, usize>,
    alphabet: Vec<String>,
    /// Timestamp → (case, label slot), in ingestion order per timestamp.
    by_time: BTreeMap<OrderedFloat<f64>, Vec<(CaseId, usize)>>,
    cases: RodeoReader,
    event_count: usize,
    max_time: f64,
}

impl ObservationIndex {
    /// Build the index in a single pass over `records`.
    ///
    /// Records may arrive in any order. Fails on the first record with an
    /// empty case id or label, or a non-finite timestamp.
    pub fn build<I>(records: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = Observation>,
    {
        let mut interner = Rodeo::default();
        let mut timelines: Vec<Timeline> = Vec::new();
        let mut slots: FxHashMap<String, usize> = FxHashMap::default();
        let mut alphabet: Vec<String> = Vec::new();
        let mut by_time: BTreeMap<OrderedFloat<f64>, Vec<(CaseId, usize)>> = BTreeMap::new();
        let mut event_count = 0usize;
        let mut max_time: Option<f64> = None;

        for (position, record) in records.into_iter().enumerate() {
            let row = position + 1;
            validate(&record, row)?;

            let case = CaseId::new(interner.get_or_intern(&record.case_id));
            let slot = match slots.get(&record.label) {
                Some(&slot) => slot,
                None => {
                    let slot = alphabet.len();
                    alphabet.push(record.label.clone());
                    timelines.push(Timeline::default());
                    slots.insert(record.label, slot);
                    slot
                }
            };

            timelines[slot].insert(record.timestamp, case);
            by_time
                .entry(OrderedFloat(record.timestamp))
                .or_default()
                .push((case, slot));

            event_count += 1;
            max_time = Some(max_time.map_or(record.timestamp, |m| m.max(record.timestamp)));
        }

        let index = Self {
            timelines,
            slots,
            alphabet,
            by_time,
            cases: interner.into_reader(),
            event_count,
            max_time: max_time.unwrap_or(0.0),
        };
        info!(
            events = index.event_count,
            labels = index.alphabet.len(),
            cases = index.case_count(),
            max_time = index.max_time,
            "observation index built"
        );
        debug!(timestamps = index.by_time.len(), "distinct timestamps indexed");
        Ok(index)
    }

    /// Timeline of `label`, or `None` if the label was never observed.
    pub fn timeline(&self, label: &str) -> Option<&Timeline> {
        self.slots.get(label).map(|&slot| &self.timelines[slot])
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.slots.contains_key(label)
    }

    /// Distinct labels in first-seen order.
    pub fn alphabet(&self) -> &[String] {
        &self.alphabet
    }

    /// Total number of ingested records.
    pub fn event_count(&self) -> usize {
        self.event_count
    }

    /// Latest timestamp across all records; 0 for an empty index.
    pub fn max_time(&self) -> f64 {
        self.max_time
    }

    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    /// Resolve an interned case back to its original identifier.
    pub fn resolve_case(&self, case: CaseId) -> &str {
        self.cases.resolve(&case.inner())
    }

    /// Look up the interned id of a case, if it was ever observed.
    pub fn case_id(&self, case: &str) -> Option<CaseId> {
        self.cases.get(case).map(CaseId::new)
    }

    /// Every distinct timestamp in the log, ascending.
    pub fn timestamps(&self) -> impl Iterator<Item = f64> + '_ {
        self.by_time.keys().map(|t| t.into_inner())
    }

    /// `(case, label)` pairs recorded at exactly `timestamp`.
    pub fn observations_at(&self, timestamp: f64) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.by_time
            .get(&OrderedFloat(timestamp))
            .into_iter()
            .flatten()
            .map(|&(case, slot)| (self.resolve_case(case), self.alphabet[slot].as_str()))
    }

    /// Logged timestamps at which `label` was not observed in any case.
    pub fn false_times(&self, label: &str) -> Vec<f64> {
        let slot = self.slots.get(label).copied();
        self.by_time
            .iter()
            .filter(|(_, entries)| slot.map_or(true, |s| entries.iter().all(|&(_, l)| l != s)))
            .map(|(t, _)| t.into_inner())
            .collect()
    }
}

impl std::fmt::Debug for ObservationIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservationIndex")
            .field("labels", &self.alphabet.len())
            .field("cases", &self.cases.len())
            .field("event_count", &self.event_count)
            .field("max_time", &self.max_time)
            .finish()
    }
}

fn validate(record: &Observation, row: usize) -> Result<(), SchemaError> {
    if record.case_id.is_empty() {
        return Err(SchemaError::MissingField {
            row,
            field: "case_id",
        });
    }
    if record.label.is_empty() {
        return Err(SchemaError::MissingField {
            row,
            field: "label",
        });
    }
    if !record.timestamp.is_finite() {
        return Err(SchemaError::InvalidTimestamp {
            row,
            value: record.timestamp.to_string(),
        });
    }
    Ok(())
}
