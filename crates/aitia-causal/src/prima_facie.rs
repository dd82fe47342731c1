//! Prima facie testing: does the cause raise the probability of the effect
//! within its window?

use std::time::Instant;

use aitia_core::errors::{HypothesisError, PipelineResult};
use aitia_core::events::{
    EventDispatcher, HypothesisTestedEvent, Stage, StageCompleteEvent, StageStartedEvent,
};
use aitia_core::types::collections::FxHashSet;
use aitia_core::{CaseId, Window};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::hypothesis::Hypothesis;
use crate::index::{ObservationIndex, Timeline};

/// A cause accepted for some effect, with the window it was tested under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaFacieCause {
    pub cause: String,
    pub window: Window,
}

/// Accepted causes per effect, both in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimaFacieRelation {
    by_effect: IndexMap<String, Vec<PrimaFacieCause>>,
}

impl PrimaFacieRelation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an accepted cause for `effect`.
    pub fn record(&mut self, effect: impl Into<String>, cause: impl Into<String>, window: Window) {
        self.by_effect
            .entry(effect.into())
            .or_default()
            .push(PrimaFacieCause {
                cause: cause.into(),
                window,
            });
    }

    /// Accepted causes of `effect`, in acceptance order.
    pub fn causes_for(&self, effect: &str) -> &[PrimaFacieCause] {
        self.by_effect
            .get(effect)
            .map(|causes| causes.as_slice())
            .unwrap_or(&[])
    }

    /// Accepted causes of `effect` other than `cause`.
    pub fn other_causes<'a>(
        &'a self,
        effect: &str,
        cause: &'a str,
    ) -> impl Iterator<Item = &'a PrimaFacieCause> + 'a {
        self.causes_for(effect)
            .iter()
            .filter(move |entry| entry.cause != cause)
    }

    /// Effects with at least one accepted cause, in first-accepted order.
    pub fn effects(&self) -> impl Iterator<Item = &str> + '_ {
        self.by_effect.keys().map(|e| e.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PrimaFacieCause])> + '_ {
        self.by_effect
            .iter()
            .map(|(effect, causes)| (effect.as_str(), causes.as_slice()))
    }

    /// Total number of accepted `(cause, effect)` entries.
    pub fn len(&self) -> usize {
        self.by_effect.values().map(|causes| causes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_effect.is_empty()
    }

    /// Append every entry of `other`, e.g. from an independently tested batch.
    pub fn merge(&mut self, other: PrimaFacieRelation) {
        for (effect, causes) in other.by_effect {
            self.by_effect.entry(effect).or_default().extend(causes);
        }
    }
}

/// Raw counts behind a prima facie decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PairCounts {
    /// Cause cases followed by the effect, summed per cause timestamp.
    pub c_and_e: usize,
    /// Distinct cause timestamps.
    pub c_trues: usize,
    /// Distinct effect timestamps.
    pub e_trues: usize,
}

/// Summary of a testing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TestSummary {
    pub tested: usize,
    pub accepted: usize,
    pub skipped: usize,
}

/// Effect timestamps in the absolute interval `[t + r, t + s]`.
pub fn effects_within(
    e_true: &Timeline,
    t: f64,
    window: Window,
) -> impl Iterator<Item = (f64, &[CaseId])> + '_ {
    e_true.between(t + window.start(), t + window.end())
}

pub(crate) fn lookup<'a>(
    index: &'a ObservationIndex,
    label: &str,
) -> Result<&'a Timeline, HypothesisError> {
    index
        .timeline(label)
        .ok_or_else(|| HypothesisError::UnknownLabel {
            label: label.to_string(),
        })
}

/// Count how often the effect follows the cause within the window, per case.
///
/// For every cause timestamp, each cause case that also appears among the
/// effect cases inside `[t + r, t + s]` adds one. Matches are not
/// deduplicated across cause timestamps, so `c_and_e` may exceed `c_trues`.
pub fn test_pair_window(
    index: &ObservationIndex,
    hypothesis: &Hypothesis,
) -> Result<PairCounts, HypothesisError> {
    let c_true = lookup(index, &hypothesis.cause)?;
    let e_true = lookup(index, &hypothesis.effect)?;

    let mut c_and_e = 0;
    for (t, c_cases) in c_true.iter() {
        let e_cases: FxHashSet<CaseId> = effects_within(e_true, t, hypothesis.window)
            .flat_map(|(_, cases)| cases.iter().copied())
            .collect();
        c_and_e += c_cases.iter().filter(|case| e_cases.contains(case)).count();
    }

    Ok(PairCounts {
        c_and_e,
        c_trues: c_true.len(),
        e_trues: e_true.len(),
    })
}

/// `P(e | c) > P(e)`: the windowed co-occurrence rate against the effect's
/// base rate over all observations.
pub fn is_prima_facie(counts: PairCounts, event_count: usize) -> bool {
    if counts.c_trues == 0 || event_count == 0 {
        return false;
    }
    counts.c_and_e as f64 / counts.c_trues as f64 > counts.e_trues as f64 / event_count as f64
}

/// Tests hypotheses against an index and accumulates accepted causes.
pub struct PrimaFacieTester<'a> {
    index: &'a ObservationIndex,
    events: &'a EventDispatcher,
    parallel: bool,
}

impl<'a> PrimaFacieTester<'a> {
    pub fn new(index: &'a ObservationIndex, events: &'a EventDispatcher) -> Self {
        Self {
            index,
            events,
            parallel: false,
        }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Test a single hypothesis, returning whether it was accepted.
    pub fn test_one(&self, hypothesis: &Hypothesis) -> Result<bool, HypothesisError> {
        let counts = test_pair_window(self.index, hypothesis)?;
        let accepted = is_prima_facie(counts, self.index.event_count());
        debug!(
            cause = %hypothesis.cause,
            effect = %hypothesis.effect,
            c_and_e = counts.c_and_e,
            c_trues = counts.c_trues,
            e_trues = counts.e_trues,
            accepted,
            "hypothesis tested"
        );
        Ok(accepted)
    }

    /// Test every hypothesis in order and append accepted ones to `relation`.
    ///
    /// A hypothesis naming an unknown label is skipped, logged, and reported
    /// in the result's errors; the rest of the batch still runs. Parallel runs
    /// merge in input order, so `relation` ends up identical either way.
    #[instrument(skip_all, fields(hypotheses = hypotheses.len(), parallel = self.parallel))]
    pub fn test_all(
        &self,
        hypotheses: &[Hypothesis],
        relation: &mut PrimaFacieRelation,
    ) -> PipelineResult<TestSummary> {
        let started = Instant::now();
        let total = hypotheses.len();
        self.events.emit_stage_started(&StageStartedEvent {
            stage: Stage::Testing,
            total,
        });

        let run = |(position, hypothesis): (usize, &Hypothesis)| {
            let outcome = self.test_one(hypothesis);
            self.events.emit_hypothesis_tested(&HypothesisTestedEvent {
                position,
                total,
                cause: hypothesis.cause.clone(),
                effect: hypothesis.effect.clone(),
                accepted: matches!(outcome, Ok(true)),
            });
            outcome
        };

        let outcomes: Vec<Result<bool, HypothesisError>> = if self.parallel {
            hypotheses.par_iter().enumerate().map(run).collect()
        } else {
            hypotheses.iter().enumerate().map(run).collect()
        };

        let mut result = PipelineResult::new(TestSummary {
            tested: total,
            ..Default::default()
        });
        for (hypothesis, outcome) in hypotheses.iter().zip(outcomes) {
            match outcome {
                Ok(true) => {
                    relation.record(&hypothesis.effect, &hypothesis.cause, hypothesis.window);
                    result.data.accepted += 1;
                }
                Ok(false) => {}
                Err(e) => {
                    warn!(
                        cause = %hypothesis.cause,
                        effect = %hypothesis.effect,
                        error = %e,
                        "skipping hypothesis"
                    );
                    result.data.skipped += 1;
                    result.add_error(e);
                }
            }
        }

        self.events.emit_stage_complete(&StageCompleteEvent {
            stage: Stage::Testing,
            processed: total - result.data.skipped,
            skipped: result.data.skipped,
            duration_ms: started.elapsed().as_millis() as u64,
        });
        info!(
            tested = result.data.tested,
            accepted = result.data.accepted,
            skipped = result.data.skipped,
            "prima facie testing complete"
        );
        result
    }
}
