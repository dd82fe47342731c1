//! Epsilon averaging: causal significance of each prima facie cause,
//! averaged over the other accepted causes of the same effect.

use std::time::Instant;

use aitia_core::errors::{HypothesisError, PipelineResult};
use aitia_core::events::{
    EpsilonComputedEvent, EventDispatcher, Stage, StageCompleteEvent, StageStartedEvent,
};
use aitia_core::{OverlapRule, Window};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::index::ObservationIndex;
use crate::prima_facie::{lookup, PrimaFacieCause, PrimaFacieRelation};
use crate::window::{and_windows, count_effect, not_windows};

/// One exported result: a prima facie cause of an effect and its epsilon.
/// `epsilon` is `None` when the effect has no other cause to average against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpsilonRow {
    pub cause: String,
    pub effect: String,
    pub window: Window,
    pub epsilon: Option<f64>,
}

/// `P(e | c ∧ x) - P(e | ¬c ∧ x)` for one other cause `x`, using `x`'s window.
///
/// Zero when either conditioning set is empty.
pub fn epsilon_x(
    index: &ObservationIndex,
    effect: &str,
    cause: &str,
    x: &PrimaFacieCause,
    rule: OverlapRule,
) -> Result<f64, HypothesisError> {
    let c_true = lookup(index, cause)?;
    let e_true = lookup(index, effect)?;
    let x_true = lookup(index, &x.cause)?;

    let c_and_x = and_windows(c_true, x_true, x.window, rule);
    let not_c_and_x = not_windows(c_true, x_true, x.window);

    if c_and_x.is_empty() || not_c_and_x.is_empty() {
        return Ok(0.0);
    }

    let e_and = count_effect(e_true, &c_and_x);
    let e_not = count_effect(e_true, &not_c_and_x);
    Ok(e_and as f64 / c_and_x.len() as f64 - e_not as f64 / not_c_and_x.len() as f64)
}

/// Mean of `epsilon_x` over every other accepted cause of `effect`.
pub fn epsilon_average(
    index: &ObservationIndex,
    relation: &PrimaFacieRelation,
    effect: &str,
    cause: &str,
    rule: OverlapRule,
) -> Result<Option<f64>, HypothesisError> {
    let others: Vec<&PrimaFacieCause> = relation.other_causes(effect, cause).collect();
    if others.is_empty() {
        return Ok(None);
    }

    let mut sum = 0.0;
    for x in &others {
        sum += epsilon_x(index, effect, cause, x, rule)?;
    }
    Ok(Some(sum / others.len() as f64))
}

/// Computes epsilon rows for a prima facie relation.
pub struct EpsilonAverager<'a> {
    index: &'a ObservationIndex,
    events: &'a EventDispatcher,
    rule: OverlapRule,
    parallel: bool,
}

impl<'a> EpsilonAverager<'a> {
    pub fn new(index: &'a ObservationIndex, events: &'a EventDispatcher) -> Self {
        Self {
            index,
            events,
            rule: OverlapRule::default(),
            parallel: false,
        }
    }

    /// Select the overlap rule. Callers building averagers repeatedly should
    /// report a non-reference rule once themselves; the engine does.
    pub fn overlap_rule(mut self, rule: OverlapRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Rows for every effect, effects and causes in acceptance order.
    #[instrument(skip_all, fields(entries = relation.len(), parallel = self.parallel))]
    pub fn average(&self, relation: &PrimaFacieRelation) -> PipelineResult<Vec<EpsilonRow>> {
        let work: Vec<(&str, &PrimaFacieCause)> = relation
            .iter()
            .flat_map(|(effect, causes)| causes.iter().map(move |entry| (effect, entry)))
            .collect();
        self.run(relation, &work)
    }

    /// Rows for a single effect, so long analyses can run effect by effect.
    #[instrument(skip(self, relation))]
    pub fn average_effect(
        &self,
        relation: &PrimaFacieRelation,
        effect: &str,
    ) -> PipelineResult<Vec<EpsilonRow>> {
        let work: Vec<(&str, &PrimaFacieCause)> = relation
            .causes_for(effect)
            .iter()
            .map(|entry| (effect, entry))
            .collect();
        self.run(relation, &work)
    }

    fn run(
        &self,
        relation: &PrimaFacieRelation,
        work: &[(&str, &PrimaFacieCause)],
    ) -> PipelineResult<Vec<EpsilonRow>> {
        let started = Instant::now();
        let total = work.len();
        self.events.emit_stage_started(&StageStartedEvent {
            stage: Stage::Averaging,
            total,
        });

        let compute = |(position, &(effect, entry)): (usize, &(&str, &PrimaFacieCause))| {
            let outcome = epsilon_average(self.index, relation, effect, &entry.cause, self.rule);
            if let Ok(epsilon) = outcome {
                debug!(cause = %entry.cause, effect, ?epsilon, "epsilon computed");
                self.events.emit_epsilon_computed(&EpsilonComputedEvent {
                    position,
                    total,
                    cause: entry.cause.clone(),
                    effect: effect.to_string(),
                    epsilon,
                });
            }
            outcome.map(|epsilon| EpsilonRow {
                cause: entry.cause.clone(),
                effect: effect.to_string(),
                window: entry.window,
                epsilon,
            })
        };

        let outcomes: Vec<Result<EpsilonRow, HypothesisError>> = if self.parallel {
            work.par_iter().enumerate().map(compute).collect()
        } else {
            work.iter().enumerate().map(compute).collect()
        };

        let mut result = PipelineResult::new(Vec::with_capacity(total));
        for outcome in outcomes {
            match outcome {
                Ok(row) => result.data.push(row),
                Err(e) => {
                    warn!(error = %e, "skipping epsilon row");
                    result.add_error(e);
                }
            }
        }

        let skipped = result.error_count();
        self.events.emit_stage_complete(&StageCompleteEvent {
            stage: Stage::Averaging,
            processed: total - skipped,
            skipped,
            duration_ms: started.elapsed().as_millis() as u64,
        });
        info!(
            rows = result.data.len(),
            undefined = result.data.iter().filter(|r| r.epsilon.is_none()).count(),
            skipped,
            "epsilon averaging complete"
        );
        result
    }
}
