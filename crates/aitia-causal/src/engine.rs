//! InferenceEngine: owns the index, coordinates generation, testing, and averaging.

use std::sync::Arc;

use aitia_core::config::InferenceConfig;
use aitia_core::errors::{HypothesisError, PipelineResult};
use aitia_core::events::{EventDispatcher, ProgressHandler};
use aitia_core::{OverlapRule, Window};
use tracing::{instrument, warn};

use crate::epsilon::{EpsilonAverager, EpsilonRow};
use crate::hypothesis::{self, Hypothesis};
use crate::index::ObservationIndex;
use crate::prima_facie::{PrimaFacieRelation, PrimaFacieTester, TestSummary};

/// Runs the Index → Generator → Tester → Averager pipeline.
///
/// The engine owns the immutable index; the prima facie relation is owned by
/// the caller and passed explicitly between `test` and `average`.
#[derive(Debug)]
pub struct InferenceEngine {
    index: ObservationIndex,
    config: InferenceConfig,
    events: EventDispatcher,
}

impl InferenceEngine {
    /// Create an engine with default settings.
    pub fn new(index: ObservationIndex) -> Self {
        Self::with_config(index, InferenceConfig::default())
    }

    /// Create an engine with explicit settings. A non-reference overlap rule
    /// is reported here, once per engine.
    pub fn with_config(index: ObservationIndex, config: InferenceConfig) -> Self {
        let rule = config.effective_overlap_rule();
        if rule != OverlapRule::Reference {
            warn!(rule = %rule, "non-reference overlap rule selected; epsilons may differ for nested windows");
        }
        Self {
            index,
            config,
            events: EventDispatcher::new(),
        }
    }

    /// Register a progress handler, invoked per hypothesis and per cause.
    pub fn register_handler(&mut self, handler: Arc<dyn ProgressHandler>) {
        self.events.register(handler);
    }

    pub fn index(&self) -> &ObservationIndex {
        &self.index
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Generate hypotheses for `effects`.
    ///
    /// Window precedence: the argument, then the configured default window,
    /// then `(0, maxTime)`.
    pub fn generate<C, E>(
        &self,
        causes: C,
        effects: E,
        window: Option<Window>,
    ) -> Result<Vec<Hypothesis>, HypothesisError>
    where
        C: IntoIterator,
        C::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        let window = match window {
            Some(window) => Some(window),
            None => self.config.default_window()?,
        };
        hypothesis::generate(&self.index, causes, effects, window)
    }

    /// Test `hypotheses` in order, appending accepted causes to `relation`.
    pub fn test(
        &self,
        hypotheses: &[Hypothesis],
        relation: &mut PrimaFacieRelation,
    ) -> PipelineResult<TestSummary> {
        PrimaFacieTester::new(&self.index, &self.events)
            .parallel(self.config.effective_parallel())
            .test_all(hypotheses, relation)
    }

    /// Epsilon rows for every accepted cause in `relation`.
    pub fn average(&self, relation: &PrimaFacieRelation) -> PipelineResult<Vec<EpsilonRow>> {
        self.averager().average(relation)
    }

    /// Epsilon rows for a single effect.
    pub fn average_effect(
        &self,
        relation: &PrimaFacieRelation,
        effect: &str,
    ) -> PipelineResult<Vec<EpsilonRow>> {
        self.averager().average_effect(relation, effect)
    }

    /// Generate, test, and average in one call.
    ///
    /// Returns the relation alongside the rows; non-fatal errors from both
    /// stages are collected in the result.
    #[instrument(skip_all)]
    pub fn run<C, E>(
        &self,
        causes: C,
        effects: E,
        window: Option<Window>,
    ) -> Result<PipelineResult<(PrimaFacieRelation, Vec<EpsilonRow>)>, HypothesisError>
    where
        C: IntoIterator,
        C::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        let hypotheses = self.generate(causes, effects, window)?;
        let mut relation = PrimaFacieRelation::new();
        let tested = self.test(&hypotheses, &mut relation);
        let averaged = self.average(&relation);

        let mut errors = tested.errors;
        errors.extend(averaged.errors);
        Ok(PipelineResult {
            data: (relation, averaged.data),
            errors,
        })
    }

    fn averager(&self) -> EpsilonAverager<'_> {
        EpsilonAverager::new(&self.index, &self.events)
            .overlap_rule(self.config.effective_overlap_rule())
            .parallel(self.config.effective_parallel())
    }
}
