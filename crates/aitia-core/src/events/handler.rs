//! ProgressHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing analysis progress.
///
/// Handlers only override the events they care about. The trait requires
/// `Send + Sync` because parallel runs emit from rayon worker threads, in
/// which case per-item events arrive in no particular order.
pub trait ProgressHandler: Send + Sync {
    fn on_stage_started(&self, _event: &StageStartedEvent) {}
    fn on_hypothesis_tested(&self, _event: &HypothesisTestedEvent) {}
    fn on_epsilon_computed(&self, _event: &EpsilonComputedEvent) {}
    fn on_stage_complete(&self, _event: &StageCompleteEvent) {}
}
