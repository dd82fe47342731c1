//! Event payload types.

/// Pipeline stage reported in progress events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Testing,
    Averaging,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Testing => "testing",
            Self::Averaging => "averaging",
        }
    }
}

/// Payload for `on_stage_started`.
#[derive(Debug, Clone)]
pub struct StageStartedEvent {
    pub stage: Stage,
    /// Number of work items the stage will process.
    pub total: usize,
}

/// Payload for `on_hypothesis_tested`.
#[derive(Debug, Clone)]
pub struct HypothesisTestedEvent {
    /// Position of the hypothesis in the tested batch.
    pub position: usize,
    pub total: usize,
    pub cause: String,
    pub effect: String,
    pub accepted: bool,
}

/// Payload for `on_epsilon_computed`.
#[derive(Debug, Clone)]
pub struct EpsilonComputedEvent {
    pub position: usize,
    pub total: usize,
    pub cause: String,
    pub effect: String,
    pub epsilon: Option<f64>,
}

/// Payload for `on_stage_complete`.
#[derive(Debug, Clone)]
pub struct StageCompleteEvent {
    pub stage: Stage,
    pub processed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
}
