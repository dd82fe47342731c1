//! Hypothesis generation: candidate `(cause, effect, window)` triples.

use aitia_core::errors::HypothesisError;
use aitia_core::Window;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::index::ObservationIndex;

/// A candidate causal relationship to be tested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub cause: String,
    pub effect: String,
    pub window: Window,
}

impl Hypothesis {
    /// Build a hypothesis, rejecting a cause equal to its effect.
    pub fn new(
        cause: impl Into<String>,
        effect: impl Into<String>,
        window: Window,
    ) -> Result<Self, HypothesisError> {
        let cause = cause.into();
        let effect = effect.into();
        if cause == effect {
            return Err(HypothesisError::SelfCause { label: cause });
        }
        Ok(Self {
            cause,
            effect,
            window,
        })
    }

    /// Build from raw window bounds. Fails for `start > end`.
    pub fn with_bounds(
        cause: impl Into<String>,
        effect: impl Into<String>,
        start: f64,
        end: f64,
    ) -> Result<Self, HypothesisError> {
        Self::new(cause, effect, Window::new(start, end)?)
    }
}

/// The window used when the caller supplies none: `(0, maxTime)`.
pub fn default_window(index: &ObservationIndex) -> Result<Window, HypothesisError> {
    Window::new(0.0, index.max_time())
}

/// Enumerate hypotheses for every effect, effect-major, causes in caller order.
///
/// Pairs whose cause equals the effect are left out. Labels are not checked
/// against the alphabet here; the tester reports unknown ones.
pub fn generate<C, E>(
    index: &ObservationIndex,
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
        Some(window) => window,
        None => {
            let window = default_window(index)?;
            info!(
                start = window.start(),
                end = window.end(),
                "no window provided, defaulting to the full log duration"
            );
            window
        }
    };

    let causes: Vec<String> = causes.into_iter().map(|c| c.as_ref().to_string()).collect();
    let mut hypotheses = Vec::new();

    for effect in effects {
        let effect = effect.as_ref();
        let before = hypotheses.len();
        hypotheses.extend(
            causes
                .iter()
                .filter(|cause| cause.as_str() != effect)
                .map(|cause| Hypothesis {
                    cause: cause.clone(),
                    effect: effect.to_string(),
                    window,
                }),
        );
        debug!(effect, count = hypotheses.len() - before, "hypotheses generated");
    }

    Ok(hypotheses)
}
