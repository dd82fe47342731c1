//! # aitia-causal
//!
//! Time-windowed probabilistic causality over case-tagged observations.
//! Observation index, hypothesis generation, prima facie testing, and
//! epsilon averaging, plus the table codecs used at the edges.

pub mod engine;
pub mod epsilon;
pub mod hypothesis;
pub mod index;
pub mod io;
pub mod prima_facie;
pub mod window;

pub use engine::InferenceEngine;
pub use epsilon::{EpsilonAverager, EpsilonRow};
pub use hypothesis::Hypothesis;
pub use index::{ObservationIndex, Timeline};
pub use prima_facie::{PrimaFacieCause, PrimaFacieRelation, PrimaFacieTester};
pub use window::WindowedCases;
