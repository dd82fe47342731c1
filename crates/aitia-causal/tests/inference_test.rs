//! End-to-end tests for prima facie testing and epsilon averaging.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use aitia_causal::epsilon::{epsilon_average, epsilon_x};
use aitia_causal::prima_facie::{is_prima_facie, test_pair_window, PairCounts};
use aitia_causal::{
    EpsilonAverager, Hypothesis, InferenceEngine, ObservationIndex, PrimaFacieRelation,
    PrimaFacieTester,
};
use aitia_core::config::InferenceConfig;
use aitia_core::errors::HypothesisError;
use aitia_core::events::{
    EpsilonComputedEvent, EventDispatcher, HypothesisTestedEvent, ProgressHandler, Stage,
    StageCompleteEvent, StageStartedEvent,
};
use aitia_core::{InferenceError, Observation, OverlapRule, Window};

fn index(records: &[(&str, &str, f64)]) -> ObservationIndex {
    ObservationIndex::build(
        records
            .iter()
            .map(|&(case, label, t)| Observation::new(case, label, t)),
    )
    .unwrap()
}

fn window(start: f64, end: f64) -> Window {
    Window::new(start, end).unwrap()
}

/// `A` in ten cases at t = 0..9, `E` following in eight of them, padded with
/// unrelated `Noise` records to 100 observations.
fn followed_log() -> Vec<Observation> {
    let mut records: Vec<Observation> = (0..10)
        .map(|i| Observation::new(format!("c{i}"), "A", i as f64))
        .collect();
    for (case, t) in [(0, 5.0), (1, 5.0), (2, 6.0), (3, 6.0), (4, 7.0), (5, 7.0), (6, 8.0), (7, 9.0)] {
        records.push(Observation::new(format!("c{case}"), "E", t));
    }
    for i in 0..82 {
        records.push(Observation::new(format!("f{i}"), "Noise", 1000.0 + i as f64));
    }
    records
}

/// k1: A@0, B@1, E@1.5. k2: B@10, E@11.
fn two_cause_log() -> Vec<(&'static str, &'static str, f64)> {
    vec![
        ("k1", "A", 0.0),
        ("k1", "B", 1.0),
        ("k1", "E", 1.5),
        ("k2", "B", 10.0),
        ("k2", "E", 11.0),
    ]
}

#[test]
fn cause_followed_by_effect_is_prima_facie() {
    let idx = ObservationIndex::build(followed_log()).unwrap();
    assert_eq!(idx.event_count(), 100);

    let counts = test_pair_window(&idx, &Hypothesis::with_bounds("A", "E", 0.0, 5.0).unwrap())
        .unwrap();
    assert_eq!(
        counts,
        PairCounts {
            c_and_e: 8,
            c_trues: 10,
            e_trues: 5
        }
    );
    assert!(is_prima_facie(counts, idx.event_count()));
}

#[test]
fn tester_accepts_only_raising_causes() {
    let idx = ObservationIndex::build(followed_log()).unwrap();
    let events = EventDispatcher::new();
    let hypotheses = vec![
        Hypothesis::with_bounds("A", "E", 0.0, 5.0).unwrap(),
        Hypothesis::with_bounds("Noise", "E", 0.0, 5.0).unwrap(),
    ];

    let mut relation = PrimaFacieRelation::new();
    let result = PrimaFacieTester::new(&idx, &events).test_all(&hypotheses, &mut relation);

    assert!(result.is_clean());
    assert_eq!(result.data.tested, 2);
    assert_eq!(result.data.accepted, 1);
    let causes: Vec<&str> = relation.causes_for("E").iter().map(|c| c.cause.as_str()).collect();
    assert_eq!(causes, vec!["A"]);
    assert_eq!(relation.causes_for("E")[0].window, window(0.0, 5.0));
}

#[test]
fn matches_are_counted_per_cause_occurrence() {
    let idx = index(&[("k1", "A", 0.0), ("k1", "A", 0.0), ("k1", "E", 1.5)]);
    let counts =
        test_pair_window(&idx, &Hypothesis::with_bounds("A", "E", 0.0, 2.0).unwrap()).unwrap();
    assert_eq!(counts.c_and_e, 2);
    assert_eq!(counts.c_trues, 1);
}

#[test]
fn effect_outside_the_window_does_not_count() {
    let idx = index(&[("k1", "A", 0.0), ("k1", "E", 3.0), ("k2", "E", 1.0)]);
    let counts =
        test_pair_window(&idx, &Hypothesis::with_bounds("A", "E", 1.0, 2.0).unwrap()).unwrap();
    assert_eq!(counts.c_and_e, 0);
}

#[test]
fn unknown_labels_are_skipped_and_reported() {
    let idx = index(&two_cause_log());
    let events = EventDispatcher::new();
    let hypotheses = vec![
        Hypothesis::with_bounds("Z", "E", 0.0, 2.0).unwrap(),
        Hypothesis::with_bounds("B", "E", 0.0, 2.0).unwrap(),
    ];

    let mut relation = PrimaFacieRelation::new();
    let result = PrimaFacieTester::new(&idx, &events).test_all(&hypotheses, &mut relation);

    assert_eq!(result.data.skipped, 1);
    assert_eq!(result.data.accepted, 1);
    assert_eq!(result.error_count(), 1);
    assert!(matches!(
        &result.errors[0],
        InferenceError::Hypothesis(HypothesisError::UnknownLabel { label }) if label == "Z"
    ));
}

#[test]
fn epsilon_for_case_aligned_causes() {
    let idx = index(&two_cause_log());
    let mut relation = PrimaFacieRelation::new();
    relation.record("E", "A", window(0.0, 2.0));
    relation.record("E", "B", window(0.0, 2.0));

    let b = &relation.causes_for("E")[1];
    let a = &relation.causes_for("E")[0];
    assert_eq!(epsilon_x(&idx, "E", "A", b, OverlapRule::Reference).unwrap(), 1.0);
    assert_eq!(epsilon_x(&idx, "E", "B", a, OverlapRule::Reference).unwrap(), 1.0);
    assert_eq!(
        epsilon_average(&idx, &relation, "E", "A", OverlapRule::Reference).unwrap(),
        Some(1.0)
    );
}

#[test]
fn epsilon_averages_over_every_other_cause() {
    let mut records = two_cause_log();
    records.push(("k3", "C", 50.0));
    let idx = index(&records);

    let mut relation = PrimaFacieRelation::new();
    for cause in ["A", "B", "C"] {
        relation.record("E", cause, window(0.0, 2.0));
    }

    let avg = epsilon_average(&idx, &relation, "E", "A", OverlapRule::Reference).unwrap();
    assert_eq!(avg, Some(0.5));
}

#[test]
fn epsilon_is_zero_when_causes_share_no_case() {
    let idx = index(&[("k1", "A", 0.0), ("k2", "B", 1.0), ("k1", "E", 1.5)]);
    let mut relation = PrimaFacieRelation::new();
    relation.record("E", "A", window(0.0, 2.0));
    relation.record("E", "B", window(0.0, 2.0));

    let avg = epsilon_average(&idx, &relation, "E", "A", OverlapRule::Reference).unwrap();
    assert_eq!(avg, Some(0.0));
}

#[test]
fn lone_cause_has_undefined_epsilon() {
    let idx = index(&two_cause_log());
    let mut relation = PrimaFacieRelation::new();
    relation.record("E", "B", window(0.0, 2.0));

    let events = EventDispatcher::new();
    let result = EpsilonAverager::new(&idx, &events).average(&relation);
    assert!(result.is_clean());
    assert_eq!(result.data.len(), 1);
    assert_eq!(result.data[0].epsilon, None);
}

#[test]
fn duplicate_cause_entries_are_not_other_causes() {
    let idx = index(&two_cause_log());
    let mut relation = PrimaFacieRelation::new();
    relation.record("E", "B", window(0.0, 2.0));
    relation.record("E", "B", window(0.0, 1.0));

    assert_eq!(relation.other_causes("E", "B").count(), 0);
    assert_eq!(
        epsilon_average(&idx, &relation, "E", "B", OverlapRule::Reference).unwrap(),
        None
    );
}

#[test]
fn engine_runs_the_whole_pipeline() {
    let engine = InferenceEngine::new(index(&two_cause_log()));
    let result = engine
        .run(["A", "B"], ["E"], Some(window(0.0, 2.0)))
        .unwrap();
    assert!(result.is_clean());

    let (relation, rows) = result.data;
    assert_eq!(relation.len(), 2);
    let summary: Vec<(&str, &str, Option<f64>)> = rows
        .iter()
        .map(|r| (r.cause.as_str(), r.effect.as_str(), r.epsilon))
        .collect();
    assert_eq!(summary, vec![("A", "E", Some(1.0)), ("B", "E", Some(1.0))]);
    assert!(rows.iter().all(|r| r.window == window(0.0, 2.0)));
}

#[test]
fn strict_rule_matches_reference_for_equal_windows() {
    let reference = InferenceEngine::new(index(&two_cause_log()));
    let strict = InferenceEngine::with_config(
        index(&two_cause_log()),
        InferenceConfig {
            overlap_rule: Some(OverlapRule::StrictIntersection),
            ..Default::default()
        },
    );

    let w = Some(window(0.0, 2.0));
    let a = reference.run(["A", "B"], ["E"], w).unwrap().data.1;
    let b = strict.run(["A", "B"], ["E"], w).unwrap().data.1;
    assert_eq!(a, b);
}

#[test]
fn configured_window_is_used_when_none_is_given() {
    let engine = InferenceEngine::with_config(
        index(&two_cause_log()),
        InferenceConfig {
            window_start: Some(0.0),
            window_end: Some(2.0),
            ..Default::default()
        },
    );
    let hypotheses = engine.generate(["A"], ["E"], None).unwrap();
    assert_eq!(hypotheses[0].window, window(0.0, 2.0));

    let explicit = engine.generate(["A"], ["E"], Some(window(1.0, 3.0))).unwrap();
    assert_eq!(explicit[0].window, window(1.0, 3.0));
}

#[test]
fn average_effect_limits_rows_to_one_effect() {
    let engine = InferenceEngine::new(index(&two_cause_log()));
    let mut relation = PrimaFacieRelation::new();
    relation.record("E", "A", window(0.0, 2.0));
    relation.record("E", "B", window(0.0, 2.0));
    relation.record("B", "A", window(0.0, 2.0));

    let rows = engine.average_effect(&relation, "E").data;
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.effect == "E"));
    assert_eq!(engine.average(&relation).data.len(), 3);
}

/// 40 cases, five labels on staggered integer clocks.
fn synthetic_log() -> Vec<(String, String, f64)> {
    let mut records = Vec::new();
    for case in 0..40u32 {
        for step in 0..5u32 {
            if (case + step) % 3 == 0 {
                continue;
            }
            let t = f64::from((case * 7 + step * 3) % 60);
            records.push((format!("case-{case}"), format!("L{step}"), t));
        }
    }
    records
}

fn synthetic_engine(parallel: bool) -> InferenceEngine {
    let records = synthetic_log()
        .into_iter()
        .map(|(case, label, t)| Observation::new(case, label, t));
    InferenceEngine::with_config(
        ObservationIndex::build(records).unwrap(),
        InferenceConfig {
            parallel: Some(parallel),
            ..Default::default()
        },
    )
}

#[test]
fn parallel_and_sequential_runs_agree() {
    let labels = ["L0", "L1", "L2", "L3", "L4"];
    let w = Some(window(1.0, 6.0));

    let sequential = synthetic_engine(false).run(labels, labels, w).unwrap();
    let parallel = synthetic_engine(true).run(labels, labels, w).unwrap();

    assert_eq!(sequential.data.0, parallel.data.0);
    assert_eq!(sequential.data.1, parallel.data.1);
}

#[derive(Default)]
struct CountingHandler {
    started: AtomicUsize,
    tested: AtomicUsize,
    accepted: AtomicUsize,
    computed: AtomicUsize,
    completed: AtomicUsize,
    testing_skipped: AtomicUsize,
}

impl ProgressHandler for CountingHandler {
    fn on_stage_started(&self, _event: &StageStartedEvent) {
        self.started.fetch_add(1, Ordering::SeqCst);
    }

    fn on_hypothesis_tested(&self, event: &HypothesisTestedEvent) {
        self.tested.fetch_add(1, Ordering::SeqCst);
        if event.accepted {
            self.accepted.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn on_epsilon_computed(&self, _event: &EpsilonComputedEvent) {
        self.computed.fetch_add(1, Ordering::SeqCst);
    }

    fn on_stage_complete(&self, event: &StageCompleteEvent) {
        if event.stage == Stage::Testing {
            self.testing_skipped.store(event.skipped, Ordering::SeqCst);
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn progress_handler_sees_every_item() {
    let handler = Arc::new(CountingHandler::default());
    let mut engine = InferenceEngine::new(index(&two_cause_log()));
    engine.register_handler(handler.clone());

    let result = engine
        .run(["A", "B", "Z"], ["E"], Some(window(0.0, 2.0)))
        .unwrap();
    assert_eq!(result.error_count(), 1);

    assert_eq!(handler.started.load(Ordering::SeqCst), 2);
    assert_eq!(handler.tested.load(Ordering::SeqCst), 3);
    assert_eq!(handler.accepted.load(Ordering::SeqCst), 2);
    assert_eq!(handler.computed.load(Ordering::SeqCst), 2);
    assert_eq!(handler.completed.load(Ordering::SeqCst), 2);
    assert_eq!(handler.testing_skipped.load(Ordering::SeqCst), 1);
}

#[test]
fn effect_batches_merge_into_one_relation() {
    let engine = InferenceEngine::new(index(&two_cause_log()));
    let w = Some(window(0.0, 2.0));

    let mut batch_e = PrimaFacieRelation::new();
    engine.test(&engine.generate(["A", "B"], ["E"], w).unwrap(), &mut batch_e);
    let mut batch_b = PrimaFacieRelation::new();
    engine.test(&engine.generate(["A", "E"], ["B"], w).unwrap(), &mut batch_b);

    let mut whole = PrimaFacieRelation::new();
    engine.test(&engine.generate(["A", "B", "E"], ["E", "B"], w).unwrap(), &mut whole);

    let mut merged = batch_e;
    merged.merge(batch_b);
    assert_eq!(merged, whole);
    assert_eq!(merged.effects().next(), Some("E"));
}
