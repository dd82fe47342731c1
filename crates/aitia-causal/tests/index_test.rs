//! Tests for the observation index.

use aitia_causal::ObservationIndex;
use aitia_core::errors::SchemaError;
use aitia_core::Observation;

fn obs(case: &str, label: &str, t: f64) -> Observation {
    Observation::new(case, label, t)
}

fn sample() -> ObservationIndex {
    ObservationIndex::build(vec![
        obs("k1", "Create Fine", 3.0),
        obs("k1", "Send Fine", 1.0),
        obs("k2", "Create Fine", 1.0),
        obs("k2", "Create Fine", 1.0),
        obs("k3", "Payment", 7.5),
    ])
    .unwrap()
}

#[test]
fn alphabet_keeps_first_seen_order() {
    let index = sample();
    assert_eq!(index.alphabet(), ["Create Fine", "Send Fine", "Payment"]);
    assert!(index.contains_label("Payment"));
    assert!(!index.contains_label("Appeal"));
}

#[test]
fn counts_every_record_and_tracks_max_time() {
    let index = sample();
    assert_eq!(index.event_count(), 5);
    assert_eq!(index.max_time(), 7.5);
    assert_eq!(index.case_count(), 3);
}

#[test]
fn max_time_is_the_true_maximum_not_the_last_record() {
    let index = ObservationIndex::build(vec![obs("a", "X", 9.0), obs("b", "Y", 2.0)]).unwrap();
    assert_eq!(index.max_time(), 9.0);
}

#[test]
fn timeline_is_sorted_and_keeps_duplicates() {
    let index = sample();
    let timeline = index.timeline("Create Fine").unwrap();

    let times: Vec<f64> = timeline.iter().map(|(t, _)| t).collect();
    assert_eq!(times, vec![1.0, 3.0]);
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline.occurrence_count(), 3);

    let at_one: Vec<&str> = timeline
        .cases_at(1.0)
        .unwrap()
        .iter()
        .map(|&c| index.resolve_case(c))
        .collect();
    assert_eq!(at_one, vec!["k2", "k2"]);
}

#[test]
fn unknown_label_has_no_timeline() {
    let index = sample();
    assert!(index.timeline("Appeal").is_none());
}

#[test]
fn between_is_inclusive_and_empty_when_inverted() {
    let index = sample();
    let timeline = index.timeline("Create Fine").unwrap();
    assert_eq!(timeline.between(1.0, 3.0).count(), 2);
    assert_eq!(timeline.between(1.5, 2.5).count(), 0);
    assert_eq!(timeline.between(3.0, 1.0).count(), 0);
    assert_eq!(timeline.between(f64::NAN, 3.0).count(), 0);
}

#[test]
fn case_ids_round_trip_through_the_interner() {
    let index = sample();
    let k3 = index.case_id("k3").unwrap();
    assert_eq!(index.resolve_case(k3), "k3");
    assert!(index.case_id("k9").is_none());
}

#[test]
fn time_major_view_lists_records_per_timestamp() {
    let index = sample();
    let stamps: Vec<f64> = index.timestamps().collect();
    assert_eq!(stamps, vec![1.0, 3.0, 7.5]);

    let at_one: Vec<(&str, &str)> = index.observations_at(1.0).collect();
    assert_eq!(
        at_one,
        vec![("k1", "Send Fine"), ("k2", "Create Fine"), ("k2", "Create Fine")]
    );
    assert_eq!(index.observations_at(2.0).count(), 0);
}

#[test]
fn false_times_are_timestamps_without_the_label() {
    let index = sample();
    assert_eq!(index.false_times("Send Fine"), vec![3.0, 7.5]);
    assert_eq!(index.false_times("Create Fine"), vec![7.5]);
    assert_eq!(index.false_times("Appeal"), vec![1.0, 3.0, 7.5]);
}

#[test]
fn empty_index_has_zero_max_time() {
    let index = ObservationIndex::build(Vec::new()).unwrap();
    assert_eq!(index.event_count(), 0);
    assert_eq!(index.max_time(), 0.0);
    assert!(index.alphabet().is_empty());
}

#[test]
fn rejects_empty_fields_with_their_row() {
    let err = ObservationIndex::build(vec![obs("a", "X", 1.0), obs("", "X", 2.0)]).unwrap_err();
    assert!(matches!(
        err,
        SchemaError::MissingField {
            row: 2,
            field: "case_id"
        }
    ));

    let err = ObservationIndex::build(vec![obs("a", "", 1.0)]).unwrap_err();
    assert!(matches!(
        err,
        SchemaError::MissingField {
            row: 1,
            field: "label"
        }
    ));
}

#[test]
fn rejects_non_finite_timestamps() {
    let err = ObservationIndex::build(vec![obs("a", "X", f64::INFINITY)]).unwrap_err();
    assert!(matches!(err, SchemaError::InvalidTimestamp { row: 1, .. }));
}
