use std::collections::BTreeMap;

use super::common::*;

fn measurements(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(id, value)| ((*id).to_string(), *value))
        .collect()
}

#[test]
fn complete_profile_scores_trusted() {
    let service = standard_service();
    let score = service.score_trust(&measurements(&[
        ("completion_rate", 0.95),
        ("response_time_hours", 2.0),
        ("review_volume", 40.0),
    ]));

    assert!(score.score > 0.8 && score.score <= 1.0);
    assert_eq!(score.level.as_deref(), Some("trusted"));
    assert!(score
        .requirements
        .iter()
        .any(|req| req == "payout_account_verified"));
    assert_eq!(score.components.len(), 3);
    assert!(score.components.iter().all(|component| component.measured));
}

#[test]
fn missing_measurements_penalize_rather_than_skip() {
    let service = standard_service();
    let full = service.score_trust(&measurements(&[
        ("completion_rate", 0.95),
        ("response_time_hours", 2.0),
        ("review_volume", 40.0),
    ]));
    let partial = service.score_trust(&measurements(&[
        ("completion_rate", 0.95),
        ("response_time_hours", 2.0),
    ]));

    assert!(partial.score < full.score);
    let missing = partial
        .components
        .iter()
        .find(|component| component.signal_id == "review_volume")
        .expect("component reported");
    assert!(!missing.measured);
    assert_eq!(missing.normalized, 0.0);
}

#[test]
fn empty_measurements_score_zero_at_the_basic_level() {
    let service = standard_service();
    let score = service.score_trust(&BTreeMap::new());
    assert_eq!(score.score, 0.0);
    assert_eq!(score.level.as_deref(), Some("basic"));
    assert!(score.requirements.is_empty());
}

#[test]
fn out_of_range_measurements_are_clamped() {
    let service = standard_service();
    let score = service.score_trust(&measurements(&[
        ("completion_rate", 5.0),
        ("response_time_hours", -10.0),
        ("review_volume", 1_000_000.0),
    ]));
    assert!(score.score <= 1.0);
    assert!(score
        .components
        .iter()
        .all(|component| (0.0..=1.0).contains(&component.normalized)));
}

#[test]
fn slow_responders_score_below_fast_ones() {
    let service = standard_service();
    let fast = service.score_trust(&measurements(&[("response_time_hours", 1.0)]));
    let slow = service.score_trust(&measurements(&[("response_time_hours", 48.0)]));
    assert!(fast.score > slow.score);
}
