use super::common::*;
use crate::resolution::domain::PlanTier;

#[test]
fn plan_without_override_resolves_base_policy() {
    let service = standard_service();
    let base = service
        .resolve_cancellation_policy(&healthcare_context(PlanTier::Advanced))
        .expect("policy resolves");

    assert_eq!(base.free_window_hours, 24.0);
    assert_eq!(base.tiers.len(), 3);
    assert_eq!(base.tiers[0].hours_before_event, 2.0);
    assert_eq!(base.tiers[0].penalty_percentage, 100);
}

#[test]
fn freemium_override_replaces_free_window_only() {
    let service = standard_service();
    let effective = service
        .resolve_cancellation_policy(&healthcare_context(PlanTier::Freemium))
        .expect("policy resolves");

    assert_eq!(effective.free_window_hours, 12.0);
    // Fields absent from the override inherit the base policy.
    let base = service
        .resolve_cancellation_policy(&healthcare_context(PlanTier::Advanced))
        .expect("policy resolves");
    assert_eq!(effective.tiers, base.tiers);
    assert_eq!(effective.refund_eligibility, base.refund_eligibility);
}

#[test]
fn override_tier_lists_replace_wholesale() {
    let service = standard_service();
    let effective = service
        .resolve_cancellation_policy(&healthcare_context(PlanTier::Enterprise))
        .expect("policy resolves");

    assert_eq!(effective.tiers.len(), 3);
    assert_eq!(effective.tiers[0].penalty_percentage, 50);
    assert_eq!(effective.tiers[1].minimum_fee, 10.0);
}

#[test]
fn refund_model_overlays_per_plan() {
    let service = standard_service();

    let default_model = service
        .resolve_refund_model(&healthcare_context(PlanTier::Advanced))
        .expect("model resolves");
    assert_eq!(default_model.windows[0].days, 7);
    assert!(!default_model.processing.automatic);

    let professional = service
        .resolve_refund_model(&healthcare_context(PlanTier::Professional))
        .expect("model resolves");
    assert_eq!(professional.windows[0].days, 14);
    assert!(professional.processing.automatic);
}

#[test]
fn rescheduling_resolves_base_when_no_override_exists() {
    let service = standard_service();
    let policy = service
        .resolve_rescheduling_policy(&healthcare_context(PlanTier::Professional))
        .expect("policy resolves");

    assert_eq!(policy.allowed_changes, 2);
    assert_eq!(policy.time_window_hours, 24.0);
    assert_eq!(policy.fee_structure.len(), 2);
    assert!(policy.restrictions.contains("provider_approval"));
}
