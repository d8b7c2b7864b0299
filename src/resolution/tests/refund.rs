use super::common::*;
use crate::resolution::domain::PlanTier;
use crate::resolution::evaluation::ResolutionError;

fn verdict(plan: PlanTier, days: f64, reason: &str) -> crate::resolution::RefundVerdict {
    let service = standard_service();
    let mut context = healthcare_context(plan);
    context.elapsed_days = Some(days);
    service
        .evaluate_refund(&context, reason)
        .expect("verdict produced")
}

#[test]
fn early_cancellation_refunds_in_full_for_any_reason() {
    let result = verdict(PlanTier::Advanced, 5.0, "changed_mind");
    assert!(result.eligible);
    assert_eq!(result.percentage, 100);
    assert!(!result.automatic);
}

#[test]
fn later_window_requires_a_listed_reason() {
    let accepted = verdict(PlanTier::Advanced, 20.0, "provider_cancelled");
    assert!(accepted.eligible);
    assert_eq!(accepted.percentage, 50);

    let rejected = verdict(PlanTier::Advanced, 20.0, "changed_mind");
    assert!(!rejected.eligible);
    assert_eq!(rejected.percentage, 0);
}

#[test]
fn earliest_satisfying_window_wins() {
    // Both windows cover 6.5 days for this reason; the 7-day window is the
    // smallest `days` that still covers the elapsed value, so 100% applies.
    let result = verdict(PlanTier::Advanced, 6.5, "provider_cancelled");
    assert_eq!(result.percentage, 100);
}

#[test]
fn professional_plan_gets_its_overridden_windows() {
    let result = verdict(PlanTier::Professional, 10.0, "changed_mind");
    assert!(result.eligible);
    assert_eq!(result.percentage, 100);
    assert!(result.automatic);
}

#[test]
fn no_window_matches_after_all_expire() {
    let result = verdict(PlanTier::Advanced, 40.0, "provider_cancelled");
    assert!(!result.eligible);
    assert_eq!(result.percentage, 0);
}

#[test]
fn negative_elapsed_days_are_rejected() {
    let service = standard_service();
    let mut context = healthcare_context(PlanTier::Advanced);
    context.elapsed_days = Some(-2.0);
    let err = service
        .evaluate_refund(&context, "changed_mind")
        .expect_err("negative days rejected");
    assert!(matches!(err, ResolutionError::NegativeDays(_)));
}
