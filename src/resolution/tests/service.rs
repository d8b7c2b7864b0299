use std::sync::Arc;

use super::common::*;
use crate::resolution::domain::{IndustryId, PlanTier, RoleId};
use crate::resolution::evaluation::ResolutionError;
use crate::resolution::service::PolicyResolutionService;
use crate::resolution::store::loader::LoadError;

#[test]
fn bootstrap_rejects_invalid_documents() {
    let result = service_with(|_, governance, _| {
        governance.trust.signals.clear();
    });
    assert!(matches!(result, Err(LoadError::Invalid(_))));
}

#[test]
fn service_reports_the_active_snapshot_version() {
    let service = standard_service();
    assert_eq!(service.snapshot_version(), 1);
}

#[test]
fn reload_through_the_service_bumps_the_version() {
    let loader = Arc::new(MutableLoader::standard());
    let service = PolicyResolutionService::bootstrap(loader).expect("bootstrap succeeds");
    let version = service.reload().expect("reload succeeds");
    assert_eq!(version, 2);
    assert_eq!(service.snapshot_version(), 2);
}

#[test]
fn unknown_industry_is_rejected_per_request() {
    let service = standard_service();
    let mut ctx = context("aviation", PlanTier::Advanced);
    ctx.hours_before_event = Some(5.0);
    let err = service
        .quote_penalty(&ctx, 100.0)
        .expect_err("unknown industry rejected");
    assert!(matches!(err, ResolutionError::UnknownIndustry(_)));
}

#[test]
fn unknown_role_is_rejected_per_request() {
    let service = standard_service();
    let mut ctx = healthcare_context(PlanTier::Advanced);
    ctx.role = RoleId("janitor".to_string());
    let err = service
        .resolve_cancellation_policy(&ctx)
        .expect_err("unknown role rejected");
    assert!(matches!(err, ResolutionError::UnknownRole(_)));
}

#[test]
fn plans_absent_from_the_foundation_are_rejected() {
    let service = service_with(|foundation, governance, _| {
        foundation
            .plans
            .retain(|plan| plan.tier != PlanTier::Freemium);
        // Drop the freemium references so the edit still validates.
        for policy in governance.cancellation.values_mut() {
            policy.plan_overrides.remove(&PlanTier::Freemium);
        }
    })
    .expect("edited documents validate");

    let err = service
        .resolve_cancellation_policy(&healthcare_context(PlanTier::Freemium))
        .expect_err("unknown plan rejected");
    assert!(matches!(err, ResolutionError::UnknownPlan(_)));
}

#[test]
fn industries_without_policies_are_reported_as_missing() {
    let service = service_with(|_, governance, _| {
        governance
            .rescheduling
            .remove(&IndustryId("wellness".to_string()));
    })
    .expect("edited documents validate");

    let mut ctx = context("wellness", PlanTier::Advanced);
    ctx.hours_before_event = Some(12.0);
    ctx.change_number = Some(1);
    let err = service
        .evaluate_reschedule(&ctx)
        .expect_err("missing policy reported");
    assert!(matches!(
        err,
        ResolutionError::MissingPolicy {
            scope: "rescheduling",
            ..
        }
    ));
}

#[test]
fn one_engine_pins_one_snapshot_for_its_lifetime() {
    let loader = Arc::new(MutableLoader::standard());
    let service = PolicyResolutionService::bootstrap(loader).expect("bootstrap succeeds");

    let engine = service.engine();
    service.reload().expect("reload succeeds");

    assert_eq!(engine.snapshot().version, 1);
    assert_eq!(service.engine().snapshot().version, 2);
}
