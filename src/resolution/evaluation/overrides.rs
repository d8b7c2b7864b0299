use std::collections::BTreeSet;

use serde::Serialize;

use crate::resolution::domain::{
    CancellationPolicy, PenaltyTier, PlanTier, RefundEligibility, RefundModels, RefundProcessing,
    RefundWindow, RescheduleFee, ReschedulingPolicy,
};

/// Cancellation policy after the caller's plan overlay has been applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveCancellationPolicy {
    pub free_window_hours: f64,
    pub tiers: Vec<PenaltyTier>,
    pub refund_eligibility: RefundEligibility,
}

/// Rescheduling policy after the caller's plan overlay has been applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveReschedulingPolicy {
    pub allowed_changes: u32,
    pub time_window_hours: f64,
    pub fee_structure: Vec<RescheduleFee>,
    pub restrictions: BTreeSet<String>,
}

/// Refund model after the caller's plan overlay has been applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveRefundModel {
    pub windows: Vec<RefundWindow>,
    pub processing: RefundProcessing,
}

// The merge is a shallow field overlay: a field present in the override
// replaces the base field wholesale, and ordered lists are replaced rather
// than concatenated so tier ordering stays unambiguous.

pub(crate) fn effective_cancellation(
    base: &CancellationPolicy,
    plan: PlanTier,
) -> EffectiveCancellationPolicy {
    let overlay = base.plan_overrides.get(&plan);
    EffectiveCancellationPolicy {
        free_window_hours: overlay
            .and_then(|o| o.free_window_hours)
            .unwrap_or(base.free_window_hours),
        tiers: overlay
            .and_then(|o| o.tiers.clone())
            .unwrap_or_else(|| base.tiers.clone()),
        refund_eligibility: overlay
            .and_then(|o| o.refund_eligibility.clone())
            .unwrap_or_else(|| base.refund_eligibility.clone()),
    }
}

pub(crate) fn effective_rescheduling(
    base: &ReschedulingPolicy,
    plan: PlanTier,
) -> EffectiveReschedulingPolicy {
    let overlay = base.plan_overrides.get(&plan);
    EffectiveReschedulingPolicy {
        allowed_changes: overlay
            .and_then(|o| o.allowed_changes)
            .unwrap_or(base.allowed_changes),
        time_window_hours: overlay
            .and_then(|o| o.time_window_hours)
            .unwrap_or(base.time_window_hours),
        fee_structure: overlay
            .and_then(|o| o.fee_structure.clone())
            .unwrap_or_else(|| base.fee_structure.clone()),
        restrictions: overlay
            .and_then(|o| o.restrictions.clone())
            .unwrap_or_else(|| base.restrictions.clone()),
    }
}

pub(crate) fn effective_refund_model(
    models: &RefundModels,
    plan: PlanTier,
) -> EffectiveRefundModel {
    let overlay = models.plan_overrides.get(&plan);
    EffectiveRefundModel {
        windows: overlay
            .and_then(|o| o.windows.clone())
            .unwrap_or_else(|| models.default.windows.clone()),
        processing: overlay
            .and_then(|o| o.processing)
            .unwrap_or(models.default.processing),
    }
}
