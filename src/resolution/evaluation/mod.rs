mod conditions;
mod flags;
mod overrides;
mod penalty;
mod refund;
mod reschedule;
mod rollout;
pub(crate) mod trust;

pub use self::overrides::{
    EffectiveCancellationPolicy, EffectiveRefundModel, EffectiveReschedulingPolicy,
};
pub use self::penalty::PenaltyQuote;
pub use self::refund::RefundVerdict;
pub use self::reschedule::RescheduleVerdict;
pub use self::trust::{TrustComponent, TrustScore};

use std::collections::BTreeMap;
use std::sync::Arc;

use super::context::ResolutionContext;
use super::domain::FlagId;
use super::store::Snapshot;

/// Caller errors surfaced by the evaluation interface.
///
/// Returned as values, never panicked: query volume is high and a bad
/// context must not take the evaluation path down.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolutionError {
    #[error("unknown industry '{0}' in resolution context")]
    UnknownIndustry(String),
    #[error("unknown plan '{0}' in resolution context")]
    UnknownPlan(&'static str),
    #[error("unknown role '{0}' in resolution context")]
    UnknownRole(String),
    #[error("unknown feature flag '{0}'")]
    UnknownFlag(String),
    #[error("unknown feature gate '{0}'")]
    UnknownGate(String),
    #[error("no {scope} policy configured for industry '{industry}'")]
    MissingPolicy {
        scope: &'static str,
        industry: String,
    },
    #[error("hours before event must be non-negative, got {0}")]
    NegativeHours(f64),
    #[error("elapsed days must be non-negative, got {0}")]
    NegativeDays(f64),
    #[error("base fee must be non-negative, got {0}")]
    NegativeFee(f64),
    #[error("change numbers are 1-based; 0 is not a valid attempt")]
    ZeroChangeNumber,
    #[error("resolution context is missing required value '{0}'")]
    MissingDimension(&'static str),
}

/// Stateless evaluator bound to one immutable configuration snapshot.
///
/// Every method is a pure function of the snapshot and its arguments, so an
/// engine can be shared across concurrent callers without locking.
pub struct ResolutionEngine {
    snapshot: Arc<Snapshot>,
}

impl ResolutionEngine {
    pub fn new(snapshot: Arc<Snapshot>) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Merge the industry's base cancellation policy with the caller's plan
    /// override into one effective policy.
    pub fn resolve_cancellation_policy(
        &self,
        context: &ResolutionContext,
    ) -> Result<EffectiveCancellationPolicy, ResolutionError> {
        self.check_dimensions(context)?;
        let policy = self
            .snapshot
            .governance
            .cancellation
            .get(&context.industry)
            .ok_or_else(|| ResolutionError::MissingPolicy {
                scope: "cancellation",
                industry: context.industry.0.clone(),
            })?;
        Ok(overrides::effective_cancellation(policy, context.plan))
    }

    pub fn resolve_rescheduling_policy(
        &self,
        context: &ResolutionContext,
    ) -> Result<EffectiveReschedulingPolicy, ResolutionError> {
        self.check_dimensions(context)?;
        let policy = self
            .snapshot
            .governance
            .rescheduling
            .get(&context.industry)
            .ok_or_else(|| ResolutionError::MissingPolicy {
                scope: "rescheduling",
                industry: context.industry.0.clone(),
            })?;
        Ok(overrides::effective_rescheduling(policy, context.plan))
    }

    pub fn resolve_refund_model(
        &self,
        context: &ResolutionContext,
    ) -> Result<EffectiveRefundModel, ResolutionError> {
        self.check_dimensions(context)?;
        Ok(overrides::effective_refund_model(
            &self.snapshot.governance.refunds,
            context.plan,
        ))
    }

    /// Quote the cancellation penalty owed at `context.hours_before_event`.
    pub fn quote_penalty(
        &self,
        context: &ResolutionContext,
        base_fee: f64,
    ) -> Result<PenaltyQuote, ResolutionError> {
        let policy = self.resolve_cancellation_policy(context)?;
        let hours = context
            .hours_before_event
            .ok_or(ResolutionError::MissingDimension("hours_before_event"))?;
        penalty::quote_penalty(&policy, hours, base_fee)
    }

    /// Decide refund eligibility for a cancellation reason after
    /// `context.elapsed_days` since purchase.
    pub fn evaluate_refund(
        &self,
        context: &ResolutionContext,
        reason: &str,
    ) -> Result<RefundVerdict, ResolutionError> {
        let model = self.resolve_refund_model(context)?;
        let elapsed_days = context
            .elapsed_days
            .ok_or(ResolutionError::MissingDimension("elapsed_days"))?;
        refund::evaluate_refund(&model, reason, elapsed_days)
    }

    /// Decide whether the caller's n-th rescheduling attempt is allowed and
    /// what it costs.
    pub fn evaluate_reschedule(
        &self,
        context: &ResolutionContext,
    ) -> Result<RescheduleVerdict, ResolutionError> {
        let policy = self.resolve_rescheduling_policy(context)?;
        let hours = context
            .hours_before_event
            .ok_or(ResolutionError::MissingDimension("hours_before_event"))?;
        let change_number = context
            .change_number
            .ok_or(ResolutionError::MissingDimension("change_number"))?;
        reschedule::evaluate_reschedule(&policy, hours, change_number)
    }

    /// Evaluate a feature flag for the caller's dimensions.
    pub fn evaluate_flag(
        &self,
        flag_id: &FlagId,
        context: &ResolutionContext,
    ) -> Result<bool, ResolutionError> {
        self.check_dimensions(context)?;
        let flag = self
            .snapshot
            .flags
            .flags
            .get(flag_id)
            .ok_or_else(|| ResolutionError::UnknownFlag(flag_id.0.clone()))?;
        Ok(flags::evaluate_flag(flag_id, flag, context))
    }

    /// Evaluate a named conditional gate against the context.
    pub fn evaluate_gate(
        &self,
        gate_id: &str,
        context: &ResolutionContext,
    ) -> Result<bool, ResolutionError> {
        self.check_dimensions(context)?;
        let tree = self
            .snapshot
            .flags
            .gates
            .get(gate_id)
            .ok_or_else(|| ResolutionError::UnknownGate(gate_id.to_string()))?;
        Ok(conditions::evaluate_tree(gate_id, tree, context))
    }

    /// Combine the snapshot's weighted trust signals over the supplied
    /// measurements into a score and recommended verification level.
    pub fn score_trust(&self, measurements: &BTreeMap<String, f64>) -> TrustScore {
        trust::score(&self.snapshot.governance.trust, measurements)
    }

    fn check_dimensions(&self, context: &ResolutionContext) -> Result<(), ResolutionError> {
        let foundation = &self.snapshot.foundation;
        if foundation.industry(&context.industry).is_none() {
            return Err(ResolutionError::UnknownIndustry(context.industry.0.clone()));
        }
        if foundation.plan(context.plan).is_none() {
            return Err(ResolutionError::UnknownPlan(context.plan.label()));
        }
        if foundation.role(&context.role).is_none() {
            return Err(ResolutionError::UnknownRole(context.role.0.clone()));
        }
        Ok(())
    }
}
