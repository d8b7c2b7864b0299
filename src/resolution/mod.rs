//! Policy and feature resolution for the booking platform.
//!
//! Turns the versioned Foundation/Governance/FeatureFlagSet documents plus a
//! per-request [`ResolutionContext`] into concrete decisions: effective
//! policies, penalty quotes, refund verdicts, flag values, and trust scores.

pub mod context;
pub mod defaults;
pub mod domain;
pub mod evaluation;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use self::context::{ContextValue, ResolutionContext};
pub use self::domain::{
    BetaEligibility, CancellationOverride, CancellationPolicy, Combinator, ConditionKind,
    ConditionOperator, ConditionalLogicTree, FeatureFlag, FeatureFlagSet, FeeType, FlagId,
    Foundation, Governance, Industry, IndustryId, JourneyStage, LogicCondition, PenaltyTier,
    Plan, PlanTier, PriceBucket, QuotaLimit, RefundEligibility, RefundModel, RefundModelOverride,
    RefundModels, RefundProcessing, RefundWindow, RescheduleFee, ReschedulingOverride,
    ReschedulingPolicy, RoleDefinition, RoleId, RolloutPhase, ServiceSubcategory, TargetAudience,
    TrustModel, TrustSignal, VerificationLevel,
};
pub use self::evaluation::{
    EffectiveCancellationPolicy, EffectiveRefundModel, EffectiveReschedulingPolicy, PenaltyQuote,
    RefundVerdict, RescheduleVerdict, ResolutionEngine, ResolutionError, TrustComponent,
    TrustScore,
};
pub use self::service::PolicyResolutionService;
pub use self::store::loader::{ConfigLoader, JsonDocumentLoader, LoadError, StaticLoader};
pub use self::store::validate::ConfigInvalid;
pub use self::store::{ConfigStore, Snapshot};
