use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Identifier wrapper for industries defined in the Foundation document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IndustryId(pub String);

/// Identifier wrapper for console roles defined in the Foundation document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoleId(pub String);

/// Identifier wrapper for feature flags.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FlagId(pub String);

/// Vertical served by the platform, owning its service taxonomy and price bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Industry {
    pub id: IndustryId,
    pub name: String,
    pub subcategories: Vec<ServiceSubcategory>,
    pub price_buckets: Vec<PriceBucket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSubcategory {
    pub id: String,
    pub name: String,
}

/// Price band used by listings in an industry; `max` is open-ended when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBucket {
    pub label: String,
    pub min: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

/// Ordered subscription tiers; the derived ordering backs tier comparisons.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    Freemium,
    Advanced,
    Professional,
    Enterprise,
}

impl PlanTier {
    pub const fn label(self) -> &'static str {
        match self {
            PlanTier::Freemium => "freemium",
            PlanTier::Advanced => "advanced",
            PlanTier::Professional => "professional",
            PlanTier::Enterprise => "enterprise",
        }
    }
}

/// Quota resolved from a plan's `limits` table, where `-1` encodes "unlimited".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaLimit {
    Unlimited,
    Capped(u64),
}

/// Subscription plan with quota limits and a feature entitlement set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub tier: PlanTier,
    pub priority: u8,
    pub limits: BTreeMap<String, i64>,
    pub features: BTreeSet<String>,
}

impl Plan {
    /// Resolve a named quota; negative configured values mean unlimited.
    pub fn limit(&self, key: &str) -> Option<QuotaLimit> {
        self.limits.get(key).map(|raw| {
            if *raw < 0 {
                QuotaLimit::Unlimited
            } else {
                QuotaLimit::Capped(*raw as u64)
            }
        })
    }
}

/// Console role available to a deployment (customer, provider, staff, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    pub id: RoleId,
    pub name: String,
}

/// Stage of the user journey used by flag gating and audience targeting.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum JourneyStage {
    Discovery,
    Onboarding,
    Active,
    Retention,
}

impl JourneyStage {
    pub const fn label(self) -> &'static str {
        match self {
            JourneyStage::Discovery => "discovery",
            JourneyStage::Onboarding => "onboarding",
            JourneyStage::Active => "active",
            JourneyStage::Retention => "retention",
        }
    }
}

/// Immutable Foundation document: industries, plans, and roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Foundation {
    pub industries: Vec<Industry>,
    pub plans: Vec<Plan>,
    pub roles: Vec<RoleDefinition>,
}

impl Foundation {
    pub fn industry(&self, id: &IndustryId) -> Option<&Industry> {
        self.industries.iter().find(|industry| industry.id == *id)
    }

    pub fn plan(&self, tier: PlanTier) -> Option<&Plan> {
        self.plans.iter().find(|plan| plan.tier == tier)
    }

    pub fn role(&self, id: &RoleId) -> Option<&RoleDefinition> {
        self.roles.iter().find(|role| role.id == *id)
    }
}

/// Penalty band applied when a booking is cancelled inside the free window.
///
/// A tier with `hours_before_event = h` covers cancellations between the
/// previous tier's threshold (exclusive) and `h` (inclusive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyTier {
    pub hours_before_event: f64,
    pub penalty_percentage: u8,
    pub minimum_fee: f64,
}

/// Refund eligibility attached to a cancellation policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundEligibility {
    pub time_window_hours: f64,
    #[serde(default)]
    pub conditions: BTreeSet<String>,
    #[serde(default)]
    pub exceptions: BTreeSet<String>,
}

/// Base cancellation policy for one industry plus plan-partial overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancellationPolicy {
    pub free_window_hours: f64,
    pub tiers: Vec<PenaltyTier>,
    pub refund_eligibility: RefundEligibility,
    #[serde(default)]
    pub plan_overrides: BTreeMap<PlanTier, CancellationOverride>,
}

/// Plan-partial cancellation override; absent fields inherit the base policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CancellationOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_window_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiers: Option<Vec<PenaltyTier>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_eligibility: Option<RefundEligibility>,
}

/// How a rescheduling fee is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeType {
    Flat,
    PercentOfBooking,
}

/// Fee owed for the n-th rescheduling attempt (1-based).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RescheduleFee {
    pub change_number: u32,
    pub fee: f64,
    pub fee_type: FeeType,
}

/// Base rescheduling policy for one industry plus plan-partial overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReschedulingPolicy {
    pub allowed_changes: u32,
    pub time_window_hours: f64,
    pub fee_structure: Vec<RescheduleFee>,
    #[serde(default)]
    pub restrictions: BTreeSet<String>,
    #[serde(default)]
    pub plan_overrides: BTreeMap<PlanTier, ReschedulingOverride>,
}

/// Plan-partial rescheduling override; absent fields inherit the base policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReschedulingOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_changes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_window_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_structure: Option<Vec<RescheduleFee>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrictions: Option<BTreeSet<String>>,
}

/// Refund window: eligible while `days` since purchase has not been exceeded.
///
/// An empty `conditions` set accepts any cancellation reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundWindow {
    pub days: u32,
    pub percentage: u8,
    #[serde(default)]
    pub conditions: BTreeSet<String>,
}

/// Operational refund handling metadata; informational for verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundProcessing {
    pub automatic: bool,
    pub review_required: bool,
    pub timeframe_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundModel {
    pub windows: Vec<RefundWindow>,
    pub processing: RefundProcessing,
}

/// Plan-partial refund override; absent fields inherit the default model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefundModelOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windows: Option<Vec<RefundWindow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing: Option<RefundProcessing>,
}

/// Refund models: one platform default overlaid per plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundModels {
    pub default: RefundModel,
    #[serde(default)]
    pub plan_overrides: BTreeMap<PlanTier, RefundModelOverride>,
}

/// Weighted trust signal; `calculation` names an entry in the closed
/// normalization registry, never executable configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustSignal {
    pub id: String,
    pub weight: f64,
    pub calculation: String,
}

/// Verification level recommended once a score clears `threshold`.
///
/// `requirements` are informational gates checked by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationLevel {
    pub id: String,
    pub threshold: f64,
    #[serde(default)]
    pub requirements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustModel {
    pub signals: Vec<TrustSignal>,
    pub levels: Vec<VerificationLevel>,
}

/// Immutable Governance document: policies, refund models, trust model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Governance {
    pub cancellation: BTreeMap<IndustryId, CancellationPolicy>,
    pub rescheduling: BTreeMap<IndustryId, ReschedulingPolicy>,
    pub refunds: RefundModels,
    pub trust: TrustModel,
}

/// Audience selector for globally rolled-out flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetAudience {
    All,
    NewUsers,
    ReturningUsers,
    Enterprise,
}

/// Release phase for beta flags; ordering follows the release pipeline.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RolloutPhase {
    Alpha,
    Beta,
    Rc,
    Stable,
}

/// Inclusion lists a caller must satisfy on every dimension to see a beta flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BetaEligibility {
    pub plans: BTreeSet<PlanTier>,
    pub roles: BTreeSet<RoleId>,
    pub stages: BTreeSet<JourneyStage>,
}

/// Feature flag variants; evaluation dispatches exhaustively over the kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureFlag {
    Global {
        enabled: bool,
        rollout_percentage: u8,
        target_audience: TargetAudience,
    },
    Tiered {
        #[serde(default)]
        plan_access: BTreeMap<PlanTier, bool>,
        #[serde(default)]
        role_access: BTreeMap<RoleId, bool>,
        #[serde(default)]
        stage_access: BTreeMap<JourneyStage, bool>,
    },
    Beta {
        eligibility: BetaEligibility,
        rollout_phase: RolloutPhase,
    },
}

/// Combinator applied across every condition in a logic tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Combinator {
    All,
    Any,
}

/// Where a condition's `field` is looked up in the resolution context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    Dimension,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    Contains,
    GreaterThan,
    LessThan,
}

/// Single predicate of a conditional feature gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicCondition {
    pub kind: ConditionKind,
    pub field: String,
    pub operator: ConditionOperator,
    pub value: crate::resolution::context::ContextValue,
}

/// Named feature gate: a flat condition list under one combinator, with a
/// `fallback` returned only when no condition could be resolved at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalLogicTree {
    pub combinator: Combinator,
    pub conditions: Vec<LogicCondition>,
    pub fallback: bool,
}

/// Immutable FeatureFlagSet document: flags plus named conditional gates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureFlagSet {
    pub flags: BTreeMap<FlagId, FeatureFlag>,
    #[serde(default)]
    pub gates: BTreeMap<String, ConditionalLogicTree>,
}
