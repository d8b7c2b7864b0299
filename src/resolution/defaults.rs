//! Built-in standard documents seeded from the platform defaults, used by
//! the static loader, demos, and tests.

use std::collections::{BTreeMap, BTreeSet};

use super::context::ContextValue;
use super::domain::{
    BetaEligibility, CancellationOverride, CancellationPolicy, Combinator, ConditionKind,
    ConditionOperator, ConditionalLogicTree, FeatureFlag, FeatureFlagSet, FeeType, FlagId,
    Foundation, Governance, Industry, IndustryId, JourneyStage, LogicCondition, PenaltyTier,
    Plan, PlanTier, PriceBucket, RefundEligibility, RefundModel, RefundModelOverride,
    RefundModels, RefundProcessing, RefundWindow, RescheduleFee, ReschedulingPolicy,
    RoleDefinition, RoleId, RolloutPhase, ServiceSubcategory, TargetAudience, TrustModel,
    TrustSignal, VerificationLevel,
};

pub fn standard_foundation() -> Foundation {
    Foundation {
        industries: vec![
            industry(
                "healthcare",
                "Healthcare & Clinics",
                &[("general_practice", "General Practice"), ("dental", "Dental")],
            ),
            industry(
                "wellness",
                "Wellness & Fitness",
                &[("personal_training", "Personal Training"), ("spa", "Spa & Massage")],
            ),
            industry(
                "home_services",
                "Home Services",
                &[("cleaning", "Cleaning"), ("repairs", "Repairs")],
            ),
        ],
        plans: vec![
            plan(PlanTier::Freemium, 0, 5, &[]),
            plan(PlanTier::Advanced, 1, 50, &["calendar_sync"]),
            plan(
                PlanTier::Professional,
                2,
                500,
                &["calendar_sync", "custom_branding"],
            ),
            plan(
                PlanTier::Enterprise,
                3,
                -1,
                &["calendar_sync", "custom_branding", "dedicated_support"],
            ),
        ],
        roles: vec![
            role("customer", "Customer"),
            role("provider", "Service Provider"),
            role("staff", "Staff Member"),
            role("admin", "Platform Admin"),
        ],
    }
}

pub fn standard_governance() -> Governance {
    Governance {
        cancellation: BTreeMap::from([
            (
                IndustryId("healthcare".to_string()),
                CancellationPolicy {
                    free_window_hours: 24.0,
                    tiers: vec![
                        penalty_tier(2.0, 100, 50.0),
                        penalty_tier(12.0, 50, 25.0),
                        penalty_tier(24.0, 0, 0.0),
                    ],
                    refund_eligibility: refund_eligibility(
                        48.0,
                        &["provider_cancelled", "medical_emergency"],
                        &["repeated_no_show"],
                    ),
                    plan_overrides: BTreeMap::from([
                        (
                            PlanTier::Freemium,
                            CancellationOverride {
                                free_window_hours: Some(12.0),
                                ..CancellationOverride::default()
                            },
                        ),
                        (
                            PlanTier::Enterprise,
                            CancellationOverride {
                                tiers: Some(vec![
                                    penalty_tier(2.0, 50, 25.0),
                                    penalty_tier(12.0, 25, 10.0),
                                    penalty_tier(24.0, 0, 0.0),
                                ]),
                                ..CancellationOverride::default()
                            },
                        ),
                    ]),
                },
            ),
            (
                IndustryId("wellness".to_string()),
                CancellationPolicy {
                    free_window_hours: 12.0,
                    tiers: vec![penalty_tier(4.0, 75, 15.0), penalty_tier(12.0, 25, 5.0)],
                    refund_eligibility: refund_eligibility(24.0, &["provider_cancelled"], &[]),
                    plan_overrides: BTreeMap::new(),
                },
            ),
            (
                IndustryId("home_services".to_string()),
                CancellationPolicy {
                    free_window_hours: 48.0,
                    tiers: vec![
                        penalty_tier(6.0, 100, 75.0),
                        penalty_tier(24.0, 50, 40.0),
                        penalty_tier(48.0, 20, 20.0),
                    ],
                    refund_eligibility: refund_eligibility(
                        72.0,
                        &["provider_cancelled", "weather"],
                        &[],
                    ),
                    plan_overrides: BTreeMap::new(),
                },
            ),
        ]),
        rescheduling: BTreeMap::from([
            (
                IndustryId("healthcare".to_string()),
                ReschedulingPolicy {
                    allowed_changes: 2,
                    time_window_hours: 24.0,
                    fee_structure: vec![
                        reschedule_fee(1, 0.0, FeeType::Flat),
                        reschedule_fee(2, 15.0, FeeType::Flat),
                    ],
                    restrictions: string_set(&["provider_approval"]),
                    plan_overrides: BTreeMap::new(),
                },
            ),
            (
                IndustryId("wellness".to_string()),
                ReschedulingPolicy {
                    allowed_changes: 3,
                    time_window_hours: 6.0,
                    fee_structure: vec![
                        reschedule_fee(1, 0.0, FeeType::Flat),
                        reschedule_fee(2, 10.0, FeeType::Flat),
                        reschedule_fee(3, 20.0, FeeType::Flat),
                    ],
                    restrictions: BTreeSet::new(),
                    plan_overrides: BTreeMap::new(),
                },
            ),
            (
                IndustryId("home_services".to_string()),
                ReschedulingPolicy {
                    allowed_changes: 1,
                    time_window_hours: 48.0,
                    fee_structure: vec![reschedule_fee(1, 10.0, FeeType::PercentOfBooking)],
                    restrictions: BTreeSet::new(),
                    plan_overrides: BTreeMap::new(),
                },
            ),
        ]),
        refunds: RefundModels {
            default: RefundModel {
                windows: vec![
                    refund_window(7, 100, &[]),
                    refund_window(30, 50, &["provider_cancelled", "medical_emergency"]),
                ],
                processing: RefundProcessing {
                    automatic: false,
                    review_required: true,
                    timeframe_days: 10,
                },
            },
            plan_overrides: BTreeMap::from([
                (
                    PlanTier::Professional,
                    RefundModelOverride {
                        windows: Some(vec![
                            refund_window(14, 100, &[]),
                            refund_window(45, 75, &["provider_cancelled", "medical_emergency"]),
                        ]),
                        processing: Some(RefundProcessing {
                            automatic: true,
                            review_required: false,
                            timeframe_days: 5,
                        }),
                    },
                ),
                (
                    PlanTier::Enterprise,
                    RefundModelOverride {
                        windows: Some(vec![
                            refund_window(30, 100, &[]),
                            refund_window(60, 80, &["provider_cancelled", "medical_emergency"]),
                        ]),
                        processing: Some(RefundProcessing {
                            automatic: true,
                            review_required: false,
                            timeframe_days: 3,
                        }),
                    },
                ),
            ]),
        },
        trust: TrustModel {
            signals: vec![
                trust_signal("completion_rate", 0.4, "ratio"),
                trust_signal("response_time_hours", 0.3, "inverse_exponential_hours"),
                trust_signal("review_volume", 0.3, "saturating_count"),
            ],
            levels: vec![
                verification_level("basic", 0.0, &[]),
                verification_level("verified", 0.5, &["identity_verified"]),
                verification_level(
                    "trusted",
                    0.8,
                    &["identity_verified", "payout_account_verified"],
                ),
            ],
        },
    }
}

pub fn standard_feature_flags() -> FeatureFlagSet {
    FeatureFlagSet {
        flags: BTreeMap::from([
            (
                FlagId("instant_payouts".to_string()),
                FeatureFlag::Global {
                    enabled: true,
                    rollout_percentage: 50,
                    target_audience: TargetAudience::All,
                },
            ),
            (
                FlagId("provider_analytics".to_string()),
                FeatureFlag::Global {
                    enabled: true,
                    rollout_percentage: 100,
                    target_audience: TargetAudience::ReturningUsers,
                },
            ),
            (
                FlagId("ai_scheduling".to_string()),
                FeatureFlag::Tiered {
                    plan_access: BTreeMap::from([
                        (PlanTier::Professional, true),
                        (PlanTier::Enterprise, true),
                    ]),
                    role_access: BTreeMap::from([
                        (RoleId("provider".to_string()), true),
                        (RoleId("staff".to_string()), true),
                    ]),
                    stage_access: BTreeMap::from([
                        (JourneyStage::Onboarding, true),
                        (JourneyStage::Active, true),
                        (JourneyStage::Retention, true),
                    ]),
                },
            ),
            (
                FlagId("group_bookings".to_string()),
                FeatureFlag::Beta {
                    eligibility: BetaEligibility {
                        plans: BTreeSet::from([PlanTier::Professional, PlanTier::Enterprise]),
                        roles: BTreeSet::from([RoleId("provider".to_string())]),
                        stages: BTreeSet::from([JourneyStage::Active, JourneyStage::Retention]),
                    },
                    rollout_phase: RolloutPhase::Beta,
                },
            ),
        ]),
        gates: BTreeMap::from([
            (
                "priority_support".to_string(),
                ConditionalLogicTree {
                    combinator: Combinator::Any,
                    conditions: vec![
                        dimension_equals("plan", "professional"),
                        dimension_equals("plan", "enterprise"),
                    ],
                    fallback: false,
                },
            ),
            (
                "high_value_booking".to_string(),
                ConditionalLogicTree {
                    combinator: Combinator::All,
                    conditions: vec![
                        LogicCondition {
                            kind: ConditionKind::Custom,
                            field: "booking_value".to_string(),
                            operator: ConditionOperator::GreaterThan,
                            value: ContextValue::Number(500.0),
                        },
                        dimension_equals("journey_stage", "active"),
                    ],
                    fallback: false,
                },
            ),
        ]),
    }
}

fn industry(id: &str, name: &str, subcategories: &[(&str, &str)]) -> Industry {
    Industry {
        id: IndustryId(id.to_string()),
        name: name.to_string(),
        subcategories: subcategories
            .iter()
            .map(|(id, name)| ServiceSubcategory {
                id: (*id).to_string(),
                name: (*name).to_string(),
            })
            .collect(),
        price_buckets: vec![
            PriceBucket {
                label: "standard".to_string(),
                min: 0,
                max: Some(150),
            },
            PriceBucket {
                label: "premium".to_string(),
                min: 150,
                max: None,
            },
        ],
    }
}

fn plan(tier: PlanTier, priority: u8, monthly_bookings: i64, features: &[&str]) -> Plan {
    Plan {
        tier,
        priority,
        limits: BTreeMap::from([
            ("monthly_bookings".to_string(), monthly_bookings),
            (
                "team_seats".to_string(),
                match tier {
                    PlanTier::Freemium => 1,
                    PlanTier::Advanced => 3,
                    PlanTier::Professional => 10,
                    PlanTier::Enterprise => -1,
                },
            ),
        ]),
        features: string_set(features),
    }
}

fn role(id: &str, name: &str) -> RoleDefinition {
    RoleDefinition {
        id: RoleId(id.to_string()),
        name: name.to_string(),
    }
}

fn penalty_tier(hours_before_event: f64, penalty_percentage: u8, minimum_fee: f64) -> PenaltyTier {
    PenaltyTier {
        hours_before_event,
        penalty_percentage,
        minimum_fee,
    }
}

fn refund_eligibility(
    time_window_hours: f64,
    conditions: &[&str],
    exceptions: &[&str],
) -> RefundEligibility {
    RefundEligibility {
        time_window_hours,
        conditions: string_set(conditions),
        exceptions: string_set(exceptions),
    }
}

fn reschedule_fee(change_number: u32, fee: f64, fee_type: FeeType) -> RescheduleFee {
    RescheduleFee {
        change_number,
        fee,
        fee_type,
    }
}

fn refund_window(days: u32, percentage: u8, conditions: &[&str]) -> RefundWindow {
    RefundWindow {
        days,
        percentage,
        conditions: string_set(conditions),
    }
}

fn trust_signal(id: &str, weight: f64, calculation: &str) -> TrustSignal {
    TrustSignal {
        id: id.to_string(),
        weight,
        calculation: calculation.to_string(),
    }
}

fn verification_level(id: &str, threshold: f64, requirements: &[&str]) -> VerificationLevel {
    VerificationLevel {
        id: id.to_string(),
        threshold,
        requirements: requirements.iter().map(|req| (*req).to_string()).collect(),
    }
}

fn dimension_equals(field: &str, value: &str) -> LogicCondition {
    LogicCondition {
        kind: ConditionKind::Dimension,
        field: field.to_string(),
        operator: ConditionOperator::Equals,
        value: ContextValue::Text(value.to_string()),
    }
}

fn string_set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}
