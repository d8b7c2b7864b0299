use crate::resolution::domain::{
    CancellationPolicy, FeatureFlag, FeatureFlagSet, Foundation, Governance, PenaltyTier,
    PlanTier, RefundWindow, RescheduleFee, ReschedulingPolicy, RoleId, TrustModel,
};
use crate::resolution::evaluation::trust;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Fatal configuration defects; a snapshot failing any check is never
/// activated and the previous snapshot keeps serving.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigInvalid {
    #[error("{scope}: penalty tiers must be strictly increasing by hours_before_event")]
    TierOrdering { scope: String },
    #[error("{scope}: penalty severity must not increase with distance from the event")]
    TierSeverity { scope: String },
    #[error("{scope}: refund windows must be strictly increasing by days")]
    RefundWindowOrdering { scope: String },
    #[error("{scope}: fee structure must be 1-based and strictly increasing by change_number")]
    FeeStructureOrdering { scope: String },
    #[error("{scope}: override references plan '{plan}' absent from the Foundation")]
    OverridePlanUnknown { scope: String, plan: &'static str },
    #[error("{scope}: references role '{role}' absent from the Foundation")]
    RoleUnknown { scope: String, role: String },
    #[error("{scope}: policy keyed by industry '{industry}' absent from the Foundation")]
    PolicyIndustryUnknown { scope: String, industry: String },
    #[error("trust signal weights must sum to 1.0, got {sum}")]
    WeightSum { sum: f64 },
    #[error("trust signal '{signal}' names unknown calculation '{name}'")]
    UnknownCalculation { signal: String, name: String },
    #[error("trust signal '{signal}' weight {weight} is outside [0, 1]")]
    WeightRange { signal: String, weight: f64 },
    #[error("verification levels must be strictly increasing by threshold")]
    LevelOrdering,
    #[error("verification level '{level}' threshold {threshold} is outside [0, 1]")]
    LevelThreshold { level: String, threshold: f64 },
    #[error("flag '{flag}': rollout percentage {value} exceeds 100")]
    RolloutRange { flag: String, value: u8 },
}

/// Validate a candidate snapshot immediately after load, before activation.
pub(crate) fn validate_snapshot(
    foundation: &Foundation,
    governance: &Governance,
    flags: &FeatureFlagSet,
) -> Result<(), ConfigInvalid> {
    for (industry, policy) in &governance.cancellation {
        if foundation.industry(industry).is_none() {
            return Err(ConfigInvalid::PolicyIndustryUnknown {
                scope: "cancellation".to_string(),
                industry: industry.0.clone(),
            });
        }
        validate_cancellation(&industry.0, policy, foundation)?;
    }

    for (industry, policy) in &governance.rescheduling {
        if foundation.industry(industry).is_none() {
            return Err(ConfigInvalid::PolicyIndustryUnknown {
                scope: "rescheduling".to_string(),
                industry: industry.0.clone(),
            });
        }
        validate_rescheduling(&industry.0, policy, foundation)?;
    }

    validate_refund_windows("refunds default", &governance.refunds.default.windows)?;
    for (plan, overlay) in &governance.refunds.plan_overrides {
        let scope = format!("refunds override for plan '{}'", plan.label());
        check_plan_known(&scope, *plan, foundation)?;
        if let Some(windows) = &overlay.windows {
            validate_refund_windows(&scope, windows)?;
        }
    }

    validate_trust(&governance.trust)?;
    validate_flags(flags, foundation)?;

    Ok(())
}

fn validate_cancellation(
    industry: &str,
    policy: &CancellationPolicy,
    foundation: &Foundation,
) -> Result<(), ConfigInvalid> {
    let scope = format!("cancellation policy for '{industry}'");
    validate_tiers(&scope, &policy.tiers)?;

    for (plan, overlay) in &policy.plan_overrides {
        let scope = format!("cancellation override for '{industry}'/{}", plan.label());
        check_plan_known(&scope, *plan, foundation)?;
        if let Some(tiers) = &overlay.tiers {
            validate_tiers(&scope, tiers)?;
        }
    }
    Ok(())
}

fn validate_rescheduling(
    industry: &str,
    policy: &ReschedulingPolicy,
    foundation: &Foundation,
) -> Result<(), ConfigInvalid> {
    let scope = format!("rescheduling policy for '{industry}'");
    validate_fee_structure(&scope, &policy.fee_structure)?;

    for (plan, overlay) in &policy.plan_overrides {
        let scope = format!("rescheduling override for '{industry}'/{}", plan.label());
        check_plan_known(&scope, *plan, foundation)?;
        if let Some(fees) = &overlay.fee_structure {
            validate_fee_structure(&scope, fees)?;
        }
    }
    Ok(())
}

fn validate_tiers(scope: &str, tiers: &[PenaltyTier]) -> Result<(), ConfigInvalid> {
    for pair in tiers.windows(2) {
        if pair[1].hours_before_event <= pair[0].hours_before_event {
            return Err(ConfigInvalid::TierOrdering {
                scope: scope.to_string(),
            });
        }
        if pair[1].penalty_percentage > pair[0].penalty_percentage
            || pair[1].minimum_fee > pair[0].minimum_fee
        {
            return Err(ConfigInvalid::TierSeverity {
                scope: scope.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_refund_windows(scope: &str, windows: &[RefundWindow]) -> Result<(), ConfigInvalid> {
    for pair in windows.windows(2) {
        if pair[1].days <= pair[0].days {
            return Err(ConfigInvalid::RefundWindowOrdering {
                scope: scope.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_fee_structure(scope: &str, fees: &[RescheduleFee]) -> Result<(), ConfigInvalid> {
    if fees.first().is_some_and(|fee| fee.change_number == 0) {
        return Err(ConfigInvalid::FeeStructureOrdering {
            scope: scope.to_string(),
        });
    }
    for pair in fees.windows(2) {
        if pair[1].change_number <= pair[0].change_number {
            return Err(ConfigInvalid::FeeStructureOrdering {
                scope: scope.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_trust(model: &TrustModel) -> Result<(), ConfigInvalid> {
    let mut sum = 0.0;
    for signal in &model.signals {
        if !(0.0..=1.0).contains(&signal.weight) {
            return Err(ConfigInvalid::WeightRange {
                signal: signal.id.clone(),
                weight: signal.weight,
            });
        }
        if trust::lookup_calculation(&signal.calculation).is_none() {
            return Err(ConfigInvalid::UnknownCalculation {
                signal: signal.id.clone(),
                name: signal.calculation.clone(),
            });
        }
        sum += signal.weight;
    }
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ConfigInvalid::WeightSum { sum });
    }

    for level in &model.levels {
        if !(0.0..=1.0).contains(&level.threshold) {
            return Err(ConfigInvalid::LevelThreshold {
                level: level.id.clone(),
                threshold: level.threshold,
            });
        }
    }
    for pair in model.levels.windows(2) {
        if pair[1].threshold <= pair[0].threshold {
            return Err(ConfigInvalid::LevelOrdering);
        }
    }
    Ok(())
}

fn validate_flags(flags: &FeatureFlagSet, foundation: &Foundation) -> Result<(), ConfigInvalid> {
    for (id, flag) in &flags.flags {
        match flag {
            FeatureFlag::Global {
                rollout_percentage, ..
            } => {
                if *rollout_percentage > 100 {
                    return Err(ConfigInvalid::RolloutRange {
                        flag: id.0.clone(),
                        value: *rollout_percentage,
                    });
                }
            }
            FeatureFlag::Tiered { role_access, .. } => {
                for role in role_access.keys() {
                    check_role_known(&format!("flag '{}'", id.0), role, foundation)?;
                }
            }
            FeatureFlag::Beta { eligibility, .. } => {
                for role in &eligibility.roles {
                    check_role_known(&format!("flag '{}'", id.0), role, foundation)?;
                }
            }
        }
    }
    Ok(())
}

fn check_plan_known(
    scope: &str,
    plan: PlanTier,
    foundation: &Foundation,
) -> Result<(), ConfigInvalid> {
    if foundation.plan(plan).is_none() {
        return Err(ConfigInvalid::OverridePlanUnknown {
            scope: scope.to_string(),
            plan: plan.label(),
        });
    }
    Ok(())
}

fn check_role_known(
    scope: &str,
    role: &RoleId,
    foundation: &Foundation,
) -> Result<(), ConfigInvalid> {
    if foundation.role(role).is_none() {
        return Err(ConfigInvalid::RoleUnknown {
            scope: scope.to_string(),
            role: role.0.clone(),
        });
    }
    Ok(())
}
