use super::rollout;
use crate::resolution::context::ResolutionContext;
use crate::resolution::domain::{FeatureFlag, FlagId, JourneyStage, PlanTier, TargetAudience};

/// Evaluate one flag for the caller's dimensions.
///
/// Tiered lookups fail closed: a dimension missing from an access map denies
/// the flag rather than granting it.
pub(crate) fn evaluate_flag(
    flag_id: &FlagId,
    flag: &FeatureFlag,
    context: &ResolutionContext,
) -> bool {
    match flag {
        FeatureFlag::Global {
            enabled,
            rollout_percentage,
            target_audience,
        } => {
            *enabled
                && audience_matches(*target_audience, context)
                && rollout::in_rollout(&context.identity, flag_id, *rollout_percentage)
        }
        FeatureFlag::Tiered {
            plan_access,
            role_access,
            stage_access,
        } => {
            plan_access.get(&context.plan).copied().unwrap_or(false)
                && role_access.get(&context.role).copied().unwrap_or(false)
                && stage_access
                    .get(&context.journey_stage)
                    .copied()
                    .unwrap_or(false)
        }
        FeatureFlag::Beta { eligibility, .. } => {
            eligibility.plans.contains(&context.plan)
                && eligibility.roles.contains(&context.role)
                && eligibility.stages.contains(&context.journey_stage)
        }
    }
}

fn audience_matches(audience: TargetAudience, context: &ResolutionContext) -> bool {
    match audience {
        TargetAudience::All => true,
        TargetAudience::NewUsers => matches!(
            context.journey_stage,
            JourneyStage::Discovery | JourneyStage::Onboarding
        ),
        TargetAudience::ReturningUsers => matches!(
            context.journey_stage,
            JourneyStage::Active | JourneyStage::Retention
        ),
        TargetAudience::Enterprise => context.plan == PlanTier::Enterprise,
    }
}
