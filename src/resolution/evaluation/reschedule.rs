use serde::Serialize;

use super::overrides::EffectiveReschedulingPolicy;
use super::ResolutionError;
use crate::resolution::domain::FeeType;

/// Decision for one rescheduling attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RescheduleVerdict {
    pub allowed: bool,
    pub fee: f64,
    pub fee_type: FeeType,
    /// Set when the policy carries restriction tags the caller must clear
    /// through manual review before the change is final.
    pub requires_review: bool,
}

impl RescheduleVerdict {
    fn denied() -> Self {
        Self {
            allowed: false,
            fee: 0.0,
            fee_type: FeeType::Flat,
            requires_review: false,
        }
    }
}

/// Decide the caller's `change_number`-th rescheduling attempt (1-based).
///
/// Allowed while the attempt count stays within `allowed_changes` and the
/// booking is at least `time_window_hours` out. The fee comes from the
/// largest fee-structure entry at or below the attempt number, so attempts
/// past the table reuse its final entry; a table starting above the attempt
/// charges nothing.
pub(crate) fn evaluate_reschedule(
    policy: &EffectiveReschedulingPolicy,
    hours_before_event: f64,
    change_number: u32,
) -> Result<RescheduleVerdict, ResolutionError> {
    if !(hours_before_event >= 0.0) {
        return Err(ResolutionError::NegativeHours(hours_before_event));
    }
    if change_number == 0 {
        return Err(ResolutionError::ZeroChangeNumber);
    }

    if change_number > policy.allowed_changes || hours_before_event < policy.time_window_hours {
        return Ok(RescheduleVerdict::denied());
    }

    let entry = policy
        .fee_structure
        .iter()
        .rev()
        .find(|fee| fee.change_number <= change_number);

    let (fee, fee_type) = match entry {
        Some(entry) => (entry.fee, entry.fee_type),
        None => (0.0, FeeType::Flat),
    };

    Ok(RescheduleVerdict {
        allowed: true,
        fee,
        fee_type,
        requires_review: !policy.restrictions.is_empty(),
    })
}
