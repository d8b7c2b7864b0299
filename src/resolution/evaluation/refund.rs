use serde::Serialize;

use super::overrides::EffectiveRefundModel;
use super::ResolutionError;

/// Refund eligibility decision for one cancellation reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefundVerdict {
    pub eligible: bool,
    pub percentage: u8,
    /// Copied from the model's processing metadata; informational only.
    pub automatic: bool,
}

/// Scan refund windows ascending by `days`; the first window that still
/// covers `elapsed_days` and accepts the reason wins. An empty condition set
/// accepts any reason. No match means no refund.
pub(crate) fn evaluate_refund(
    model: &EffectiveRefundModel,
    reason: &str,
    elapsed_days: f64,
) -> Result<RefundVerdict, ResolutionError> {
    if !(elapsed_days >= 0.0) {
        return Err(ResolutionError::NegativeDays(elapsed_days));
    }

    let automatic = model.processing.automatic;
    let matched = model.windows.iter().find(|window| {
        f64::from(window.days) >= elapsed_days
            && (window.conditions.is_empty() || window.conditions.contains(reason))
    });

    Ok(match matched {
        Some(window) => RefundVerdict {
            eligible: true,
            percentage: window.percentage,
            automatic,
        },
        None => RefundVerdict {
            eligible: false,
            percentage: 0,
            automatic,
        },
    })
}
