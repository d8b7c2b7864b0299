use serde::Serialize;

use super::overrides::EffectiveCancellationPolicy;
use super::ResolutionError;
use crate::resolution::domain::PenaltyTier;

/// Penalty decision for one cancellation quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PenaltyQuote {
    pub percentage: u8,
    pub amount: f64,
    /// The tier that priced this quote; `None` for free cancellations.
    pub tier_matched: Option<PenaltyTier>,
}

impl PenaltyQuote {
    fn free() -> Self {
        Self {
            percentage: 0,
            amount: 0.0,
            tier_matched: None,
        }
    }
}

/// Price a cancellation at `hours_before_event` against an effective policy.
///
/// At or beyond the free window the quote is zero without a tier lookup.
/// Inside it, tiers are stored strictly ascending by threshold and the first
/// tier whose threshold covers the elapsed value applies; cancelling past the
/// last band but still inside the free window is also free.
pub(crate) fn quote_penalty(
    policy: &EffectiveCancellationPolicy,
    hours_before_event: f64,
    base_fee: f64,
) -> Result<PenaltyQuote, ResolutionError> {
    if !(hours_before_event >= 0.0) {
        return Err(ResolutionError::NegativeHours(hours_before_event));
    }
    if !(base_fee >= 0.0) {
        return Err(ResolutionError::NegativeFee(base_fee));
    }

    if hours_before_event >= policy.free_window_hours {
        return Ok(PenaltyQuote::free());
    }

    let Some(tier) = policy
        .tiers
        .iter()
        .find(|tier| tier.hours_before_event >= hours_before_event)
    else {
        return Ok(PenaltyQuote::free());
    };

    let percentage = tier.penalty_percentage;
    let amount = (base_fee * f64::from(percentage) / 100.0).max(tier.minimum_fee);

    Ok(PenaltyQuote {
        percentage,
        amount,
        tier_matched: Some(tier.clone()),
    })
}
