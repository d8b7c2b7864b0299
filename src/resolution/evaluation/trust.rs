use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::resolution::domain::TrustModel;

/// Hours after which an unanswered inquiry drags the response signal to ~e⁻¹.
const RESPONSE_DECAY_HOURS: f64 = 24.0;
/// Event count at which a saturating count signal reaches 0.5.
const SATURATION_MIDPOINT: f64 = 10.0;

/// Discrete contribution of one signal, kept for auditability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrustComponent {
    pub signal_id: String,
    pub weight: f64,
    pub normalized: f64,
    /// `false` when the measurement was absent and contributed zero.
    pub measured: bool,
}

/// Composite trust score and the verification level it recommends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrustScore {
    pub score: f64,
    /// Highest level whose threshold the score clears, if any.
    pub level: Option<String>,
    /// Informational requirements of the recommended level, for the caller.
    pub requirements: Vec<String>,
    pub components: Vec<TrustComponent>,
}

/// Weighted sum of normalized signals over the supplied measurements.
///
/// A missing measurement contributes zero rather than being skipped, so
/// incomplete profiles score lower than complete ones.
pub(crate) fn score(model: &TrustModel, measurements: &BTreeMap<String, f64>) -> TrustScore {
    let mut total = 0.0;
    let mut components = Vec::with_capacity(model.signals.len());

    for signal in &model.signals {
        let (normalized, measured) = match measurements.get(&signal.id) {
            Some(raw) => (normalize(&signal.calculation, *raw), true),
            None => (0.0, false),
        };
        total += signal.weight * normalized;
        components.push(TrustComponent {
            signal_id: signal.id.clone(),
            weight: signal.weight,
            normalized,
            measured,
        });
    }

    let recommended = model
        .levels
        .iter()
        .rev()
        .find(|level| total >= level.threshold);

    TrustScore {
        score: total,
        level: recommended.map(|level| level.id.clone()),
        requirements: recommended
            .map(|level| level.requirements.clone())
            .unwrap_or_default(),
        components,
    }
}

/// Closed registry of normalization functions; configuration references an
/// entry by name and an unknown name is rejected at load time.
pub(crate) fn lookup_calculation(name: &str) -> Option<fn(f64) -> f64> {
    match name {
        "ratio" => Some(clamp_unit),
        "percentage" => Some(from_percentage),
        "inverse_exponential_hours" => Some(inverse_exponential_hours),
        "saturating_count" => Some(saturating_count),
        _ => None,
    }
}

fn normalize(calculation: &str, raw: f64) -> f64 {
    match lookup_calculation(calculation) {
        Some(function) => function(raw),
        None => {
            // Unreachable after load validation; scored as absent instead of
            // taking the evaluation path down.
            debug!(calculation, "unknown calculation at scoring time");
            0.0
        }
    }
}

fn clamp_unit(raw: f64) -> f64 {
    if raw.is_finite() {
        raw.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn from_percentage(raw: f64) -> f64 {
    clamp_unit(raw / 100.0)
}

fn inverse_exponential_hours(raw: f64) -> f64 {
    if !raw.is_finite() {
        return 0.0;
    }
    clamp_unit((-raw.max(0.0) / RESPONSE_DECAY_HOURS).exp())
}

fn saturating_count(raw: f64) -> f64 {
    if !raw.is_finite() {
        return 0.0;
    }
    let count = raw.max(0.0);
    count / (count + SATURATION_MIDPOINT)
}
