use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{IndustryId, JourneyStage, PlanTier, RoleId};

/// Value representation for context attributes so conditions can consume
/// structured data without re-parsing strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    Toggle(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

/// Ephemeral request value describing who is asking and when.
///
/// Built per call and discarded with the decision; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionContext {
    pub industry: IndustryId,
    pub plan: PlanTier,
    pub role: RoleId,
    pub journey_stage: JourneyStage,
    /// Stable caller identity used for sticky rollout bucketing.
    pub identity: String,
    pub now: DateTime<Utc>,
    pub hours_before_event: Option<f64>,
    pub elapsed_days: Option<f64>,
    pub change_number: Option<u32>,
    pub custom_fields: BTreeMap<String, ContextValue>,
}

impl ResolutionContext {
    pub fn new(
        industry: IndustryId,
        plan: PlanTier,
        role: RoleId,
        journey_stage: JourneyStage,
        identity: impl Into<String>,
    ) -> Self {
        Self {
            industry,
            plan,
            role,
            journey_stage,
            identity: identity.into(),
            now: Utc::now(),
            hours_before_event: None,
            elapsed_days: None,
            change_number: None,
            custom_fields: BTreeMap::new(),
        }
    }

    /// Resolve a built-in dimension by field name for condition evaluation.
    pub(crate) fn dimension(&self, field: &str) -> Option<ContextValue> {
        match field {
            "industry" => Some(ContextValue::Text(self.industry.0.clone())),
            "plan" => Some(ContextValue::Text(self.plan.label().to_string())),
            "role" => Some(ContextValue::Text(self.role.0.clone())),
            "journey_stage" => Some(ContextValue::Text(self.journey_stage.label().to_string())),
            "identity" => Some(ContextValue::Text(self.identity.clone())),
            "hours_before_event" => self.hours_before_event.map(ContextValue::Number),
            "elapsed_days" => self.elapsed_days.map(ContextValue::Number),
            "change_number" => self.change_number.map(|n| ContextValue::Number(n as f64)),
            _ => None,
        }
    }
}
