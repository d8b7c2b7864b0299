//! ReserveKit policy and feature resolution engine.
//!
//! The console backend loads immutable Foundation/Governance/FeatureFlagSet
//! documents into a versioned snapshot and queries it through
//! [`resolution::PolicyResolutionService`]: effective cancellation and
//! rescheduling policies, penalty quotes, refund verdicts, feature flags,
//! conditional gates, and trust scores. Evaluation is pure and lock-free;
//! configuration reloads swap the snapshot atomically and keep the
//! last-known-good version when a candidate fails validation.

pub mod config;
pub mod error;
pub mod resolution;
pub mod telemetry;

pub use crate::error::EngineError;
