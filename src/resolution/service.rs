use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use super::context::ResolutionContext;
use super::domain::FlagId;
use super::evaluation::{
    EffectiveCancellationPolicy, EffectiveRefundModel, EffectiveReschedulingPolicy, PenaltyQuote,
    RefundVerdict, RescheduleVerdict, ResolutionEngine, ResolutionError, TrustScore,
};
use super::store::loader::{ConfigLoader, LoadError};
use super::store::watch::spawn_document_watcher;
use super::store::ConfigStore;

/// Facade composing the configuration store and snapshot-bound evaluators.
///
/// Each query pins one snapshot for its whole evaluation, so callers never
/// observe a half-reloaded mix of old and new policies.
#[derive(Debug)]
pub struct PolicyResolutionService<L> {
    loader: Arc<L>,
    store: Arc<ConfigStore>,
}

impl<L> PolicyResolutionService<L>
where
    L: ConfigLoader + 'static,
{
    /// Load, validate, and activate the initial snapshot from the loader.
    pub fn bootstrap(loader: Arc<L>) -> Result<Self, LoadError> {
        let store = Arc::new(ConfigStore::bootstrap(loader.as_ref())?);
        Ok(Self { loader, store })
    }

    pub fn store(&self) -> Arc<ConfigStore> {
        self.store.clone()
    }

    pub fn snapshot_version(&self) -> u64 {
        self.store.version()
    }

    /// Rebuild the snapshot from the loader and swap it in; a rejected
    /// reload keeps the last-known-good snapshot serving.
    pub fn reload(&self) -> Result<u64, LoadError> {
        self.store.reload(self.loader.as_ref())
    }

    /// Spawn a background watcher that reloads when the loader's documents
    /// change on disk.
    pub fn watch_documents(&self, interval: Duration) -> JoinHandle<()> {
        spawn_document_watcher(self.store.clone(), self.loader.clone(), interval)
    }

    /// Evaluator bound to the currently active snapshot.
    pub fn engine(&self) -> ResolutionEngine {
        ResolutionEngine::new(self.store.snapshot())
    }

    pub fn resolve_cancellation_policy(
        &self,
        context: &ResolutionContext,
    ) -> Result<EffectiveCancellationPolicy, ResolutionError> {
        self.engine().resolve_cancellation_policy(context)
    }

    pub fn resolve_rescheduling_policy(
        &self,
        context: &ResolutionContext,
    ) -> Result<EffectiveReschedulingPolicy, ResolutionError> {
        self.engine().resolve_rescheduling_policy(context)
    }

    pub fn resolve_refund_model(
        &self,
        context: &ResolutionContext,
    ) -> Result<EffectiveRefundModel, ResolutionError> {
        self.engine().resolve_refund_model(context)
    }

    pub fn quote_penalty(
        &self,
        context: &ResolutionContext,
        base_fee: f64,
    ) -> Result<PenaltyQuote, ResolutionError> {
        self.engine().quote_penalty(context, base_fee)
    }

    pub fn evaluate_refund(
        &self,
        context: &ResolutionContext,
        reason: &str,
    ) -> Result<RefundVerdict, ResolutionError> {
        self.engine().evaluate_refund(context, reason)
    }

    pub fn evaluate_reschedule(
        &self,
        context: &ResolutionContext,
    ) -> Result<RescheduleVerdict, ResolutionError> {
        self.engine().evaluate_reschedule(context)
    }

    pub fn evaluate_flag(
        &self,
        flag_id: &FlagId,
        context: &ResolutionContext,
    ) -> Result<bool, ResolutionError> {
        self.engine().evaluate_flag(flag_id, context)
    }

    pub fn evaluate_gate(
        &self,
        gate_id: &str,
        context: &ResolutionContext,
    ) -> Result<bool, ResolutionError> {
        self.engine().evaluate_gate(gate_id, context)
    }

    pub fn score_trust(&self, measurements: &BTreeMap<String, f64>) -> TrustScore {
        self.engine().score_trust(measurements)
    }
}
