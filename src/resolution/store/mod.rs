pub mod loader;
pub mod validate;
pub mod watch;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::resolution::domain::{FeatureFlagSet, Foundation, Governance};
use self::loader::{ConfigLoader, LoadError};
use self::validate::validate_snapshot;

/// One validated, immutable configuration version.
///
/// Every evaluation call reads exactly one snapshot; a reload never mutates
/// an existing snapshot, it publishes a new one.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub version: u64,
    pub loaded_at: DateTime<Utc>,
    pub foundation: Foundation,
    pub governance: Governance,
    pub flags: FeatureFlagSet,
}

/// Holds the current snapshot and swaps it atomically on reload.
#[derive(Debug)]
pub struct ConfigStore {
    current: RwLock<Arc<Snapshot>>,
    next_version: AtomicU64,
}

impl ConfigStore {
    /// Load, validate, and activate the initial snapshot.
    pub fn bootstrap<L: ConfigLoader>(loader: &L) -> Result<Self, LoadError> {
        let snapshot = build_snapshot(loader, 1)?;
        info!(version = snapshot.version, "configuration snapshot activated");
        Ok(Self {
            current: RwLock::new(Arc::new(snapshot)),
            next_version: AtomicU64::new(2),
        })
    }

    /// The currently active snapshot; in-flight evaluations keep their `Arc`
    /// even if a reload swaps the store underneath them.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn version(&self) -> u64 {
        self.snapshot().version
    }

    /// Build and validate a fresh snapshot, then swap it in atomically.
    ///
    /// A snapshot that fails validation is discarded and the last-known-good
    /// snapshot keeps serving.
    pub fn reload<L: ConfigLoader>(&self, loader: &L) -> Result<u64, LoadError> {
        let version = self.next_version.fetch_add(1, Ordering::Relaxed);
        let snapshot = match build_snapshot(loader, version) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(
                    error = %err,
                    active_version = self.version(),
                    "reload rejected, keeping last known good snapshot"
                );
                return Err(err);
            }
        };

        let mut guard = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(snapshot);
        drop(guard);

        info!(version, "configuration snapshot activated");
        Ok(version)
    }
}

fn build_snapshot<L: ConfigLoader>(loader: &L, version: u64) -> Result<Snapshot, LoadError> {
    let foundation = loader.load_foundation()?;
    let governance = loader.load_governance()?;
    let flags = loader.load_feature_flags()?;

    validate_snapshot(&foundation, &governance, &flags)?;

    Ok(Snapshot {
        version,
        loaded_at: Utc::now(),
        foundation,
        governance,
        flags,
    })
}
