use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use super::loader::ConfigLoader;
use super::ConfigStore;

/// Poll the loader's documents and reload the store when any of them change.
///
/// Rejected reloads leave the last-known-good snapshot serving; the watcher
/// keeps polling so a corrected document is picked up on a later tick.
pub fn spawn_document_watcher<L>(
    store: Arc<ConfigStore>,
    loader: Arc<L>,
    interval: Duration,
) -> JoinHandle<()>
where
    L: ConfigLoader + 'static,
{
    let paths = loader.document_paths();
    tokio::spawn(async move {
        if paths.is_empty() {
            debug!("loader exposes no document paths, watcher idle");
            return;
        }

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_seen = fingerprint(&paths);

        loop {
            ticker.tick().await;
            let current = fingerprint(&paths);
            if current == last_seen {
                continue;
            }
            last_seen = current;

            match store.reload(loader.as_ref()) {
                Ok(version) => {
                    debug!(version, "documents changed, snapshot reloaded");
                }
                Err(err) => {
                    warn!(error = %err, "documents changed but reload was rejected");
                }
            }
        }
    })
}

fn fingerprint(paths: &[PathBuf]) -> Vec<Option<SystemTime>> {
    paths.iter().map(|path| modified_at(path)).collect()
}

fn modified_at(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|meta| meta.modified()).ok()
}
