use std::sync::Arc;

use iqaamah_core::{EpochMs, RawSchedule, Snapshot};
use tokio::sync::RwLock;

/// Holds the current schedule snapshot behind a single-writer, multi-reader
/// lock. Clones share the same snapshot.
///
/// Readers get a clone of the whole snapshot, so a concurrent `replace` can
/// never expose a torn mix of old and new days. The write lock is held only
/// for the assignment, never across network I/O.
#[derive(Clone, Default)]
pub struct SnapshotStore {
    inner: Arc<RwLock<Option<Snapshot>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last known snapshot, or `None` before the first successful fetch.
    pub async fn get(&self) -> Option<Snapshot> {
        self.inner.read().await.clone()
    }

    /// Atomically installs a new valid snapshot, superseding the old one
    /// wholesale.
    pub async fn replace(&self, schedule: RawSchedule, now: EpochMs) {
        let snapshot = Snapshot {
            schedule,
            fetched_at: now,
            valid: true,
        };
        *self.inner.write().await = Some(snapshot);
    }

    /// Marks the retained snapshot as stale after a failed refresh.
    ///
    /// Schedule data and `fetched_at` are untouched; serving continues from
    /// the same content. No-op while the store is still empty.
    pub async fn mark_stale(&self) {
        if let Some(snapshot) = self.inner.write().await.as_mut() {
            snapshot.valid = false;
        }
    }
}
