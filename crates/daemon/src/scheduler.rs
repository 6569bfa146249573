use std::time::Duration;

use iqaamah_core::{now_ms, FetchError, RawSchedule};
use tokio::time::interval;
use tracing::{info, warn};

use crate::api::AppState;
use crate::store::SnapshotStore;

/// Runs the refresh loop for the process lifetime.
///
/// The first interval tick is consumed immediately because `main` performs
/// the startup fetch before serving; every later tick is one fetch attempt.
/// A failed attempt is logged and absorbed, leaving the last good snapshot
/// in place.
pub fn spawn_refresher(state: AppState) {
    tokio::spawn(async move {
        let mut tick = interval(Duration::from_secs(state.config.refresh_interval_secs));
        tick.tick().await;
        loop {
            tick.tick().await;
            refresh_once(&state).await;
        }
    });
}

/// One fetch-and-install attempt.
pub async fn refresh_once(state: &AppState) -> bool {
    apply(&state.store, state.fetcher.fetch().await).await
}

/// Applies a fetch outcome to the store: install on success, keep the
/// retained snapshot (marked stale) on failure.
async fn apply(store: &SnapshotStore, outcome: Result<RawSchedule, FetchError>) -> bool {
    match outcome {
        Ok(schedule) => {
            let days = schedule.len();
            store.replace(schedule, now_ms()).await;
            info!(days, "installed fresh schedule snapshot");
            true
        }
        Err(e) => {
            store.mark_stale().await;
            warn!(error = %e, "refresh failed; serving retained snapshot");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iqaamah_core::Weekday;
    use std::collections::BTreeMap;

    fn schedule_of(time: &str) -> RawSchedule {
        let raw: BTreeMap<String, serde_json::Value> = Weekday::ALL
            .into_iter()
            .map(|d| (d.as_str().to_string(), serde_json::json!(vec![time; 5])))
            .collect();
        RawSchedule::from_upstream(raw).unwrap()
    }

    #[tokio::test]
    async fn test_apply_success_installs_snapshot() {
        let store = SnapshotStore::new();
        assert!(apply(&store, Ok(schedule_of("05:30"))).await);
        let snap = store.get().await.unwrap();
        assert!(snap.valid);
        assert_eq!(snap.schedule, schedule_of("05:30"));
    }

    #[tokio::test]
    async fn test_apply_failure_before_first_success_leaves_store_empty() {
        let store = SnapshotStore::new();
        assert!(!apply(&store, Err(FetchError::Http(502))).await);
        assert!(store.get().await.is_none());
    }

    #[tokio::test]
    async fn test_apply_failure_after_success_keeps_prior_content() {
        let store = SnapshotStore::new();
        apply(&store, Ok(schedule_of("05:30"))).await;
        let before = store.get().await.unwrap();

        apply(&store, Err(FetchError::Network("timed out".into()))).await;
        let after = store.get().await.unwrap();
        assert_eq!(after.schedule, before.schedule);
        assert_eq!(after.fetched_at, before.fetched_at);
        assert!(!after.valid);

        // A later success supersedes the retained snapshot wholesale.
        apply(&store, Ok(schedule_of("06:00"))).await;
        let fresh = store.get().await.unwrap();
        assert!(fresh.valid);
        assert_eq!(fresh.schedule, schedule_of("06:00"));
    }
}
