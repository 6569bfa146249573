use std::collections::BTreeMap;

use iqaamah_core::{DaySchedule, QueryError, Weekday};

use crate::store::SnapshotStore;

/// Read side of the snapshot store: answers "schedule for day X" against
/// whatever snapshot is current. Never performs network I/O and never
/// touches the clock; "today" is resolved by the HTTP layer.
#[derive(Clone)]
pub struct QueryService {
    store: SnapshotStore,
}

impl QueryService {
    pub fn new(store: SnapshotStore) -> Self {
        Self { store }
    }

    /// Case-insensitive lookup by day name.
    pub async fn day_by_name(&self, name: &str) -> Result<DaySchedule, QueryError> {
        let day =
            Weekday::parse(name).ok_or_else(|| QueryError::UnknownDay(name.to_string()))?;
        self.day(day).await
    }

    /// Lookup for an already-resolved weekday.
    pub async fn day(&self, day: Weekday) -> Result<DaySchedule, QueryError> {
        let snapshot = self.store.get().await.ok_or(QueryError::NotReady)?;
        snapshot
            .schedule
            .day(day)
            .ok_or(QueryError::NoDataForDay(day))
    }

    /// Every present day, transformed, keyed Monday through Sunday.
    pub async fn all(&self) -> Result<BTreeMap<Weekday, DaySchedule>, QueryError> {
        let snapshot = self.store.get().await.ok_or(QueryError::NotReady)?;
        Ok(snapshot.schedule.all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iqaamah_core::{now_ms, RawSchedule};
    use serde_json::json;

    /// Store populated from the upstream shape in the round-trip property:
    /// Monday has a trailing extra element, Tuesday is too short to survive.
    async fn populated() -> QueryService {
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_value(json!({
            "Monday": ["05:30", "12:15", "15:45", "18:20", "19:30", "extra"],
            "Tuesday": ["05:30", "12:15"],
        }))
        .unwrap();
        let schedule = RawSchedule::from_upstream(raw).unwrap();
        let store = SnapshotStore::new();
        store.replace(schedule, now_ms()).await;
        QueryService::new(store)
    }

    #[tokio::test]
    async fn test_round_trip_is_case_insensitive_and_ignores_extras() {
        let service = populated().await;
        let monday = service.day_by_name("monday").await.unwrap();
        assert_eq!(monday.fajr, "05:30");
        assert_eq!(monday.dhuhr, "12:15");
        assert_eq!(monday.asr, "15:45");
        assert_eq!(monday.maghrib, "18:20");
        assert_eq!(monday.ishaa, "19:30");
        assert_eq!(service.day_by_name("MONDAY").await.unwrap(), monday);
    }

    #[tokio::test]
    async fn test_dropped_day_reports_no_data() {
        let service = populated().await;
        assert_eq!(
            service.day_by_name("tuesday").await,
            Err(QueryError::NoDataForDay(Weekday::Tuesday))
        );
        // Same for a resolved "today": absent day is missing data, not an
        // unknown name.
        assert_eq!(
            service.day(Weekday::Wednesday).await,
            Err(QueryError::NoDataForDay(Weekday::Wednesday))
        );
    }

    #[tokio::test]
    async fn test_all_transforms_every_surviving_day() {
        let service = populated().await;
        let all = service.all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert!(all.contains_key(&Weekday::Monday));
    }

    #[tokio::test]
    async fn test_not_ready_before_first_fetch() {
        let service = QueryService::new(SnapshotStore::new());
        assert_eq!(service.day_by_name("monday").await, Err(QueryError::NotReady));
        assert_eq!(service.day(Weekday::Monday).await, Err(QueryError::NotReady));
        assert_eq!(service.all().await, Err(QueryError::NotReady));
    }

    #[tokio::test]
    async fn test_unknown_day_regardless_of_store_state() {
        let service = QueryService::new(SnapshotStore::new());
        assert_eq!(
            service.day_by_name("Mondays").await,
            Err(QueryError::UnknownDay("Mondays".into()))
        );
    }
}
