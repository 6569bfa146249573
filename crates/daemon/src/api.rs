use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Datelike, Utc};
use iqaamah_core::{DaySchedule, QueryError, Weekday};
use serde_json::json;

use crate::config::DaemonConfig;
use crate::fetch::ScheduleFetcher;
use crate::query::QueryService;
use crate::store::SnapshotStore;

/// Shared handles: the refresher writes the store, handlers read it through
/// the query service.
#[derive(Clone)]
pub struct AppState {
    pub config: DaemonConfig,
    pub store: SnapshotStore,
    pub fetcher: Arc<ScheduleFetcher>,
    pub query: QueryService,
}

impl AppState {
    pub fn new(config: DaemonConfig, store: SnapshotStore, fetcher: ScheduleFetcher) -> Self {
        let query = QueryService::new(store.clone());
        Self {
            config,
            store,
            fetcher: Arc::new(fetcher),
            query,
        }
    }
}

/// Query failure surfaced over HTTP with an `{"error": "..."}` body.
#[derive(Debug)]
pub struct ApiError(QueryError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            QueryError::NotReady => StatusCode::SERVICE_UNAVAILABLE,
            QueryError::UnknownDay(_) => StatusCode::BAD_REQUEST,
            QueryError::NoDataForDay(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// GET /prayer-times/{day}
pub async fn get_day(
    State(state): State<AppState>,
    Path(day): Path<String>,
) -> Result<Json<DaySchedule>, ApiError> {
    Ok(Json(state.query.day_by_name(&day).await?))
}

/// GET /prayer-times/today
///
/// Resolves the current day name in the configured timezone; the query
/// service itself stays clock-free.
pub async fn get_today(
    State(state): State<AppState>,
) -> Result<Json<DaySchedule>, ApiError> {
    let today: Weekday = Utc::now()
        .with_timezone(&state.config.timezone)
        .weekday()
        .into();
    Ok(Json(state.query.day(today).await?))
}

/// GET /prayer-times/all
pub async fn get_all(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<Weekday, DaySchedule>>, ApiError> {
    Ok(Json(state.query.all().await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            ApiError::from(QueryError::NotReady).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::from(QueryError::UnknownDay("blursday".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(QueryError::NoDataForDay(Weekday::Tuesday)).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = ApiError::from(QueryError::UnknownDay("blursday".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "unknown day name: blursday");
    }
}
