//! Error taxonomy: fetch-time failures (absorbed by the refresher) and
//! query-time failures (surfaced to HTTP callers).

use thiserror::Error;

use crate::model::Weekday;

/// A single upstream retrieval attempt failed.
///
/// These never reach a query caller; the refresher logs them and keeps
/// serving the last good snapshot.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Connection failure or request timeout.
    #[error("upstream request failed: {0}")]
    Network(String),
    /// Upstream answered with a non-success status.
    #[error("upstream returned HTTP {0}")]
    Http(u16),
    /// Response body is not a JSON map of day entries.
    #[error("upstream body is not a weekly schedule: {0}")]
    Parse(String),
    /// Body parsed but zero usable day entries survived validation.
    #[error("upstream schedule contained no usable day entries")]
    EmptySchedule,
}

/// A schedule lookup failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// No fetch has ever succeeded; there is nothing to serve yet.
    #[error("schedule not yet available")]
    NotReady,
    /// The requested day name is not one of the seven weekdays.
    #[error("unknown day name: {0}")]
    UnknownDay(String),
    /// The day is valid but the current snapshot has no entry for it.
    #[error("no schedule data for {0}")]
    NoDataForDay(Weekday),
}
