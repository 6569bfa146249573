#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Shared model + error taxonomy for the iqaamah times daemon.

pub mod error;
pub mod model;

mod time;

pub use error::{FetchError, QueryError};
pub use model::{DaySchedule, RawSchedule, Snapshot, Weekday, PRAYER_COUNT};
pub use time::{now_ms, EpochMs};
