//! Weekly schedule data model: day identifiers, raw upstream entries, the
//! transformed per-day view, and the store snapshot wrapper.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FetchError;
use crate::time::EpochMs;

/// Number of prayer times in a day entry: Fajr, Dhuhr, Asr, Maghrib, Ishaa.
pub const PRAYER_COUNT: usize = 5;

/// A weekday name as the upstream schedule keys it.
///
/// `Ord` follows week order (Monday first) so `RawSchedule` maps iterate
/// Monday through Sunday.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

impl Weekday {
    /// All seven days, week order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Case-insensitive match against the seven full day names.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(name.trim()))
    }

    /// Canonical capitalized name, identical to the upstream map keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(d: chrono::Weekday) -> Self {
        match d {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

/// One day's prayer times in fixed position order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct DaySchedule {
    /// Dawn prayer.
    pub fajr: String,
    /// Midday prayer.
    pub dhuhr: String,
    /// Afternoon prayer.
    pub asr: String,
    /// Sunset prayer.
    pub maghrib: String,
    /// Night prayer.
    pub ishaa: String,
}

impl DaySchedule {
    /// Builds a schedule from an upstream positional entry.
    ///
    /// Requires at least [`PRAYER_COUNT`] elements; extras are ignored.
    pub fn from_times(times: &[String]) -> Option<Self> {
        if times.len() < PRAYER_COUNT {
            return None;
        }
        Some(Self {
            fajr: times[0].clone(),
            dhuhr: times[1].clone(),
            asr: times[2].clone(),
            maghrib: times[3].clone(),
            ishaa: times[4].clone(),
        })
    }
}

/// Normalized weekly schedule: weekday -> raw positional time values.
///
/// Every present entry holds at least [`PRAYER_COUNT`] values; entries that
/// failed that shape check never make it in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawSchedule(BTreeMap<Weekday, Vec<String>>);

impl RawSchedule {
    /// Normalizes a decoded upstream body into a weekly schedule.
    ///
    /// The upstream is loose, so filtering is per entry rather than
    /// all-or-nothing: unknown keys, non-array values, entries shorter than
    /// [`PRAYER_COUNT`], and entries whose first [`PRAYER_COUNT`] elements
    /// are not all strings are dropped. Elements beyond the positional five
    /// are ignored whatever their type. A body with zero surviving entries
    /// is an [`FetchError::EmptySchedule`].
    pub fn from_upstream(
        raw: BTreeMap<String, serde_json::Value>,
    ) -> Result<Self, FetchError> {
        let mut days = BTreeMap::new();
        for (key, value) in raw {
            let Some(day) = Weekday::parse(&key) else {
                debug!(key = %key, "dropping entry with unrecognized day name");
                continue;
            };
            // Positions are meaningful, so a non-string anywhere in the
            // first five slots drops the whole entry; skipping it would
            // shift every prayer time one slot early.
            let times: Option<Vec<String>> = value.as_array().and_then(|items| {
                if items.len() < PRAYER_COUNT {
                    return None;
                }
                items[..PRAYER_COUNT]
                    .iter()
                    .map(|v| v.as_str().map(str::to_owned))
                    .collect()
            });
            match times {
                Some(times) => {
                    days.insert(day, times);
                }
                None => {
                    debug!(day = %day, "dropping malformed day entry");
                }
            }
        }
        if days.is_empty() {
            return Err(FetchError::EmptySchedule);
        }
        Ok(Self(days))
    }

    /// One day's transformed schedule, if the day is present.
    pub fn day(&self, day: Weekday) -> Option<DaySchedule> {
        self.0.get(&day).and_then(|times| DaySchedule::from_times(times))
    }

    /// Transforms every present entry, keyed Monday through Sunday.
    pub fn all(&self) -> BTreeMap<Weekday, DaySchedule> {
        self.0
            .iter()
            .filter_map(|(day, times)| DaySchedule::from_times(times).map(|s| (*day, s)))
            .collect()
    }

    /// Number of present day entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no day entries are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The store's current copy of the schedule plus freshness metadata.
///
/// Replaced wholesale on every successful fetch, never mutated per day.
/// `valid` is false when the snapshot is being retained because the most
/// recent refresh attempt failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// The normalized weekly schedule.
    pub schedule: RawSchedule,
    /// When the schedule was fetched from upstream.
    pub fetched_at: EpochMs,
    /// False once a later refresh attempt has failed.
    pub valid: bool,
}
