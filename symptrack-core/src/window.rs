//! Recency window selection.
//!
//! An entry is in-window when the number of whole days between its timestamp
//! and `now` is at most the window size. The boundary is inclusive, so a
//! 7-day window keeps an entry logged 7 days and 23 hours ago.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::types::SymptomEntry;

/// Raw window value callers may pass to mean "all time".
pub const ALL_TIME_SENTINEL: i64 = -1;

pub(crate) const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Recency cutoff used to filter entries before aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalyticsWindow {
    /// Entries at most this many whole days old (always >= 1)
    Days(u32),
    /// Every entry in the log
    AllTime,
}

impl AnalyticsWindow {
    pub const WEEK: AnalyticsWindow = AnalyticsWindow::Days(7);
    pub const MONTH: AnalyticsWindow = AnalyticsWindow::Days(30);
    pub const YEAR: AnalyticsWindow = AnalyticsWindow::Days(365);

    /// Window size in days, `None` for all time.
    pub fn days(&self) -> Option<u32> {
        match self {
            AnalyticsWindow::Days(days) => Some(*days),
            AnalyticsWindow::AllTime => None,
        }
    }

    /// Whether an entry recorded at `recorded_at` falls inside this window.
    pub fn contains<Tz1: TimeZone, Tz2: TimeZone>(
        &self,
        recorded_at: &DateTime<Tz1>,
        now: &DateTime<Tz2>,
    ) -> bool {
        match self {
            AnalyticsWindow::AllTime => true,
            AnalyticsWindow::Days(days) => days_ago(recorded_at, now) <= i64::from(*days),
        }
    }

    /// Display name (e.g., "Last 7 days").
    pub fn display_name(&self) -> String {
        match self {
            AnalyticsWindow::Days(1) => "Last day".to_string(),
            AnalyticsWindow::Days(days) => format!("Last {} days", days),
            AnalyticsWindow::AllTime => "All time".to_string(),
        }
    }
}

impl Default for AnalyticsWindow {
    fn default() -> Self {
        AnalyticsWindow::MONTH
    }
}

impl TryFrom<i64> for AnalyticsWindow {
    type Error = Error;

    fn try_from(days: i64) -> Result<Self> {
        if days == ALL_TIME_SENTINEL {
            return Ok(AnalyticsWindow::AllTime);
        }
        if days <= 0 {
            return Err(Error::InvalidWindow(format!(
                "window must be a positive number of days, got {}",
                days
            )));
        }
        u32::try_from(days)
            .map(AnalyticsWindow::Days)
            .map_err(|_| Error::InvalidWindow(format!("window of {} days is too large", days)))
    }
}

impl FromStr for AnalyticsWindow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "all" | "all-time" | "alltime" => return Ok(AnalyticsWindow::AllTime),
            "week" => return Ok(AnalyticsWindow::WEEK),
            "month" => return Ok(AnalyticsWindow::MONTH),
            "year" => return Ok(AnalyticsWindow::YEAR),
            _ => {}
        }
        let days: i64 = s
            .parse()
            .map_err(|_| Error::InvalidWindow(format!("not a number of days: {:?}", s)))?;
        AnalyticsWindow::try_from(days)
    }
}

impl fmt::Display for AnalyticsWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyticsWindow::Days(days) => write!(f, "{}", days),
            AnalyticsWindow::AllTime => f.write_str("all"),
        }
    }
}

impl Serialize for AnalyticsWindow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            AnalyticsWindow::Days(days) => serializer.serialize_u32(*days),
            AnalyticsWindow::AllTime => serializer.serialize_str("all"),
        }
    }
}

impl<'de> Deserialize<'de> for AnalyticsWindow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawWindow {
            Days(i64),
            Text(String),
        }

        let parsed = match RawWindow::deserialize(deserializer)? {
            RawWindow::Days(days) => AnalyticsWindow::try_from(days),
            RawWindow::Text(text) => text.parse(),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

/// Whole days elapsed between `recorded_at` and `now` (floored; negative for future entries).
pub fn days_ago<Tz1: TimeZone, Tz2: TimeZone>(
    recorded_at: &DateTime<Tz1>,
    now: &DateTime<Tz2>,
) -> i64 {
    now.clone()
        .signed_duration_since(recorded_at.clone())
        .num_milliseconds()
        .div_euclid(MILLIS_PER_DAY)
}

/// Select the in-window entries, preserving log order.
///
/// Entries whose timestamp does not parse cannot be placed in time; they are
/// kept so their labels still count, and the temporal passes skip them.
pub fn filter_window<'a, Tz: TimeZone>(
    entries: &'a [SymptomEntry],
    window: AnalyticsWindow,
    now: &DateTime<Tz>,
) -> Vec<&'a SymptomEntry> {
    entries
        .iter()
        .filter(|entry| match entry.recorded_at() {
            Some(recorded_at) => window.contains(&recorded_at, now),
            None => true,
        })
        .collect()
}
