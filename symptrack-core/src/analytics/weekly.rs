//! Weeks-ago trend buckets.

use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::collections::BTreeMap;

use super::frequency::FrequencyMap;
use crate::types::SymptomEntry;
use crate::window::MILLIS_PER_DAY;

const MILLIS_PER_WEEK: i64 = 7 * MILLIS_PER_DAY;

/// Entries that fell in the same whole-week distance from `now`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyBucket {
    /// `floor((now - timestamp) / 7 days)`
    pub weeks_ago: i64,
    /// "This Week" or "{n} weeks ago"
    pub label: String,
    pub count: u64,
    pub body_parts: FrequencyMap,
    pub sensations: FrequencyMap,
}

impl WeeklyBucket {
    fn new(weeks_ago: i64) -> Self {
        Self {
            weeks_ago,
            label: week_label(weeks_ago),
            count: 0,
            body_parts: FrequencyMap::new(),
            sensations: FrequencyMap::new(),
        }
    }
}

/// Display label for a weeks-ago distance.
pub fn week_label(weeks_ago: i64) -> String {
    if weeks_ago == 0 {
        "This Week".to_string()
    } else {
        format!("{} weeks ago", weeks_ago)
    }
}

/// Whole weeks between `recorded_at` and `now`, floored.
pub fn weeks_ago<Tz1: TimeZone, Tz2: TimeZone>(
    recorded_at: &DateTime<Tz1>,
    now: &DateTime<Tz2>,
) -> i64 {
    now.clone()
        .signed_duration_since(recorded_at.clone())
        .num_milliseconds()
        .div_euclid(MILLIS_PER_WEEK)
}

/// Group entries into weeks-ago buckets, most recent first.
///
/// Entries without a usable timestamp are skipped.
pub fn build_weekly_trends<Tz: TimeZone>(
    entries: &[&SymptomEntry],
    now: &DateTime<Tz>,
) -> Vec<WeeklyBucket> {
    let mut buckets: BTreeMap<i64, WeeklyBucket> = BTreeMap::new();

    for entry in entries {
        let Some(recorded_at) = entry.recorded_at() else {
            continue;
        };
        let weeks = weeks_ago(&recorded_at, now);
        let bucket = buckets
            .entry(weeks)
            .or_insert_with(|| WeeklyBucket::new(weeks));
        bucket.count += 1;
        bucket.body_parts.add_all(&entry.body_parts);
        bucket.sensations.add_all(&entry.sensations);
    }

    buckets.into_values().collect()
}
