//! Headline totals for the dashboard cards.

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use super::round_one_decimal;
use crate::types::SymptomEntry;
use crate::window::{days_ago, AnalyticsWindow};

/// Headline numbers for the in-window entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Overview {
    pub total_entries: usize,
    pub well_formed_entries: usize,
    /// Entries missing body parts, sensations or a valid timestamp
    pub malformed_entries: usize,
    /// Entries whose timestamp does not parse
    pub undated_entries: usize,
    /// Entries per day, one decimal
    pub daily_average: f64,
    /// Mean of valid 1-10 intensities, one decimal
    pub average_intensity: Option<f64>,
}

/// Summarize the in-window entries.
///
/// The daily average divides by the window length, capped at the entry count
/// so a sparse log is not averaged over empty days. For all-time windows the
/// length runs from the earliest dated entry to `now`.
pub fn summarize<Tz: TimeZone>(
    entries: &[&SymptomEntry],
    window: AnalyticsWindow,
    now: &DateTime<Tz>,
) -> Overview {
    let total_entries = entries.len();
    let well_formed_entries = entries.iter().filter(|e| e.is_well_formed()).count();

    let dated: Vec<_> = entries.iter().filter_map(|e| e.recorded_at()).collect();
    let undated_entries = total_entries - dated.len();

    let window_days = match window.days() {
        Some(days) => days as usize,
        None => dated
            .iter()
            .min()
            .map(|earliest| (days_ago(earliest, now) + 1).max(1) as usize)
            .unwrap_or(1),
    };
    let divisor = window_days.min(total_entries.max(1));
    let daily_average = round_one_decimal(total_entries as f64 / divisor as f64);

    let intensities: Vec<u8> = entries.iter().filter_map(|e| e.valid_intensity()).collect();
    let average_intensity = if intensities.is_empty() {
        None
    } else {
        let sum: u64 = intensities.iter().map(|&i| u64::from(i)).sum();
        Some(round_one_decimal(sum as f64 / intensities.len() as f64))
    };

    Overview {
        total_entries,
        well_formed_entries,
        malformed_entries: total_entries - well_formed_entries,
        undated_entries,
        daily_average,
        average_intensity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn entry(ts: String, intensity: Option<i64>) -> SymptomEntry {
        SymptomEntry {
            timestamp: ts,
            body_parts: vec!["Chest".to_string()],
            sensations: vec!["Tightness".to_string()],
            intensity,
            ..Default::default()
        }
    }

    #[test]
    fn test_counts_and_intensity() {
        let now = Utc::now();
        let a = entry((now - Duration::days(1)).to_rfc3339(), Some(6));
        let b = entry((now - Duration::days(2)).to_rfc3339(), Some(9));
        let c = entry("garbage".to_string(), Some(42));
        let entries = vec![&a, &b, &c];

        let overview = summarize(&entries, AnalyticsWindow::WEEK, &now);
        assert_eq!(overview.total_entries, 3);
        assert_eq!(overview.well_formed_entries, 2);
        assert_eq!(overview.malformed_entries, 1);
        assert_eq!(overview.undated_entries, 1);
        assert_eq!(overview.average_intensity, Some(7.5));
        // 3 entries over min(7, 3) days
        assert_eq!(overview.daily_average, 1.0);
    }

    #[test]
    fn test_daily_average_over_long_window() {
        let now = Utc::now();
        let owned: Vec<SymptomEntry> = (0..15)
            .map(|i| entry((now - Duration::hours(i)).to_rfc3339(), None))
            .collect();
        let entries: Vec<&SymptomEntry> = owned.iter().collect();

        let overview = summarize(&entries, AnalyticsWindow::Days(10), &now);
        assert_eq!(overview.daily_average, 1.5);
        assert_eq!(overview.average_intensity, None);
    }

    #[test]
    fn test_all_time_uses_span_since_earliest_entry() {
        let now = Utc::now();
        let owned: Vec<SymptomEntry> = (0..8)
            .map(|i| entry((now - Duration::days(i)).to_rfc3339(), None))
            .collect();
        let entries: Vec<&SymptomEntry> = owned.iter().collect();

        // earliest is 7 days ago, so 8 calendar days
        let overview = summarize(&entries, AnalyticsWindow::AllTime, &now);
        assert_eq!(overview.daily_average, 1.0);
    }

    #[test]
    fn test_empty() {
        let now = Utc::now();
        let overview = summarize(&[], AnalyticsWindow::MONTH, &now);
        assert_eq!(overview, Overview::default());
    }
}
