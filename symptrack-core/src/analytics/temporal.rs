//! Hour-of-day and day-of-week patterns.

use chrono::{Datelike, FixedOffset, Timelike};
use serde::Serialize;

use crate::types::SymptomEntry;

/// Number of peak hours reported.
pub const PEAK_HOUR_COUNT: usize = 3;

/// Coarse part of the day an hour belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    /// 5am until noon
    Morning,
    /// Noon until 5pm
    Afternoon,
    /// 5pm until 9pm
    Evening,
    /// Everything else
    Night,
}

impl TimeOfDay {
    pub fn from_hour(hour: u8) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }
}

/// Entry count for one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourCount {
    pub hour: u8,
    pub count: u64,
}

/// Entry count for one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCount {
    /// 0 = Sunday
    pub day: u8,
    pub name: &'static str,
    pub count: u64,
}

/// Entry counts per coarse part of the day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimeOfDayCounts {
    pub morning: u64,
    pub afternoon: u64,
    pub evening: u64,
    pub night: u64,
}

impl TimeOfDayCounts {
    fn add(&mut self, period: TimeOfDay) {
        match period {
            TimeOfDay::Morning => self.morning += 1,
            TimeOfDay::Afternoon => self.afternoon += 1,
            TimeOfDay::Evening => self.evening += 1,
            TimeOfDay::Night => self.night += 1,
        }
    }
}

/// Time-based episode patterns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimePatterns {
    /// Entry count by local hour (0-23)
    pub hourly_distribution: [u64; 24],
    /// Entry count by day of week (0=Sunday, 6=Saturday)
    pub daily_distribution: [u64; 7],
    /// Up to three busiest hours; zero-count hours are never peaks
    pub peak_hours: Vec<HourCount>,
    /// All weekdays, busiest first (empty when nothing had a usable timestamp)
    pub peak_days: Vec<DayCount>,
    /// Entry count per part of the day
    pub time_of_day: TimeOfDayCounts,
    /// Entries that contributed (valid timestamp)
    pub dated_entries: usize,
}

impl Default for TimePatterns {
    fn default() -> Self {
        Self {
            hourly_distribution: [0; 24],
            daily_distribution: [0; 7],
            peak_hours: Vec::new(),
            peak_days: Vec::new(),
            time_of_day: TimeOfDayCounts::default(),
            dated_entries: 0,
        }
    }
}

impl TimePatterns {
    /// Get day name from index.
    pub fn day_name(day: u8) -> &'static str {
        match day {
            0 => "Sunday",
            1 => "Monday",
            2 => "Tuesday",
            3 => "Wednesday",
            4 => "Thursday",
            5 => "Friday",
            6 => "Saturday",
            _ => "Unknown",
        }
    }

    /// Get hour display (e.g., "10am–11am").
    pub fn hour_display(hour: u8) -> String {
        let h = hour % 12;
        let h = if h == 0 { 12 } else { h };
        let period = if hour < 12 { "am" } else { "pm" };
        let next_h = (hour + 1) % 12;
        let next_h = if next_h == 0 { 12 } else { next_h };
        let next_period = if (hour + 1) % 24 < 12 { "am" } else { "pm" };
        format!("{}{}–{}{}", h, period, next_h, next_period)
    }

    /// The single most frequent hour, if any entry was dated.
    pub fn peak_hour(&self) -> Option<HourCount> {
        self.peak_hours.first().copied()
    }
}

/// Bucket entries by local hour and weekday in `offset`.
///
/// Entries whose timestamp does not parse are skipped here only.
pub fn analyze_time_patterns(entries: &[&SymptomEntry], offset: &FixedOffset) -> TimePatterns {
    let mut patterns = TimePatterns::default();

    for entry in entries {
        let Some(local) = entry.recorded_at_in(offset) else {
            continue;
        };
        let hour = local.hour() as usize;
        let day = local.weekday().num_days_from_sunday() as usize;

        patterns.hourly_distribution[hour] += 1;
        patterns.daily_distribution[day] += 1;
        patterns.time_of_day.add(TimeOfDay::from_hour(hour as u8));
        patterns.dated_entries += 1;
    }

    if patterns.dated_entries == 0 {
        return patterns;
    }

    let mut hours: Vec<HourCount> = patterns
        .hourly_distribution
        .iter()
        .enumerate()
        .map(|(hour, &count)| HourCount {
            hour: hour as u8,
            count,
        })
        .collect();
    // stable: equal counts stay in ascending hour order
    hours.sort_by(|a, b| b.count.cmp(&a.count));
    hours.truncate(PEAK_HOUR_COUNT);
    patterns.peak_hours = hours;

    let mut days: Vec<DayCount> = patterns
        .daily_distribution
        .iter()
        .enumerate()
        .map(|(day, &count)| DayCount {
            day: day as u8,
            name: TimePatterns::day_name(day as u8),
            count,
        })
        .collect();
    days.sort_by(|a, b| b.count.cmp(&a.count));
    patterns.peak_days = days;

    patterns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ts: &str) -> SymptomEntry {
        SymptomEntry {
            timestamp: ts.to_string(),
            body_parts: vec!["Chest".to_string()],
            sensations: vec!["Racing Heart".to_string()],
            ..Default::default()
        }
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_hour_and_weekday_buckets() {
        // 2025-01-05 is a Sunday
        let a = at("2025-01-05T09:15:00Z");
        let b = at("2025-01-05T09:45:00Z");
        let c = at("2025-01-06T22:00:00Z");
        let entries = vec![&a, &b, &c];

        let patterns = analyze_time_patterns(&entries, &utc());
        assert_eq!(patterns.hourly_distribution[9], 2);
        assert_eq!(patterns.hourly_distribution[22], 1);
        assert_eq!(patterns.daily_distribution[0], 2);
        assert_eq!(patterns.daily_distribution[1], 1);
        assert_eq!(patterns.time_of_day.morning, 2);
        assert_eq!(patterns.time_of_day.night, 1);
        assert_eq!(
            patterns.peak_hours,
            vec![
                HourCount { hour: 9, count: 2 },
                HourCount { hour: 22, count: 1 },
                HourCount { hour: 0, count: 0 },
            ]
        );
        assert_eq!(patterns.peak_days.len(), 7);
        assert_eq!(patterns.peak_days[0].name, "Sunday");
        assert_eq!(patterns.peak_days[1].name, "Monday");
        // remaining zero-count days keep weekday order
        assert_eq!(patterns.peak_days[2].name, "Tuesday");
    }

    #[test]
    fn test_peak_hour_ties_prefer_lower_hour() {
        let a = at("2025-01-05T20:00:00Z");
        let b = at("2025-01-05T03:00:00Z");
        let c = at("2025-01-05T14:00:00Z");
        let d = at("2025-01-05T07:00:00Z");
        let entries = vec![&a, &b, &c, &d];

        let patterns = analyze_time_patterns(&entries, &utc());
        let hours: Vec<u8> = patterns.peak_hours.iter().map(|h| h.hour).collect();
        assert_eq!(hours, vec![3, 7, 14]);
    }

    #[test]
    fn test_single_entry_fills_peaks_with_lowest_hours() {
        let a = at("2025-06-14T08:30:00Z");
        let entries = vec![&a];

        let patterns = analyze_time_patterns(&entries, &utc());
        assert_eq!(
            patterns.peak_hours,
            vec![
                HourCount { hour: 8, count: 1 },
                HourCount { hour: 0, count: 0 },
                HourCount { hour: 1, count: 0 },
            ]
        );
        assert_eq!(patterns.peak_hour(), Some(HourCount { hour: 8, count: 1 }));
        assert_eq!(patterns.peak_days.len(), 7);
    }

    #[test]
    fn test_local_offset_shifts_hour_and_day() {
        // 23:30 UTC Saturday is 01:30 Sunday at UTC+2
        let a = at("2025-01-04T23:30:00Z");
        let entries = vec![&a];
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        let patterns = analyze_time_patterns(&entries, &plus_two);
        assert_eq!(patterns.hourly_distribution[1], 1);
        assert_eq!(patterns.daily_distribution[0], 1);
    }

    #[test]
    fn test_bad_timestamps_are_skipped() {
        let a = at("Invalid Date");
        let b = at("2025-01-05T12:00:00Z");
        let entries = vec![&a, &b];

        let patterns = analyze_time_patterns(&entries, &utc());
        assert_eq!(patterns.dated_entries, 1);
        assert_eq!(patterns.hourly_distribution.iter().sum::<u64>(), 1);
    }

    #[test]
    fn test_empty_input_has_no_peaks() {
        let patterns = analyze_time_patterns(&[], &utc());
        assert!(patterns.peak_hours.is_empty());
        assert!(patterns.peak_days.is_empty());
        assert_eq!(patterns.peak_hour(), None);
    }

    #[test]
    fn test_time_of_day_boundaries() {
        assert_eq!(TimeOfDay::from_hour(4), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(21), TimeOfDay::Night);
    }

    #[test]
    fn test_hour_display() {
        assert_eq!(TimePatterns::hour_display(0), "12am–1am");
        assert_eq!(TimePatterns::hour_display(12), "12pm–1pm");
        assert_eq!(TimePatterns::hour_display(23), "11pm–12am");
    }
}
