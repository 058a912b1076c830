//! Pattern analytics for the episode log.
//!
//! Every pass is a pure function of the in-window entries (plus `now` where
//! time matters):
//! - Frequency aggregation per dimension
//! - Hour-of-day / day-of-week patterns
//! - Activity correlations
//! - Weekly trends
//! - Severity (breadth) series
//! - Relief method usage
//! - Body-part and sensation profiles, calendar rollup, overview totals
//! - Insight sentences composed from the above
//!
//! [`engine`] filters the window once and runs every pass, producing an
//! [`AnalyticsResult`]. Nothing is cached between calls.

pub mod calendar;
pub mod correlation;
pub mod engine;
pub mod frequency;
pub mod insights;
pub mod overview;
pub mod profiles;
pub mod relief;
pub mod severity;
pub mod temporal;
pub mod weekly;

pub use calendar::{build_calendar, CalendarDay};
pub use correlation::{analyze_activity_correlations, ActivityCorrelation};
pub use engine::{
    compute_analytics, AnalyticsEngine, AnalyticsResult, Clock, FixedClock, OffsetClock,
    SystemClock,
};
pub use frequency::{
    aggregate_dimension, aggregate_frequencies, FrequencyMap, FrequencyReport, LabelFrequencies,
    RankedLabel,
};
pub use insights::compose_insights;
pub use overview::{summarize, Overview};
pub use profiles::{
    build_body_part_profiles, build_sensation_profiles, BodyPartProfile, SensationProfile,
};
pub use relief::{analyze_relief_methods, ReliefEffectiveness};
pub use severity::{build_severity_series, SeverityPoint};
pub use temporal::{analyze_time_patterns, DayCount, HourCount, TimeOfDay, TimePatterns};
pub use weekly::{build_weekly_trends, WeeklyBucket};

/// Round to one decimal place.
pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `count / denominator * 100`, one decimal place; 0 when the denominator is 0.
pub(crate) fn percentage(count: u64, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        round_one_decimal(count as f64 / denominator as f64 * 100.0)
    }
}
