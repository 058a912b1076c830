//! Analytics engine
//!
//! Filters the episode log to the requested window and runs every pass over
//! the in-window entries.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      ANALYTICS ENGINE                        │
//! │                                                              │
//! │   entries ──► filter_window(window, now) ──► in-window       │
//! │                                                 │            │
//! │      ┌──────────────┬──────────────┬────────────┼─────────┐  │
//! │      ▼              ▼              ▼            ▼         ▼  │
//! │  frequencies   time patterns  correlations   relief   weekly │
//! │      │              │              │            │   severity │
//! │      └──────────────┴──────┬───────┴────────────┘   calendar │
//! │                            ▼                        profiles │
//! │                    compose_insights                          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use symptrack_core::analytics::AnalyticsEngine;
//! use symptrack_core::SymptomEntry;
//!
//! let entries: Vec<SymptomEntry> = Vec::new();
//! let engine = AnalyticsEngine::new();
//! let result = engine.compute(&entries, 30).expect("30 is a valid window");
//! assert!(result.insights.is_empty());
//! ```

use chrono::{DateTime, FixedOffset, Local};
use serde::Serialize;
use std::time::Instant;

use super::calendar::{build_calendar, CalendarDay};
use super::correlation::{analyze_activity_correlations, ActivityCorrelation};
use super::frequency::{aggregate_frequencies, FrequencyReport};
use super::insights::compose_insights;
use super::overview::{summarize, Overview};
use super::profiles::{
    build_body_part_profiles, build_sensation_profiles, BodyPartProfile, SensationProfile,
};
use super::relief::{analyze_relief_methods, ReliefEffectiveness};
use super::severity::{build_severity_series, SeverityPoint};
use super::temporal::{analyze_time_patterns, TimePatterns};
use super::weekly::{build_weekly_trends, WeeklyBucket};
use crate::error::Result;
use crate::types::SymptomEntry;
use crate::window::{filter_window, AnalyticsWindow};

// ============================================
// Clock
// ============================================

/// Source of "now".
///
/// The offset of the returned instant is the local timezone used for hour,
/// weekday and calendar bucketing.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in the machine's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Wall clock reported in a configured UTC offset (falls back to local time).
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetClock {
    offset: Option<FixedOffset>,
}

impl OffsetClock {
    pub fn new(offset: Option<FixedOffset>) -> Self {
        Self { offset }
    }
}

impl Clock for OffsetClock {
    fn now(&self) -> DateTime<FixedOffset> {
        match self.offset {
            Some(offset) => Local::now().with_timezone(&offset),
            None => Local::now().fixed_offset(),
        }
    }
}

/// Clock frozen at one instant, for tests and reproducible reports.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<FixedOffset>);

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

// ============================================
// Result
// ============================================

/// Everything derived from one pass over the log.
///
/// Every field is always populated; empty input gives empty maps and lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsResult {
    /// The instant the window was measured from
    pub generated_at: DateTime<FixedOffset>,
    pub window: AnalyticsWindow,
    pub overview: Overview,
    pub frequencies: FrequencyReport,
    pub body_part_profiles: Vec<BodyPartProfile>,
    pub sensation_profiles: Vec<SensationProfile>,
    pub time_patterns: TimePatterns,
    /// Busiest activity first
    pub activity_correlations: Vec<ActivityCorrelation>,
    /// Ascending by weeks ago
    pub weekly_trends: Vec<WeeklyBucket>,
    /// Ascending by timestamp
    pub severity_series: Vec<SeverityPoint>,
    pub relief_effectiveness: ReliefEffectiveness,
    /// Ascending by date
    pub calendar: Vec<CalendarDay>,
    pub insights: Vec<String>,
}

/// Run every pass over the entries in `window`, measured from `now`.
///
/// Never fails: malformed entries are absorbed by the individual passes.
pub fn compute_analytics(
    entries: &[SymptomEntry],
    window: AnalyticsWindow,
    now: &DateTime<FixedOffset>,
) -> AnalyticsResult {
    let offset = now.offset();
    let in_window = filter_window(entries, window, now);

    tracing::debug!(
        total = entries.len(),
        in_window = in_window.len(),
        window = %window,
        "Filtered episode log"
    );

    let frequencies = aggregate_frequencies(&in_window);
    let time_patterns = analyze_time_patterns(&in_window, offset);
    let activity_correlations = analyze_activity_correlations(&in_window);
    let relief_effectiveness = analyze_relief_methods(&in_window);
    let insights = compose_insights(
        &frequencies,
        &time_patterns,
        &activity_correlations,
        &relief_effectiveness,
    );

    AnalyticsResult {
        generated_at: *now,
        window,
        overview: summarize(&in_window, window, now),
        body_part_profiles: build_body_part_profiles(&in_window),
        sensation_profiles: build_sensation_profiles(&in_window),
        weekly_trends: build_weekly_trends(&in_window, now),
        severity_series: build_severity_series(&in_window),
        calendar: build_calendar(&in_window, offset),
        frequencies,
        time_patterns,
        activity_correlations,
        relief_effectiveness,
        insights,
    }
}

// ============================================
// Engine
// ============================================

/// Computes analytics against an injectable clock.
///
/// Holds no state besides the clock, so one engine can serve any number of
/// callers.
pub struct AnalyticsEngine<C: Clock = SystemClock> {
    clock: C,
}

impl AnalyticsEngine<SystemClock> {
    /// Engine using the local wall clock.
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl Default for AnalyticsEngine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> AnalyticsEngine<C> {
    /// Engine using a custom clock.
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Compute analytics for a raw window value.
    ///
    /// `window_days` must be positive or [`crate::window::ALL_TIME_SENTINEL`];
    /// anything else is rejected before any aggregation runs.
    pub fn compute(&self, entries: &[SymptomEntry], window_days: i64) -> Result<AnalyticsResult> {
        let window = AnalyticsWindow::try_from(window_days).map_err(|e| {
            tracing::warn!(window_days, error = %e, "Rejected analytics window");
            e
        })?;
        Ok(self.compute_window(entries, window))
    }

    /// Compute analytics for an already validated window.
    pub fn compute_window(
        &self,
        entries: &[SymptomEntry],
        window: AnalyticsWindow,
    ) -> AnalyticsResult {
        let now = self.clock.now();
        let start = Instant::now();

        let result = compute_analytics(entries, window, &now);

        tracing::info!(
            window = %window,
            entries = entries.len(),
            in_window = result.overview.total_entries,
            malformed = result.overview.malformed_entries,
            insights = result.insights.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Computed symptom analytics"
        );

        result
    }
}
