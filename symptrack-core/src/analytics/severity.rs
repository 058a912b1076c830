//! Symptom breadth series.
//!
//! Severity here is breadth (`|sensations| + |bodyParts|`), not a clinical
//! score. No smoothing is applied; callers chart the raw series.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{EntryId, SymptomEntry};

/// One point of the severity series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeverityPoint {
    pub entry_id: EntryId,
    pub timestamp: DateTime<Utc>,
    pub severity: usize,
    pub body_part_count: usize,
    pub sensation_count: usize,
    /// Self-reported rating, when logged and within 1-10
    pub intensity: Option<u8>,
    /// Episode length in minutes, when logged
    pub duration_minutes: Option<u32>,
}

/// Chronological severity series. Entries sharing a timestamp keep log order.
pub fn build_severity_series(entries: &[&SymptomEntry]) -> Vec<SeverityPoint> {
    let mut series: Vec<SeverityPoint> = entries
        .iter()
        .filter_map(|entry| {
            let timestamp = entry.recorded_at()?;
            Some(SeverityPoint {
                entry_id: entry.id.clone(),
                timestamp,
                severity: entry.breadth(),
                body_part_count: entry.body_parts.len(),
                sensation_count: entry.sensations.len(),
                intensity: entry.valid_intensity(),
                duration_minutes: entry.duration,
            })
        })
        .collect();

    series.sort_by_key(|point| point.timestamp);
    series
}
