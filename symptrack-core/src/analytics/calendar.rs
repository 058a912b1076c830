//! Per-day rollup for the calendar view.

use chrono::{FixedOffset, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::types::SymptomEntry;

/// Everything logged on one local calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub count: u64,
    /// Distinct body parts, first-seen order
    pub body_parts: Vec<String>,
    /// Distinct sensations, first-seen order
    pub sensations: Vec<String>,
}

fn push_distinct(target: &mut Vec<String>, labels: &[String]) {
    for label in labels {
        if !target.contains(label) {
            target.push(label.clone());
        }
    }
}

/// Roll entries up by local date in `offset`, oldest day first.
pub fn build_calendar(entries: &[&SymptomEntry], offset: &FixedOffset) -> Vec<CalendarDay> {
    let mut days: BTreeMap<NaiveDate, CalendarDay> = BTreeMap::new();

    for entry in entries {
        let Some(local) = entry.recorded_at_in(offset) else {
            continue;
        };
        let date = local.date_naive();
        let day = days.entry(date).or_insert_with(|| CalendarDay {
            date,
            count: 0,
            body_parts: Vec::new(),
            sensations: Vec::new(),
        });
        day.count += 1;
        push_distinct(&mut day.body_parts, &entry.body_parts);
        push_distinct(&mut day.sensations, &entry.sensations);
    }

    days.into_values().collect()
}
