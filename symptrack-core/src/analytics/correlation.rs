//! Activity correlations.
//!
//! For every activity seen in-window, counts the body parts, sensations and
//! relief methods logged on the same entries. An activity's count is the
//! number of times it was listed, so activities rank the same way labels do
//! in [`super::frequency`].

use serde::Serialize;
use std::collections::HashMap;

use super::frequency::FrequencyMap;
use crate::types::SymptomEntry;

/// What tends to accompany one activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityCorrelation {
    pub activity: String,
    /// Times this activity was listed in-window
    pub count: u64,
    pub body_parts: FrequencyMap,
    pub sensations: FrequencyMap,
    pub relief_methods: FrequencyMap,
    pub top_body_part: Option<String>,
    pub top_sensation: Option<String>,
    pub top_relief: Option<String>,
}

impl ActivityCorrelation {
    fn new(activity: &str) -> Self {
        Self {
            activity: activity.to_string(),
            count: 0,
            body_parts: FrequencyMap::new(),
            sensations: FrequencyMap::new(),
            relief_methods: FrequencyMap::new(),
            top_body_part: None,
            top_sensation: None,
            top_relief: None,
        }
    }

    fn record(&mut self, entry: &SymptomEntry) {
        self.count += 1;
        self.body_parts.add_all(&entry.body_parts);
        self.sensations.add_all(&entry.sensations);
        self.relief_methods.add_all(&entry.relief_methods);
    }

    fn finish(mut self) -> Self {
        self.top_body_part = top_label(&self.body_parts);
        self.top_sensation = top_label(&self.sensations);
        self.top_relief = top_label(&self.relief_methods);
        self
    }
}

fn top_label(map: &FrequencyMap) -> Option<String> {
    map.top().map(|(label, _)| label.to_string())
}

/// Build one correlation row per distinct activity, busiest first.
pub fn analyze_activity_correlations(entries: &[&SymptomEntry]) -> Vec<ActivityCorrelation> {
    let mut rows: Vec<ActivityCorrelation> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        for activity in &entry.activities {
            let slot = *slots.entry(activity.as_str()).or_insert_with(|| {
                rows.push(ActivityCorrelation::new(activity));
                rows.len() - 1
            });
            rows[slot].record(entry);
        }
    }

    let mut rows: Vec<ActivityCorrelation> =
        rows.into_iter().map(ActivityCorrelation::finish).collect();
    // stable: first-seen activity wins ties
    rows.sort_by(|a, b| b.count.cmp(&a.count));

    tracing::trace!(activities = rows.len(), "Built activity correlations");
    rows
}
