//! Templated insight sentences.
//!
//! Sentences always come out in the same order. A sentence whose source
//! aggregate is empty is dropped; nothing is reordered to fill the gap.

use super::correlation::ActivityCorrelation;
use super::frequency::FrequencyReport;
use super::relief::ReliefEffectiveness;
use super::temporal::{TimeOfDay, TimePatterns};
use crate::types::Dimension;

fn times(count: u64) -> String {
    if count == 1 {
        "1 time".to_string()
    } else {
        format!("{} times", count)
    }
}

/// Build the ordered insight list from the aggregate passes.
pub fn compose_insights(
    frequencies: &FrequencyReport,
    time_patterns: &TimePatterns,
    activities: &[ActivityCorrelation],
    relief: &ReliefEffectiveness,
) -> Vec<String> {
    let mut insights = Vec::new();

    for dimension in [Dimension::BodyParts, Dimension::Sensations] {
        if let Some(top) = frequencies.get(dimension).top() {
            insights.push(format!(
                "Your most frequent {} is {} ({}).",
                dimension.noun(),
                top.label,
                times(top.count)
            ));
        }
    }

    if let Some(top) = activities.first() {
        insights.push(format!(
            "Your most frequent {} is {} ({}).",
            Dimension::Activities.noun(),
            top.activity,
            times(top.count)
        ));
    }

    if let Some(peak) = time_patterns.peak_hour() {
        insights.push(format!(
            "Episodes tend to happen in the {}, most often around {} ({}).",
            TimeOfDay::from_hour(peak.hour).as_str(),
            TimePatterns::hour_display(peak.hour),
            times(peak.count)
        ));
    }

    if let Some(top) = relief.top() {
        insights.push(format!(
            "Your most used {} is {} ({}).",
            Dimension::ReliefMethods.noun(),
            top.label,
            times(top.count)
        ));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::correlation::analyze_activity_correlations;
    use crate::analytics::frequency::aggregate_frequencies;
    use crate::analytics::relief::analyze_relief_methods;
    use crate::analytics::temporal::analyze_time_patterns;
    use crate::types::SymptomEntry;
    use chrono::FixedOffset;

    fn compose(entries: &[&SymptomEntry]) -> Vec<String> {
        let utc = FixedOffset::east_opt(0).unwrap();
        compose_insights(
            &aggregate_frequencies(entries),
            &analyze_time_patterns(entries, &utc),
            &analyze_activity_correlations(entries),
            &analyze_relief_methods(entries),
        )
    }

    #[test]
    fn test_full_insight_order() {
        let entry = SymptomEntry {
            timestamp: "2025-01-06T18:20:00Z".to_string(),
            body_parts: vec!["Chest".to_string()],
            sensations: vec!["Racing Heart".to_string()],
            activities: vec!["Working".to_string()],
            relief_methods: vec!["Deep Breathing".to_string()],
            ..Default::default()
        };
        let second = entry.clone();
        let insights = compose(&[&entry, &second]);

        assert_eq!(
            insights,
            vec![
                "Your most frequent body part is Chest (2 times).",
                "Your most frequent sensation is Racing Heart (2 times).",
                "Your most frequent activity is Working (2 times).",
                "Episodes tend to happen in the evening, most often around 6pm–7pm (2 times).",
                "Your most used relief method is Deep Breathing (2 times).",
            ]
        );
    }

    #[test]
    fn test_missing_aggregates_are_skipped_not_reordered() {
        let entry = SymptomEntry {
            timestamp: "not a timestamp".to_string(),
            sensations: vec!["Nausea".to_string()],
            relief_methods: vec!["Cold Water".to_string()],
            ..Default::default()
        };
        let insights = compose(&[&entry]);

        assert_eq!(
            insights,
            vec![
                "Your most frequent sensation is Nausea (1 time).",
                "Your most used relief method is Cold Water (1 time).",
            ]
        );
    }

    #[test]
    fn test_no_entries_no_insights() {
        assert!(compose(&[]).is_empty());
    }
}
