//! Relief method usage.
//!
//! The percentage denominator is the number of in-window entries that list at
//! least one relief method. Entries where nothing was tried are left out of
//! the denominator rather than counted as a failed attempt.

use serde::Serialize;

use super::frequency::{rank_with_percentages, FrequencyMap, RankedLabel};
use crate::types::SymptomEntry;

/// Usage table for coping methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReliefEffectiveness {
    /// Method → usage count, first-seen order
    pub counts: FrequencyMap,
    /// Ranked methods with percentage of relief-attempting entries
    pub methods: Vec<RankedLabel>,
    /// Entries with at least one relief method
    pub entries_with_relief: usize,
}

impl ReliefEffectiveness {
    /// Most used method.
    pub fn top(&self) -> Option<&RankedLabel> {
        self.methods.first()
    }
}

pub fn analyze_relief_methods(entries: &[&SymptomEntry]) -> ReliefEffectiveness {
    let mut counts = FrequencyMap::new();
    let mut entries_with_relief = 0;

    for entry in entries {
        if entry.relief_methods.is_empty() {
            continue;
        }
        entries_with_relief += 1;
        counts.add_all(&entry.relief_methods);
    }

    let methods = rank_with_percentages(&counts, entries_with_relief);
    ReliefEffectiveness {
        counts,
        methods,
        entries_with_relief,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(relief: &[&str]) -> SymptomEntry {
        SymptomEntry {
            timestamp: "2025-01-01T00:00:00Z".to_string(),
            relief_methods: relief.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_denominator_excludes_entries_without_relief() {
        let a = entry(&["Deep Breathing"]);
        let b = entry(&["Deep Breathing", "Walking"]);
        let c = entry(&[]);
        let d = entry(&[]);
        let entries = vec![&a, &b, &c, &d];

        let relief = analyze_relief_methods(&entries);
        assert_eq!(relief.entries_with_relief, 2);
        assert_eq!(relief.methods[0].label, "Deep Breathing");
        assert_eq!(relief.methods[0].count, 2);
        assert_eq!(relief.methods[0].percentage, 100.0);
        assert_eq!(relief.methods[1].label, "Walking");
        assert_eq!(relief.methods[1].percentage, 50.0);
    }

    #[test]
    fn test_no_relief_attempts() {
        let a = entry(&[]);
        let entries = vec![&a];

        let relief = analyze_relief_methods(&entries);
        assert_eq!(relief.entries_with_relief, 0);
        assert!(relief.methods.is_empty());
        assert!(relief.top().is_none());
    }
}
