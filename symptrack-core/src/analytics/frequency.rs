//! Label frequency aggregation.
//!
//! Every dimension is counted independently: an entry with `n` labels in a
//! dimension contributes to `n` counters. Rankings sort by count descending
//! and break ties by the order labels were first seen while scanning entries
//! front to back. [`FrequencyMap`] keeps that first-seen order explicitly so
//! the tie-break does not depend on hash iteration order.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

use super::percentage;
use crate::types::{Dimension, SymptomEntry};

// ============================================
// Insertion-ordered counter
// ============================================

/// Label → count map that remembers first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyMap {
    counts: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl FrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `label`.
    pub fn add(&mut self, label: &str) {
        self.add_count(label, 1);
    }

    /// Count `count` occurrences of `label`.
    pub fn add_count(&mut self, label: &str, count: u64) {
        match self.index.get(label) {
            Some(&slot) => self.counts[slot].1 += count,
            None => {
                self.index.insert(label.to_string(), self.counts.len());
                self.counts.push((label.to_string(), count));
            }
        }
    }

    /// Count every label in `labels`.
    pub fn add_all<'a, I>(&mut self, labels: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for label in labels {
            self.add(label);
        }
    }

    /// Count for `label` (0 if never seen).
    pub fn get(&self, label: &str) -> u64 {
        self.index
            .get(label)
            .map(|&slot| self.counts[slot].1)
            .unwrap_or(0)
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    /// Labels and counts in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
    }

    /// Labels sorted by count descending, ties in first-seen order.
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self.iter().collect();
        // sort_by is stable, which is what makes first-seen win ties
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// The first element of [`ranked`](Self::ranked), without sorting.
    pub fn top(&self) -> Option<(&str, u64)> {
        self.iter().fold(None, |best, (label, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((label, count)),
        })
    }
}

impl<'a> FromIterator<&'a str> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut map = FrequencyMap::new();
        for label in iter {
            map.add(label);
        }
        map
    }
}

impl Serialize for FrequencyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (label, count) in &self.counts {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

// ============================================
// Per-dimension frequencies
// ============================================

/// One row of a ranked frequency list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedLabel {
    pub label: String,
    pub count: u64,
    /// `count / denominator * 100`, one decimal place
    pub percentage: f64,
}

/// Rank a map and attach percentages against `denominator`.
pub fn rank_with_percentages(map: &FrequencyMap, denominator: usize) -> Vec<RankedLabel> {
    map.ranked()
        .into_iter()
        .map(|(label, count)| RankedLabel {
            label: label.to_string(),
            count,
            percentage: percentage(count, denominator),
        })
        .collect()
}

/// Frequencies of one dimension over the in-window entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LabelFrequencies {
    /// Label → count, first-seen order
    pub counts: FrequencyMap,
    /// Ranked rows; percentages are relative to the in-window entry count
    pub ranked: Vec<RankedLabel>,
}

impl LabelFrequencies {
    /// Most frequent label and its count.
    pub fn top(&self) -> Option<&RankedLabel> {
        self.ranked.first()
    }
}

/// Frequencies for all four dimensions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrequencyReport {
    pub body_parts: LabelFrequencies,
    pub sensations: LabelFrequencies,
    pub activities: LabelFrequencies,
    pub relief_methods: LabelFrequencies,
}

impl FrequencyReport {
    pub fn get(&self, dimension: Dimension) -> &LabelFrequencies {
        match dimension {
            Dimension::BodyParts => &self.body_parts,
            Dimension::Sensations => &self.sensations,
            Dimension::Activities => &self.activities,
            Dimension::ReliefMethods => &self.relief_methods,
        }
    }
}

/// Count one dimension across the in-window entries.
pub fn aggregate_dimension(entries: &[&SymptomEntry], dimension: Dimension) -> LabelFrequencies {
    let mut counts = FrequencyMap::new();
    for entry in entries {
        counts.add_all(entry.labels(dimension));
    }
    let ranked = rank_with_percentages(&counts, entries.len());
    LabelFrequencies { counts, ranked }
}

/// Count every dimension.
pub fn aggregate_frequencies(entries: &[&SymptomEntry]) -> FrequencyReport {
    FrequencyReport {
        body_parts: aggregate_dimension(entries, Dimension::BodyParts),
        sensations: aggregate_dimension(entries, Dimension::Sensations),
        activities: aggregate_dimension(entries, Dimension::Activities),
        relief_methods: aggregate_dimension(entries, Dimension::ReliefMethods),
    }
}
