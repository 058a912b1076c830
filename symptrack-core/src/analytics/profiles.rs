//! Body-part and sensation profiles.

use serde::Serialize;
use std::collections::HashMap;

use super::frequency::FrequencyMap;
use super::{percentage, round_one_decimal};
use crate::types::SymptomEntry;

/// Sensations logged together with one body part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyPartProfile {
    pub body_part: String,
    pub count: u64,
    pub percentage: f64,
    pub sensations: FrequencyMap,
}

/// How often a sensation shows up and how broad its episodes are.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensationProfile {
    pub sensation: String,
    pub count: u64,
    /// Share of in-window entries listing it
    pub frequency: f64,
    /// Mean number of sensations on the entries that list it
    pub average_breadth: f64,
}

/// One profile per body part, ranked by count.
pub fn build_body_part_profiles(entries: &[&SymptomEntry]) -> Vec<BodyPartProfile> {
    let mut profiles: Vec<BodyPartProfile> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        for part in &entry.body_parts {
            let slot = *slots.entry(part.as_str()).or_insert_with(|| {
                profiles.push(BodyPartProfile {
                    body_part: part.clone(),
                    count: 0,
                    percentage: 0.0,
                    sensations: FrequencyMap::new(),
                });
                profiles.len() - 1
            });
            let profile = &mut profiles[slot];
            profile.count += 1;
            profile.sensations.add_all(&entry.sensations);
        }
    }

    for profile in &mut profiles {
        profile.percentage = percentage(profile.count, entries.len());
    }
    profiles.sort_by(|a, b| b.count.cmp(&a.count));
    profiles
}

/// One profile per sensation, ranked by count.
pub fn build_sensation_profiles(entries: &[&SymptomEntry]) -> Vec<SensationProfile> {
    let mut counts = FrequencyMap::new();
    let mut breadth = FrequencyMap::new();

    for entry in entries {
        for sensation in &entry.sensations {
            counts.add(sensation);
            breadth.add_count(sensation, entry.sensations.len() as u64);
        }
    }

    counts
        .ranked()
        .into_iter()
        .map(|(sensation, count)| SensationProfile {
            sensation: sensation.to_string(),
            count,
            frequency: percentage(count, entries.len()),
            average_breadth: round_one_decimal(breadth.get(sensation) as f64 / count as f64),
        })
        .collect()
}
