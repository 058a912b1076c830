//! Core domain types for symptrack
//!
//! A [`SymptomEntry`] is one logged episode. Entries arrive from the logging
//! layer as JSON records and are never mutated by the analytics passes.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Entry** | One logged episode |
//! | **Dimension** | A multi-valued attribute of an entry (body parts, sensations, activities, relief methods) |
//! | **Label** | One free-text value inside a dimension, e.g. "Chest" |
//! | **Breadth** | Number of body parts plus number of sensations in an entry |
//!
//! Labels are open vocabulary: users can type their own relief methods and
//! activities, so aggregation is keyed by the raw string.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================
// Entry identity
// ============================================

/// Opaque, creation-ordered entry identifier.
///
/// Logs written by the web client use `Date.now()` numbers, newer records use
/// strings. Both are kept as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
            Other(serde_json::Value),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => EntryId(s),
            RawId::Number(n) => EntryId(n.to_string()),
            RawId::Other(_) => EntryId::default(),
        })
    }
}

// ============================================
// Dimensions
// ============================================

/// A multi-valued attribute of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    BodyParts,
    Sensations,
    Activities,
    ReliefMethods,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::BodyParts,
        Dimension::Sensations,
        Dimension::Activities,
        Dimension::ReliefMethods,
    ];

    /// Singular display noun used in insights and reports.
    pub fn noun(&self) -> &'static str {
        match self {
            Dimension::BodyParts => "body part",
            Dimension::Sensations => "sensation",
            Dimension::Activities => "activity",
            Dimension::ReliefMethods => "relief method",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::BodyParts => "body_parts",
            Dimension::Sensations => "sensations",
            Dimension::Activities => "activities",
            Dimension::ReliefMethods => "relief_methods",
        }
    }
}

// ============================================
// Symptom entry
// ============================================

/// One logged episode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomEntry {
    /// Opaque identifier assigned by the logging layer
    #[serde(default)]
    pub id: EntryId,
    /// Raw timestamp as logged (RFC 3339 text, or epoch milliseconds)
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub timestamp: String,
    /// Body-region labels, in the order they were picked
    #[serde(default, deserialize_with = "deserialize_labels")]
    pub body_parts: Vec<String>,
    /// Sensation labels
    #[serde(default, deserialize_with = "deserialize_labels")]
    pub sensations: Vec<String>,
    /// Context/activity labels
    #[serde(default, deserialize_with = "deserialize_labels")]
    pub activities: Vec<String>,
    /// Coping methods attempted; empty when nothing was tried
    #[serde(default, deserialize_with = "deserialize_labels")]
    pub relief_methods: Vec<String>,
    /// Severity rating, expected 1-10
    #[serde(default, alias = "overallIntensity", deserialize_with = "deserialize_whole_number")]
    pub intensity: Option<i64>,
    /// Elapsed minutes
    #[serde(default, deserialize_with = "deserialize_minutes")]
    pub duration: Option<u32>,
    /// Free-text notes (never analysed)
    #[serde(
        default,
        deserialize_with = "deserialize_notes",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
}

impl SymptomEntry {
    /// Returns the labels this entry carries for a dimension.
    pub fn labels(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::BodyParts => &self.body_parts,
            Dimension::Sensations => &self.sensations,
            Dimension::Activities => &self.activities,
            Dimension::ReliefMethods => &self.relief_methods,
        }
    }

    /// Parsed timestamp, or `None` when the raw value is not a valid instant.
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }

    /// Parsed timestamp shifted into the given offset (for local hour/day bucketing).
    pub fn recorded_at_in(&self, offset: &FixedOffset) -> Option<DateTime<FixedOffset>> {
        self.recorded_at().map(|ts| ts.with_timezone(offset))
    }

    /// An entry is well-formed when it has body parts, sensations and a valid timestamp.
    pub fn is_well_formed(&self) -> bool {
        !self.body_parts.is_empty() && !self.sensations.is_empty() && self.recorded_at().is_some()
    }

    /// Number of body parts plus number of sensations.
    pub fn breadth(&self) -> usize {
        self.body_parts.len() + self.sensations.len()
    }

    /// Intensity if it lies in the 1-10 rating range.
    pub fn valid_intensity(&self) -> Option<u8> {
        self.intensity
            .filter(|value| (1..=10).contains(value))
            .map(|value| value as u8)
    }
}

/// Parse a logged timestamp.
///
/// Accepts RFC 3339 (`2025-03-01T09:30:00.000Z`), an offset-less ISO
/// date-time or bare date (read as UTC), or a string of epoch milliseconds.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc());
    }

    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return raw
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis);
    }

    None
}

fn deserialize_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Text(String),
        Millis(i64),
        Other(serde_json::Value),
    }

    Ok(match Option::<RawTimestamp>::deserialize(deserializer)? {
        Some(RawTimestamp::Text(s)) => s,
        Some(RawTimestamp::Millis(ms)) => ms.to_string(),
        Some(RawTimestamp::Other(_)) | None => String::new(),
    })
}

/// Label arrays keep their string elements; anything else in the slot is empty.
fn deserialize_labels<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawLabels {
        List(Vec<serde_json::Value>),
        Other(serde_json::Value),
    }

    Ok(match Option::<RawLabels>::deserialize(deserializer)? {
        Some(RawLabels::List(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(label) => Some(label),
                _ => None,
            })
            .collect(),
        Some(RawLabels::Other(_)) | None => Vec::new(),
    })
}

fn deserialize_notes<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(text)) => Some(text),
        _ => None,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Whole(i64),
    Other(serde_json::Value),
}

/// Integers only; fractions, strings and other shapes read as absent.
fn deserialize_whole_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<i64>, D::Error> {
    Ok(match Option::<RawNumber>::deserialize(deserializer)? {
        Some(RawNumber::Whole(value)) => Some(value),
        Some(RawNumber::Other(_)) | None => None,
    })
}

fn deserialize_minutes<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<u32>, D::Error> {
    Ok(deserialize_whole_number(deserializer)?.and_then(|value| u32::try_from(value).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_web_client_record() {
        let entry: SymptomEntry = serde_json::from_value(json!({
            "id": 1735689600000_i64,
            "timestamp": "2025-01-01T00:00:00.000Z",
            "bodyParts": ["Chest", "Throat"],
            "sensations": ["Racing Heart"],
            "activities": ["Working"],
            "reliefMethods": [],
            "intensity": 7,
            "duration": 12,
            "notes": "after standup"
        }))
        .unwrap();

        assert_eq!(entry.id.as_str(), "1735689600000");
        assert_eq!(entry.body_parts, vec!["Chest", "Throat"]);
        assert_eq!(entry.valid_intensity(), Some(7));
        assert_eq!(entry.breadth(), 3);
        assert!(entry.is_well_formed());
    }

    #[test]
    fn test_missing_dimensions_default_to_empty() {
        let entry: SymptomEntry = serde_json::from_value(json!({
            "id": "abc",
            "timestamp": "2025-01-01T00:00:00Z",
            "sensations": null
        }))
        .unwrap();

        assert!(entry.body_parts.is_empty());
        assert!(entry.sensations.is_empty());
        assert!(entry.relief_methods.is_empty());
        assert!(!entry.is_well_formed());
    }

    #[test]
    fn test_numeric_timestamp_is_epoch_millis() {
        let entry: SymptomEntry = serde_json::from_value(json!({
            "timestamp": 1735689600000_i64,
            "bodyParts": ["Head"],
            "sensations": ["Dizziness"]
        }))
        .unwrap();

        let expected = DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z").unwrap();
        assert_eq!(entry.recorded_at(), Some(expected.with_timezone(&Utc)));
    }

    #[test]
    fn test_overall_intensity_alias_and_range() {
        let entry: SymptomEntry = serde_json::from_value(json!({
            "timestamp": "2025-01-01T00:00:00Z",
            "overallIntensity": 11
        }))
        .unwrap();
        assert_eq!(entry.intensity, Some(11));
        assert_eq!(entry.valid_intensity(), None);
    }

    #[test]
    fn test_wrongly_typed_fields_do_not_reject_entry() {
        let entry: SymptomEntry = serde_json::from_value(json!({
            "timestamp": "2025-06-14T08:30:00Z",
            "bodyParts": ["Head", 3, null],
            "sensations": "Tightness",
            "activities": {"name": "Working"},
            "intensity": "7",
            "duration": 7.5,
            "id": true,
            "notes": 12
        }))
        .unwrap();

        assert_eq!(entry.body_parts, vec!["Head"]);
        assert!(entry.sensations.is_empty());
        assert!(entry.activities.is_empty());
        assert_eq!(entry.intensity, None);
        assert_eq!(entry.duration, None);
        assert_eq!(entry.id.as_str(), "");
        assert_eq!(entry.notes, None);
        assert!(entry.recorded_at().is_some());
    }

    #[test]
    fn test_out_of_range_duration_is_absent() {
        let entry: SymptomEntry = serde_json::from_value(json!({
            "duration": -5,
            "intensity": 4.0
        }))
        .unwrap();
        assert_eq!(entry.duration, None);
        assert_eq!(entry.intensity, None);

        let entry: SymptomEntry = serde_json::from_value(json!({"duration": 20})).unwrap();
        assert_eq!(entry.duration, Some(20));
    }

    #[test]
    fn test_parse_timestamp_variants() {
        assert!(parse_timestamp("2025-03-01T09:30:00+02:00").is_some());
        assert!(parse_timestamp("2025-03-01T09:30:00.123").is_some());
        assert!(parse_timestamp("2025-03-01 09:30:00").is_some());
        let midnight = DateTime::parse_from_rfc3339("2025-06-14T00:00:00Z").unwrap();
        assert_eq!(
            parse_timestamp("2025-06-14"),
            Some(midnight.with_timezone(&Utc))
        );
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("Invalid Date").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_dimension_labels() {
        let entry = SymptomEntry {
            relief_methods: vec!["Deep Breathing".to_string()],
            ..Default::default()
        };
        assert_eq!(entry.labels(Dimension::ReliefMethods), ["Deep Breathing"]);
        assert!(entry.labels(Dimension::Activities).is_empty());
        assert_eq!(Dimension::ReliefMethods.noun(), "relief method");
    }
}
