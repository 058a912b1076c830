//! Reading exported episode logs.
//!
//! The logging app exports its entries either as one JSON array or as JSON
//! lines (one record per line). Records are decoded one at a time: a record
//! that is not a JSON object is skipped with a warning. Field-level damage
//! (missing or mistyped arrays, bad timestamps, non-integer numbers) never
//! drops a record; the entry keeps whatever fields are usable.

use serde_json::Value;
use std::path::Path;

use crate::error::Result;
use crate::types::SymptomEntry;

/// Outcome of reading an export.
#[derive(Debug, Clone, Default)]
pub struct JournalRead {
    /// Decoded entries in file order
    pub entries: Vec<SymptomEntry>,
    /// Records that were not decodable objects
    pub skipped: usize,
}

/// Read an export file from disk.
pub fn read_entries(path: &Path) -> Result<JournalRead> {
    let content = std::fs::read_to_string(path)?;
    let read = parse_entries(&content)?;
    tracing::debug!(
        path = %path.display(),
        entries = read.entries.len(),
        skipped = read.skipped,
        "Read episode journal"
    );
    Ok(read)
}

/// Decode an export held in memory.
///
/// Content starting with `[` is one JSON array; anything else is JSON lines.
/// Only a syntactically broken array is an error.
pub fn parse_entries(content: &str) -> Result<JournalRead> {
    let trimmed = content.trim_start();
    let mut read = JournalRead::default();

    if trimmed.is_empty() {
        return Ok(read);
    }

    if trimmed.starts_with('[') {
        let records: Vec<Value> = serde_json::from_str(trimmed)?;
        for (index, record) in records.into_iter().enumerate() {
            decode_record(record, index + 1, &mut read);
        }
        return Ok(read);
    }

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(record) => decode_record(record, index + 1, &mut read),
            Err(e) => {
                tracing::warn!(line = index + 1, error = %e, "Skipping unparsable journal line");
                read.skipped += 1;
            }
        }
    }

    Ok(read)
}

fn decode_record(record: Value, position: usize, read: &mut JournalRead) {
    if !record.is_object() {
        tracing::warn!(position, "Skipping journal record that is not an object");
        read.skipped += 1;
        return;
    }

    match serde_json::from_value::<SymptomEntry>(record) {
        Ok(entry) => read.entries.push(entry),
        Err(e) => {
            tracing::warn!(position, error = %e, "Skipping undecodable journal record");
            read.skipped += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_json_array() {
        let content = r#"[
            {"id": 1, "timestamp": "2025-01-01T08:00:00Z", "bodyParts": ["Chest"], "sensations": ["Tightness"]},
            {"id": 2, "timestamp": "2025-01-02T08:00:00Z", "bodyParts": ["Head"], "sensations": []}
        ]"#;
        let read = parse_entries(content).unwrap();
        assert_eq!(read.entries.len(), 2);
        assert_eq!(read.skipped, 0);
        assert_eq!(read.entries[1].id.as_str(), "2");
    }

    #[test]
    fn test_parse_json_lines_skips_damage() {
        let content = concat!(
            "{\"id\": \"a\", \"timestamp\": \"2025-01-01T08:00:00Z\", \"bodyParts\": [\"Chest\"]}\n",
            "\n",
            "not json at all\n",
            "42\n",
            "{\"id\": \"b\", \"bodyParts\": [1, 2]}\n",
            "{\"id\": \"c\", \"timestamp\": null}\n",
        );
        let read = parse_entries(content).unwrap();
        let ids: Vec<&str> = read.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(read.skipped, 2);
        assert!(read.entries[1].body_parts.is_empty());
        assert!(read.entries[2].recorded_at().is_none());
    }

    #[test]
    fn test_mistyped_fields_keep_the_record() {
        let content = r#"[
            {"id": 1, "timestamp": "2025-06-14T08:30:00Z", "bodyParts": ["Chest"], "sensations": ["Tightness"], "duration": 7.5},
            {"id": 2, "timestamp": "2025-06-14T09:30:00Z", "bodyParts": ["Head", 3], "sensations": ["Tension"]},
            {"id": 3, "timestamp": "2025-06-14T10:30:00Z", "bodyParts": ["Chest"], "sensations": ["Nausea"], "intensity": "7"}
        ]"#;
        let read = parse_entries(content).unwrap();
        assert_eq!(read.skipped, 0);
        assert_eq!(read.entries.len(), 3);

        assert_eq!(read.entries[0].duration, None);
        assert!(read.entries[0].is_well_formed());
        assert_eq!(read.entries[1].body_parts, vec!["Head"]);
        assert_eq!(read.entries[2].intensity, None);
        assert_eq!(read.entries[2].valid_intensity(), None);
    }

    #[test]
    fn test_broken_array_is_an_error() {
        assert!(parse_entries("[{\"id\": 1},").is_err());
    }

    #[test]
    fn test_empty_content() {
        let read = parse_entries("   \n").unwrap();
        assert!(read.entries.is_empty());
    }

    #[test]
    fn test_read_entries_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("entries.json");
        std::fs::write(&path, r#"[{"id": 7, "bodyParts": ["Stomach"]}]"#).unwrap();

        let read = read_entries(&path).unwrap();
        assert_eq!(read.entries[0].body_parts, vec!["Stomach"]);

        assert!(read_entries(&dir.path().join("missing.json")).is_err());
    }
}
