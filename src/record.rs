//! Record extraction from raw export documents.
//!
//! Each document in a note export is a Markdown file carrying a YAML
//! frontmatter block between `---` markers. [`Record::from_document`] turns
//! one raw document into a structured [`Record`], absorbing malformed
//! frontmatter and unparseable dates locally so a single bad document never
//! aborts the batch.

use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

/// Naive datetime formats attempted after RFC 3339, most specific first.
/// chrono rejects unconsumed trailing input, so a range such as
/// `2025-01-27 11:00 - 11:30` fails every format and yields no timestamp.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// A point in time parsed from a record's `date` property.
///
/// Offset-aware and naive values are kept distinct so the original offset
/// survives into ISO-8601 serialization, while [`Timestamp::naive_utc`]
/// provides a single comparison basis for sorting mixed collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timestamp {
    Naive(NaiveDateTime),
    Aware(DateTime<FixedOffset>),
}

impl Timestamp {
    /// ISO-8601 rendering, offset included for aware values.
    pub fn to_iso8601(&self) -> String {
        match self {
            Timestamp::Naive(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
            Timestamp::Aware(dt) => dt.to_rfc3339(),
        }
    }

    /// Collapse to a naive UTC value. Aware timestamps convert to UTC before
    /// dropping the offset so mixed aware/naive collections compare on one
    /// basis.
    pub fn naive_utc(&self) -> NaiveDateTime {
        match self {
            Timestamp::Naive(dt) => *dt,
            Timestamp::Aware(dt) => dt.naive_utc(),
        }
    }
}

/// Strict parse of a `date` property value.
///
/// RFC 3339 is attempted first, then the naive formats in [`NAIVE_FORMATS`],
/// then a bare date. Anything else, including time ranges, returns `None`.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(Timestamp::Aware(dt));
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(Timestamp::Naive(dt));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(Timestamp::Naive(date.and_hms_opt(0, 0, 0)?));
    }
    None
}

/// Structured representation of one export document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Stable key derived from the document's storage name, e.g.
    /// `Corey Shaya.md`. Unique across a collection; used as the graph node
    /// key.
    pub identifier: String,
    /// Frontmatter `title`, falling back to the file stem.
    pub title: String,
    /// Frontmatter `type`, or empty when absent.
    pub object_type: String,
    /// The full parsed frontmatter mapping. Empty when the frontmatter block
    /// is malformed.
    pub properties: JsonMap<String, JsonValue>,
    /// Body text, trimmed of surrounding whitespace.
    pub text_content: String,
    /// Parsed from the `date` property; `None` when missing or unparseable.
    pub timestamp: Option<Timestamp>,
}

impl Record {
    /// Parse one raw document into a [`Record`].
    ///
    /// The content must split on `---` into at least three parts (leading
    /// segment, frontmatter, body); documents without that shape are skipped
    /// entirely and `None` is returned. Frontmatter that fails to parse as a
    /// YAML mapping degrades to an empty property map rather than an error.
    pub fn from_document(name: &str, content: &str) -> Option<Record> {
        let parts: Vec<&str> = content.splitn(3, "---").collect();
        if parts.len() < 3 {
            tracing::debug!("Skipping {name}: no frontmatter/body separation");
            return None;
        }

        let identifier = file_name(name);
        if identifier.is_empty() {
            tracing::debug!("Skipping document with empty storage name");
            return None;
        }

        let properties = parse_frontmatter(name, parts[1]);
        let object_type = properties
            .get("type")
            .and_then(JsonValue::as_str)
            .unwrap_or_default()
            .to_string();
        let title = properties
            .get("title")
            .and_then(JsonValue::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| file_stem(name));
        let timestamp = properties
            .get("date")
            .and_then(JsonValue::as_str)
            .and_then(parse_timestamp);

        Some(Record {
            identifier,
            title,
            object_type,
            properties,
            text_content: parts[2].trim().to_string(),
            timestamp,
        })
    }
}

/// Parse a frontmatter block into a generic mapping, absorbing failure.
///
/// YAML is parsed into `serde_json::Value` so downstream consumers work with
/// one value model regardless of source syntax.
fn parse_frontmatter(name: &str, block: &str) -> JsonMap<String, JsonValue> {
    match serde_yaml::from_str::<JsonValue>(block) {
        Ok(JsonValue::Object(map)) => map,
        Ok(other) => {
            tracing::debug!("Frontmatter of {name} is not a mapping ({other:?}), ignoring");
            JsonMap::new()
        }
        Err(e) => {
            tracing::debug!("Frontmatter of {name} failed to parse: {e}");
            JsonMap::new()
        }
    }
}

fn file_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_stem(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_full_document() {
        let content = "---\ntype: note\ntitle: Meeting\ndate: \"2025-01-01\"\n---\nSee [Corey](Corey Shaya.md) for details.";
        let record = Record::from_document("export/Meeting.md", content).unwrap();
        assert_eq!(record.identifier, "Meeting.md");
        assert_eq!(record.title, "Meeting");
        assert_eq!(record.object_type, "note");
        assert_eq!(
            record.text_content,
            "See [Corey](Corey Shaya.md) for details."
        );
        assert_eq!(
            record.timestamp,
            Some(Timestamp::Naive(
                NaiveDate::from_ymd_opt(2025, 1, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
            ))
        );
    }

    #[test]
    fn skips_document_without_frontmatter_separation() {
        assert!(Record::from_document("Note.md", "just a body, no markers").is_none());
        assert!(Record::from_document("Note.md", "---\nonly one marker").is_none());
    }

    #[test]
    fn malformed_frontmatter_degrades_to_empty_properties() {
        let content = "---\n: : not yaml : :\n  - [\n---\nbody text";
        let record = Record::from_document("Broken.md", content).unwrap();
        assert!(record.properties.is_empty());
        assert_eq!(record.object_type, "");
        assert_eq!(record.title, "Broken");
        assert_eq!(record.text_content, "body text");
    }

    #[test]
    fn title_falls_back_to_file_stem() {
        let content = "---\ntype: person\n---\n";
        let record = Record::from_document("dir/Corey Shaya.md", content).unwrap();
        assert_eq!(record.title, "Corey Shaya");
        assert_eq!(record.identifier, "Corey Shaya.md");
    }

    #[test]
    fn date_range_yields_no_timestamp() {
        let content = "---\ntitle: Standup\ndate: \"2025-01-27 11:00 - 11:30\"\n---\nnotes";
        let record = Record::from_document("Standup.md", content).unwrap();
        assert!(record.timestamp.is_none());
        assert_eq!(record.title, "Standup");
    }

    #[test]
    fn parses_datetime_variants() {
        let aware = parse_timestamp("2025-01-01T10:00:00+02:00").unwrap();
        assert_eq!(aware.naive_utc().hour(), 8);

        let naive = parse_timestamp("2025-01-01 10:30").unwrap();
        assert_eq!(naive.naive_utc().hour(), 10);
        assert_eq!(naive.naive_utc().minute(), 30);

        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("next tuesday").is_none());
    }

    #[test]
    fn iso8601_rendering_keeps_offset() {
        let aware = parse_timestamp("2025-01-01T10:00:00+02:00").unwrap();
        assert_eq!(aware.to_iso8601(), "2025-01-01T10:00:00+02:00");
        let naive = parse_timestamp("2025-01-01").unwrap();
        assert_eq!(naive.to_iso8601(), "2025-01-01T00:00:00");
    }
}
