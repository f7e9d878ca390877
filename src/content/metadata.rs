//! Metadata block parsing
//!
//! A metadata block is only recognized when the very first line of a file is
//! `---metadata---`. Every following line up to `---end---` (or end of file) is
//! a candidate `key: value` pair.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub(crate) const METADATA_START: &str = "---metadata---";
pub(crate) const METADATA_END: &str = "---end---";

static METADATA_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z0-9_]+):\s*(.+)$").expect("metadata line pattern"));

/// A metadata value: numeric when the raw text parses as a number, else text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl MetadataValue {
    /// Coerce raw text to a number where possible.
    pub fn coerce(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return MetadataValue::Integer(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            if f.is_finite() {
                return MetadataValue::Float(f);
            }
        }
        MetadataValue::Text(raw.to_string())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view of the value; floats qualify only when they have no fractional part.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MetadataValue::Integer(i) => Some(*i),
            MetadataValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Integer(i) => write!(f, "{}", i),
            MetadataValue::Float(x) => write!(f, "{}", x),
            MetadataValue::Text(s) => f.write_str(s),
        }
    }
}

/// Parsed key/value pairs. Recognized keys: `title`, `image`, `tileX`, `tileY`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, MetadataValue>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: MetadataValue) {
        self.0.insert(key.into(), value);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetadataValue)> {
        self.0.iter()
    }

    /// Title as display text; a numeric title is rendered as written.
    pub fn title(&self) -> Option<String> {
        self.0.get("title").map(|v| v.to_string())
    }

    pub fn image(&self) -> Option<String> {
        self.0.get("image").map(|v| v.to_string())
    }

    pub fn tile_x(&self) -> Option<&MetadataValue> {
        self.0.get("tileX")
    }

    pub fn tile_y(&self) -> Option<&MetadataValue> {
        self.0.get("tileY")
    }
}

/// Parse one metadata line. A whitespace-only value is kept verbatim as text.
pub(crate) fn parse_metadata_line(line: &str) -> Option<(String, MetadataValue)> {
    let caps = METADATA_LINE.captures(line)?;
    let key = caps.get(1)?.as_str();
    let value = caps.get(2)?.as_str();
    Some((key.to_string(), MetadataValue::coerce(value)))
}

/// Split the leading metadata block off a file.
///
/// Returns the parsed metadata and the index of the first body line. When the
/// file does not open with `---metadata---` the body starts at line 0.
pub(crate) fn split_metadata_block(lines: &[&str]) -> (Metadata, usize) {
    let mut metadata = Metadata::new();
    match lines.first() {
        Some(first) if first.trim() == METADATA_START => {}
        _ => return (metadata, 0),
    }

    for (i, line) in lines.iter().enumerate().skip(1) {
        if line.trim() == METADATA_END {
            return (metadata, i + 1);
        }
        if let Some((key, value)) = parse_metadata_line(line) {
            metadata.insert(key, value);
        }
    }
    (metadata, lines.len())
}

/// Parse only the metadata block of a file's raw text.
pub fn parse_metadata_block(raw: &str) -> Metadata {
    let lines: Vec<&str> = raw.lines().collect();
    split_metadata_block(&lines).0
}
