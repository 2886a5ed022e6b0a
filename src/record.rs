//! Per-file parse results.

use std::collections::{BTreeMap, BTreeSet};

/// Metadata key for harvested copyright lines.
pub const COPYRIGHTS: &str = "copyrights";
/// Metadata key for harvested author lines.
pub const AUTHORS: &str = "authors";

/// Attribute sets harvested from the lines that precede a file's content.
///
/// Keys and values are kept in sorted sets so unions across files are
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    attributes: BTreeMap<String, BTreeSet<String>>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` to the set stored under `key`.
    pub fn add(&mut self, key: &str, value: impl Into<String>) {
        self.attributes
            .entry(key.to_string())
            .or_default()
            .insert(value.into());
    }

    /// The set stored under `key`, if any value was ever added.
    pub fn get(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.attributes.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }
}

/// One parsed (or placeholder) file.
#[derive(Debug, Clone, Default)]
pub struct FileRecord {
    /// Logical name, e.g. `json/json.h`.
    pub name: String,
    /// Lines kept for output, in source order.
    pub content: Vec<String>,
    /// Normalized include lines for files outside the merged set.
    pub external_includes: BTreeSet<String>,
    pub metadata: Metadata,
    /// Whether a start or keeper marker was seen. Placeholders never start.
    pub started: bool,
}

impl FileRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_dedups_values() {
        let mut metadata = Metadata::new();
        metadata.add(COPYRIGHTS, "// Copyright 2019 A");
        metadata.add(COPYRIGHTS, "// Copyright 2019 A");
        metadata.add(AUTHORS, "// Author: B");

        assert_eq!(metadata.get(COPYRIGHTS).unwrap().len(), 1);
        assert_eq!(metadata.keys().collect::<Vec<_>>(), vec![AUTHORS, COPYRIGHTS]);
        assert!(metadata.get("missing").is_none());
    }

    #[test]
    fn test_new_record_is_empty() {
        let record = FileRecord::new("a.h");
        assert_eq!(record.name, "a.h");
        assert!(!record.has_content());
        assert!(record.external_includes.is_empty());
        assert!(record.metadata.is_empty());
    }
}
