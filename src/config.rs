//! # Configuration Schema and Parsing
//!
//! This module defines the `.header-merger.yaml` schema and the logic for
//! loading it. The configuration carries every project-specific policy value
//! the merge engine needs: where the files come from, which lines open and
//! close a file's content, which includes are internal, what metadata to hoist
//! and how the output is laid out.
//!
//! ## Example
//!
//! ```yaml
//! output: dist/loader.cpp
//! sources:
//!   - glob: "src/common/*.h"
//!   - dir: src/loader
//!     suffixes: [".h", ".hpp", ".cpp"]
//!   - path: external/jsoncpp/json/json.h
//!     name: json/json.h
//!     optional: true
//! placeholders: [common_config.h]
//! markers:
//!   start: ["// source-merger-content-start"]
//!   keeper_start: ["#ifdef __cplusplus"]
//! includes:
//!   angle_prefixes: ["openxr/"]
//! metadata:
//!   - key: copyrights
//!     starts_with: "// Copyright"
//!   - key: authors
//!     contains: "Author:"
//! layout:
//!   front: [xr_dependencies.h]
//!   prefix:
//!     lines: ["// Generated file - do not edit"]
//! ```
//!
//! Relative paths are resolved against the directory holding the config file.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::include::IncludeMatcher;

/// Default name of the configuration file.
pub const DEFAULT_CONFIG_FILE: &str = ".header-merger.yaml";

/// Complete merge configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MergeConfig {
    /// Destination of the merged file.
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Discovery entries, in parse order.
    #[serde(default)]
    pub sources: Vec<SourceEntry>,
    /// Logical names registered as empty files before parsing.
    #[serde(default)]
    pub placeholders: Vec<String>,
    /// Extra logical names treated as internal.
    #[serde(default)]
    pub known: Vec<String>,
    /// Suffixes that make a discovered file header-like.
    #[serde(default = "default_header_suffixes")]
    pub header_suffixes: Vec<String>,
    #[serde(default)]
    pub markers: MarkerConfig,
    #[serde(default)]
    pub includes: IncludeConfig,
    /// Metadata harvesting rules, tried in order.
    #[serde(default)]
    pub metadata: Vec<MetadataConfig>,
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// One discovery entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum SourceEntry {
    /// Every file matching a glob pattern, sorted by path.
    Glob { glob: String },
    /// Every file in a directory whose name ends with one of `suffixes`.
    Dir {
        dir: PathBuf,
        #[serde(default = "default_header_suffixes")]
        suffixes: Vec<String>,
        #[serde(default)]
        recursive: bool,
    },
    /// A single file, optionally under an explicit logical name.
    File {
        path: PathBuf,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        optional: bool,
    },
}

/// Content window markers, compared against whole lines with trailing
/// whitespace removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkerConfig {
    #[serde(default)]
    pub start: Vec<String>,
    #[serde(default)]
    pub keeper_start: Vec<String>,
    #[serde(default)]
    pub end: Vec<String>,
}

/// Include classification settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IncludeConfig {
    /// External names with these prefixes are rewritten with angle brackets.
    #[serde(default)]
    pub angle_prefixes: Vec<String>,
    /// Fail on internal includes that never resolve to a file.
    #[serde(default)]
    pub strict: bool,
    /// Custom include-directive regex.
    #[serde(default)]
    pub pattern: Option<String>,
}

/// A metadata harvesting rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetadataConfig {
    pub key: String,
    #[serde(default)]
    pub starts_with: Option<String>,
    #[serde(default)]
    pub contains: Option<String>,
}

/// How a metadata rule matches a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRule {
    StartsWith(String),
    Contains(String),
}

impl MetadataConfig {
    pub fn rule(&self) -> LineRule {
        match (&self.starts_with, &self.contains) {
            (Some(prefix), _) => LineRule::StartsWith(prefix.clone()),
            (None, Some(needle)) => LineRule::Contains(needle.clone()),
            (None, None) => LineRule::Contains(String::new()),
        }
    }
}

/// What to do when a logical name is parsed twice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep the first record and skip the re-parse.
    #[default]
    Ignore,
    /// Abort the run.
    Error,
}

/// Output layout settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    /// Files emitted ahead of every other header.
    #[serde(default)]
    pub front: Vec<String>,
    /// Wrap each file's content in BEGIN/END comments naming it.
    #[serde(default = "default_true")]
    pub origin_comments: bool,
    /// Restrict the merge to these files and their dependencies.
    #[serde(default)]
    pub roots: Vec<String>,
    #[serde(default)]
    pub prefix: Option<PrefixConfig>,
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            front: Vec::new(),
            origin_comments: true,
            roots: Vec::new(),
            prefix: None,
            duplicates: DuplicatePolicy::Ignore,
        }
    }
}

/// Source of the fixed prefix block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefixConfig {
    Lines { lines: Vec<String> },
    Template { template: TemplatePrefix },
}

/// Prefix taken from the head of an existing source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplatePrefix {
    pub path: PathBuf,
    /// Reading stops at the first line containing this text.
    #[serde(default = "default_stop_at")]
    pub stop_at: String,
    /// Lines starting with any of these are dropped.
    #[serde(default = "default_skip_starts_with")]
    pub skip_starts_with: Vec<String>,
    /// Textual replacements applied to every kept line.
    #[serde(default)]
    pub replace: BTreeMap<String, String>,
    /// The first line containing this text is replaced by `banner`.
    #[serde(default)]
    pub banner_at: Option<String>,
    #[serde(default)]
    pub banner: Vec<String>,
}

fn default_header_suffixes() -> Vec<String> {
    vec![".h".to_string(), ".hpp".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_stop_at() -> String {
    "#include".to_string()
}

fn default_skip_starts_with() -> Vec<String> {
    vec!["// Copyright".to_string()]
}

impl MergeConfig {
    /// Resolve `path` against the config's base directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Build the include matcher, honoring a custom pattern.
    pub fn include_matcher(&self) -> Result<IncludeMatcher> {
        match &self.includes.pattern {
            Some(pattern) => IncludeMatcher::new(pattern),
            None => Ok(IncludeMatcher::default()),
        }
    }

    /// Check the configuration for mistakes serde cannot catch.
    pub fn validate(&self) -> Result<()> {
        if self.markers.start.is_empty() && self.markers.keeper_start.is_empty() {
            return Err(Error::ConfigParse {
                message: "no start markers configured".to_string(),
                hint: Some(
                    "add at least one entry to 'markers.start' or 'markers.keeper_start'"
                        .to_string(),
                ),
            });
        }

        let mut seen = HashSet::new();
        for name in &self.layout.front {
            if !seen.insert(name) {
                return Err(Error::ConfigParse {
                    message: format!("front file '{}' is listed twice", name),
                    hint: None,
                });
            }
        }

        for rule in &self.metadata {
            if rule.key.is_empty() {
                return Err(Error::ConfigParse {
                    message: "metadata rule with an empty key".to_string(),
                    hint: None,
                });
            }
            if rule.starts_with.is_some() == rule.contains.is_some() {
                return Err(Error::ConfigParse {
                    message: format!(
                        "metadata rule '{}' must set exactly one of 'starts_with' or 'contains'",
                        rule.key
                    ),
                    hint: None,
                });
            }
        }

        for source in &self.sources {
            if let SourceEntry::Glob { glob } = source {
                glob::Pattern::new(glob)?;
            }
        }

        self.include_matcher()?;
        Ok(())
    }
}

/// Parse and validate a configuration from a YAML string.
pub fn parse(yaml_content: &str) -> Result<MergeConfig> {
    let config: MergeConfig = serde_yaml::from_str(yaml_content)?;
    config.validate()?;
    Ok(config)
}

/// Load a configuration file. Relative paths in it resolve against its directory.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<MergeConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config = parse(&content)?;
    config.base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    Ok(config)
}
