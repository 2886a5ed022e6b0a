//! Policy hooks that specialize the merge engine for one project.
//!
//! The engine never hardcodes marker strings or file lists. Everything
//! project-specific goes through a [`MergePolicy`]: which lines open and close
//! a file's content window, which includes stay external, and what metadata is
//! harvested from the lines in front of the content.
//!
//! [`ConfiguredPolicy`] implements the trait from the values of a
//! `.header-merger.yaml` file.

use std::collections::HashSet;

use crate::config::{LineRule, MergeConfig};
use crate::include::{render, IncludeDirective, Quoting};
use crate::record::Metadata;

/// Capability set the merge engine is parameterized over.
pub trait MergePolicy {
    /// Lines *after* this one are content. The marker itself is dropped.
    fn is_start_marker(&self, line: &str) -> bool;

    /// This line *and* the lines after it are content.
    fn is_keeper_start_marker(&self, _line: &str) -> bool {
        false
    }

    /// Stop reading the current file.
    fn is_end_marker(&self, line: &str) -> bool;

    /// Return the normalized include text for an external include, or `None`
    /// when the directive names an internal file that becomes a dependency.
    fn classify_include(&self, directive: &IncludeDirective) -> Option<String> {
        default_classify(directive)
    }

    /// Called for every non-include line seen before the content window opens.
    fn before_content(&self, _name: &str, _line: &str, _metadata: &mut Metadata) {}
}

/// Angle brackets are external, quotes are internal.
pub fn default_classify(directive: &IncludeDirective) -> Option<String> {
    if directive.is_angle() {
        Some(directive.normalized())
    } else {
        None
    }
}

/// A rule that files matching lines under a metadata key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRule {
    pub key: String,
    pub rule: LineRule,
}

impl MetadataRule {
    pub fn matches(&self, line: &str) -> bool {
        match &self.rule {
            LineRule::StartsWith(prefix) => line.starts_with(prefix.as_str()),
            LineRule::Contains(needle) => line.contains(needle.as_str()),
        }
    }
}

/// Policy driven by configuration values.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredPolicy {
    start_markers: HashSet<String>,
    keeper_start_markers: HashSet<String>,
    end_markers: HashSet<String>,
    known_names: HashSet<String>,
    angle_prefixes: Vec<String>,
    metadata_rules: Vec<MetadataRule>,
}

impl ConfiguredPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a policy from the marker, include and metadata sections of a config.
    ///
    /// Known names only come from `known` and `placeholders` here; discovered
    /// files are added later with [`ConfiguredPolicy::with_known_names`].
    pub fn from_config(config: &MergeConfig) -> Self {
        Self::new()
            .with_start_markers(config.markers.start.iter().cloned())
            .with_keeper_start_markers(config.markers.keeper_start.iter().cloned())
            .with_end_markers(config.markers.end.iter().cloned())
            .with_known_names(config.known.iter().cloned())
            .with_known_names(config.placeholders.iter().cloned())
            .with_angle_prefixes(config.includes.angle_prefixes.iter().cloned())
            .with_metadata_rules(config.metadata.iter().map(|m| MetadataRule {
                key: m.key.clone(),
                rule: m.rule(),
            }))
    }

    pub fn with_start_markers(mut self, markers: impl IntoIterator<Item = String>) -> Self {
        self.start_markers.extend(markers);
        self
    }

    pub fn with_keeper_start_markers(mut self, markers: impl IntoIterator<Item = String>) -> Self {
        self.keeper_start_markers.extend(markers);
        self
    }

    pub fn with_end_markers(mut self, markers: impl IntoIterator<Item = String>) -> Self {
        self.end_markers.extend(markers);
        self
    }

    pub fn with_known_names(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.known_names.extend(names);
        self
    }

    pub fn with_angle_prefixes(mut self, prefixes: impl IntoIterator<Item = String>) -> Self {
        self.angle_prefixes.extend(prefixes);
        self
    }

    pub fn with_metadata_rules(mut self, rules: impl IntoIterator<Item = MetadataRule>) -> Self {
        self.metadata_rules.extend(rules);
        self
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.known_names.contains(name)
    }
}

impl MergePolicy for ConfiguredPolicy {
    fn is_start_marker(&self, line: &str) -> bool {
        self.start_markers.contains(line)
    }

    fn is_keeper_start_marker(&self, line: &str) -> bool {
        self.keeper_start_markers.contains(line)
    }

    fn is_end_marker(&self, line: &str) -> bool {
        self.end_markers.contains(line)
    }

    /// With no known names the default quoting rule applies. Otherwise
    /// membership in the known set alone decides, whatever the quoting.
    fn classify_include(&self, directive: &IncludeDirective) -> Option<String> {
        let internal = if self.known_names.is_empty() {
            !directive.is_angle()
        } else {
            self.is_known(&directive.name)
        };
        if internal {
            return None;
        }

        let quoting = if self
            .angle_prefixes
            .iter()
            .any(|prefix| directive.name.starts_with(prefix.as_str()))
        {
            Quoting::Angle
        } else {
            directive.quoting
        };
        Some(render(&directive.name, quoting))
    }

    fn before_content(&self, _name: &str, line: &str, metadata: &mut Metadata) {
        if let Some(rule) = self.metadata_rules.iter().find(|rule| rule.matches(line)) {
            metadata.add(&rule.key, line);
        }
    }
}
