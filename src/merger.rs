//! File record building and the record arena.
//!
//! [`HeaderMerger`] owns one [`FileRecord`] per logical name plus the
//! [`DependencyGraph`] between them. Files are parsed one at a time, each in a
//! single pass; parsing a file never needs its dependencies to be parsed
//! first, because an include only adds an edge by name.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::config::DuplicatePolicy;
use crate::error::{Error, Result};
use crate::graph::{DependencyGraph, Scope};
use crate::include::IncludeMatcher;
use crate::policy::MergePolicy;
use crate::record::FileRecord;
use crate::window::{ContentWindow, LineAction};

/// Arena of parsed files and their dependency graph, parameterized over the
/// project policy.
#[derive(Debug)]
pub struct HeaderMerger<P> {
    policy: P,
    matcher: IncludeMatcher,
    duplicates: DuplicatePolicy,
    graph: DependencyGraph,
    records: HashMap<String, FileRecord>,
    paths: HashMap<String, PathBuf>,
}

impl<P: MergePolicy> HeaderMerger<P> {
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            matcher: IncludeMatcher::default(),
            duplicates: DuplicatePolicy::default(),
            graph: DependencyGraph::new(),
            records: HashMap::new(),
            paths: HashMap::new(),
        }
    }

    pub fn with_matcher(mut self, matcher: IncludeMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn with_duplicate_policy(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn record(&self, name: &str) -> Option<&FileRecord> {
        self.records.get(name)
    }

    /// Path a logical name was parsed from, if it came from disk.
    pub fn path_of(&self, name: &str) -> Option<&Path> {
        self.paths.get(name).map(PathBuf::as_path)
    }

    /// Number of files with a record (parsed or placeholder).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Register a file without parsing anything, e.g. an empty placeholder
    /// whose includes should simply vanish.
    pub fn add_file(&mut self, record: FileRecord) -> Result<()> {
        if !self.claim(&record.name)? {
            return Ok(());
        }
        self.graph.add_node(&record.name);
        self.records.insert(record.name.clone(), record);
        Ok(())
    }

    /// Parse a file from disk. The logical name defaults to the file name.
    pub fn parse_file(&mut self, path: &Path, name: Option<&str>) -> Result<()> {
        let name = match name {
            Some(name) => name.to_string(),
            None => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| Error::Filesystem {
                    message: format!("'{}' has no file name", path.display()),
                })?,
        };

        let file = File::open(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_reader(&name, BufReader::new(file))
            .map_err(|e| match e {
                Error::Io(source) => Error::FileRead {
                    path: path.to_path_buf(),
                    source,
                },
                other => other,
            })?;
        self.paths
            .entry(name)
            .or_insert_with(|| path.to_path_buf());
        Ok(())
    }

    /// Parse one line stream into a record named `name`.
    ///
    /// Lines after the end marker are never read. A file that never reaches a
    /// start marker is kept with empty content and logged as a warning.
    pub fn parse_reader<R: BufRead>(&mut self, name: &str, reader: R) -> Result<()> {
        if !self.claim(name)? {
            return Ok(());
        }
        self.graph.add_node(name);

        let mut record = FileRecord::new(name);
        let mut window = ContentWindow::new();

        for line in reader.lines() {
            let line = line?;
            let line = line.trim_end();
            match window.feed(line, &self.matcher, &self.policy) {
                LineAction::Include(directive) => {
                    match self.policy.classify_include(&directive) {
                        Some(external) => {
                            record.external_includes.insert(external);
                        }
                        None => self.graph.add_edge(name, &directive.name),
                    }
                }
                LineAction::Keep => record.content.push(line.to_string()),
                LineAction::Discard => {}
                LineAction::BeforeContent => {
                    self.policy.before_content(name, line, &mut record.metadata)
                }
                LineAction::Stop => break,
            }
        }

        record.started = window.started();
        if !record.started {
            warn!(
                "Got no content from {}, maybe missing start marker?",
                name
            );
        }
        debug!(
            "Parsed {}: {} content lines, {} external includes, {} dependencies",
            name,
            record.content.len(),
            record.external_includes.len(),
            self.graph.dependencies(name).len()
        );

        self.records.insert(name.to_string(), record);
        Ok(())
    }

    /// Returns false when `name` already has a record and re-parses are ignored.
    fn claim(&self, name: &str) -> Result<bool> {
        if !self.records.contains_key(name) {
            return Ok(true);
        }
        match self.duplicates {
            DuplicatePolicy::Ignore => {
                warn!("{} was already parsed, ignoring the second definition", name);
                Ok(false)
            }
            DuplicatePolicy::Error => Err(Error::DuplicateFile {
                name: name.to_string(),
            }),
        }
    }

    /// Names in `scope`, each after every file it depends on.
    pub fn sorted_deps(&self, scope: &Scope) -> Result<Vec<String>> {
        self.graph.topological_order(scope)
    }

    /// Internal includes whose target never got a record, as `(from, to)`.
    pub fn unresolved(&self) -> Vec<(String, String)> {
        self.graph
            .edges()
            .filter(|(_, to)| !self.records.contains_key(*to))
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect()
    }

    /// Union of the metadata set `key` over `names`.
    pub fn union_of_attribute<S: AsRef<str>>(&self, key: &str, names: &[S]) -> BTreeSet<String> {
        names
            .iter()
            .filter_map(|name| self.records.get(name.as_ref()))
            .filter_map(|record| record.metadata.get(key))
            .flatten()
            .cloned()
            .collect()
    }

    /// Union of the external includes of `names`.
    pub fn external_includes_of<S: AsRef<str>>(&self, names: &[S]) -> BTreeSet<String> {
        names
            .iter()
            .filter_map(|name| self.records.get(name.as_ref()))
            .flat_map(|record| record.external_includes.iter().cloned())
            .collect()
    }

    /// Concatenated content of `names`, in the given order.
    ///
    /// Files without content contribute nothing, not even origin comments.
    pub fn contents_of<S: AsRef<str>>(&self, names: &[S], origin_comment: bool) -> Vec<String> {
        let mut contents = Vec::new();
        for name in names {
            let name = name.as_ref();
            let Some(record) = self.records.get(name).filter(|r| r.has_content()) else {
                continue;
            };
            if origin_comment {
                contents.push(String::new());
                contents.push(format!("// BEGIN contents of {}", name));
            }
            contents.extend(record.content.iter().cloned());
            if origin_comment {
                contents.push(format!("// END contents of {}", name));
                contents.push(String::new());
            }
        }
        contents
    }
}
