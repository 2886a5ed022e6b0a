//! Merge plan computation and output assembly.
//!
//! The output is laid out as:
//!
//! 1. harvested copyright lines, sorted
//! 2. the fixed prefix block
//! 3. harvested author lines, sorted
//! 4. front files: their external includes, then their content
//! 5. external includes of the remaining header-like files
//! 6. content of the remaining header-like files, in plan order
//! 7. steps 5 and 6 again for everything that is not header-like
//!
//! Every set-valued block is deduplicated and sorted so unchanged input
//! produces byte-identical output.

use std::collections::{BTreeSet, HashSet};

use log::debug;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::Scope;
use crate::merger::HeaderMerger;
use crate::policy::MergePolicy;
use crate::record::{AUTHORS, COPYRIGHTS};

/// Dependency-ordered file names selected for one output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergePlan {
    /// Every file in scope, dependencies first.
    pub files: Vec<String>,
    /// Header-like files and everything they depend on, in plan order.
    pub headers: Vec<String>,
    /// The remaining files, in plan order.
    pub sources: Vec<String>,
}

impl MergePlan {
    /// Compute the plan for `scope`. A file is header-like if `is_header`
    /// accepts it or a header-like file depends on it.
    pub fn build<P, F>(merger: &HeaderMerger<P>, scope: &Scope, is_header: F) -> Result<Self>
    where
        P: MergePolicy,
        F: Fn(&str) -> bool,
    {
        let files = merger.sorted_deps(scope)?;

        let header_roots: Vec<String> = files
            .iter()
            .filter(|n| is_header(n.as_str()))
            .cloned()
            .collect();
        let header_set: HashSet<String> = if header_roots.is_empty() {
            HashSet::new()
        } else {
            merger
                .sorted_deps(&Scope::Roots(header_roots))?
                .into_iter()
                .collect()
        };

        let (headers, sources): (Vec<String>, Vec<String>) = files
            .iter()
            .cloned()
            .partition(|name| header_set.contains(name));

        debug!("Merge plan: {}", files.join(", "));
        Ok(Self {
            files,
            headers,
            sources,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Policy values that shape the output around the merged content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeLayout {
    /// Fixed block emitted between copyrights and authors.
    pub prefix: Vec<String>,
    /// Files emitted before all other headers.
    pub front: Vec<String>,
    /// Wrap each file in BEGIN/END comments.
    pub origin_comments: bool,
}

/// Produce the merged line sequence for `plan`.
///
/// Front files must not depend on any file with content that would be
/// emitted after them; otherwise [`Error::FrontFileDependency`] is returned.
pub fn assemble<P: MergePolicy>(
    merger: &HeaderMerger<P>,
    plan: &MergePlan,
    layout: &MergeLayout,
) -> Result<Vec<String>> {
    let front = front_files(merger, plan, &layout.front)?;

    let mut lines: Vec<String> = merger
        .union_of_attribute(COPYRIGHTS, &plan.files)
        .into_iter()
        .collect();
    lines.extend(layout.prefix.iter().cloned());
    lines.extend(merger.union_of_attribute(AUTHORS, &plan.files));

    let mut emitted_includes: BTreeSet<String> = merger.external_includes_of(&front);
    lines.extend(emitted_includes.iter().cloned());
    lines.extend(merger.contents_of(&front, false));

    let emitted: HashSet<&str> = front.iter().map(String::as_str).collect();
    for group in [&plan.headers, &plan.sources] {
        let remaining: Vec<&str> = group
            .iter()
            .map(String::as_str)
            .filter(|name| !emitted.contains(name))
            .collect();
        for include in merger.external_includes_of(&remaining) {
            if emitted_includes.insert(include.clone()) {
                lines.push(include);
            }
        }
        lines.extend(merger.contents_of(&remaining, layout.origin_comments));
    }

    Ok(lines)
}

/// Front files present in the plan, checked against their dependencies.
fn front_files<P: MergePolicy>(
    merger: &HeaderMerger<P>,
    plan: &MergePlan,
    front: &[String],
) -> Result<Vec<String>> {
    let in_plan: HashSet<&str> = plan.files.iter().map(String::as_str).collect();
    let mut selected: Vec<String> = Vec::new();

    for name in front {
        if !merger.graph().contains(name) {
            return Err(Error::UnknownFile { name: name.clone() });
        }
        if !in_plan.contains(name.as_str()) {
            debug!("Front file {} is outside the merge scope, skipping", name);
            continue;
        }
        // Transitive, so an empty file in between cannot hide a dependency.
        for dependency in merger.sorted_deps(&Scope::root(name.as_str()))? {
            if dependency == *name {
                continue;
            }
            let has_content = merger
                .record(&dependency)
                .is_some_and(|record| record.has_content());
            if has_content && !selected.contains(&dependency) {
                return Err(Error::FrontFileDependency {
                    name: name.clone(),
                    dependency,
                });
            }
        }
        selected.push(name.clone());
    }

    Ok(selected)
}

/// Join lines with newlines and a trailing newline.
pub fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    out
}
