//! # Header Merger Library
//!
//! This library amalgamates a set of C/C++ sources and headers that include
//! each other into a single, dependency-ordered file, the kind of
//! "single-file" artifact produced at release time. It is used by the
//! `header-merger` command-line tool but can be embedded by any build script
//! that supplies its own [`policy::MergePolicy`].
//!
//! ## Quick Example
//!
//! ```
//! use std::io::Cursor;
//! use header_merger::assemble::{assemble, MergeLayout, MergePlan};
//! use header_merger::graph::Scope;
//! use header_merger::merger::HeaderMerger;
//! use header_merger::policy::ConfiguredPolicy;
//!
//! let policy = ConfiguredPolicy::new().with_start_markers(["// merge-start".to_string()]);
//! let mut merger = HeaderMerger::new(policy);
//!
//! merger
//!     .parse_reader("util.h", Cursor::new("#include <stdio.h>\n// merge-start\nvoid util(void);\n"))
//!     .unwrap();
//! merger
//!     .parse_reader("main.c", Cursor::new("#include \"util.h\"\n// merge-start\nint main(void);\n"))
//!     .unwrap();
//!
//! let plan = MergePlan::build(&merger, &Scope::All, |name| name.ends_with(".h")).unwrap();
//! assert_eq!(plan.files, vec!["util.h", "main.c"]);
//!
//! let lines = assemble(&merger, &plan, &MergeLayout::default()).unwrap();
//! assert_eq!(lines, vec!["#include <stdio.h>", "void util(void);", "int main(void);"]);
//! ```
//!
//! ## Core Concepts
//!
//! - **Include classification (`include`, `policy`)**: Recognizes include
//!   directives and decides whether each one names another file of the merged
//!   set (internal, becomes a dependency) or something else (external, kept
//!   as a literal include line).
//! - **Content window (`window`)**: Per file, separates the content to inline
//!   from the boilerplate in front of it, using configurable start, keeper
//!   and end markers.
//! - **Records and graph (`record`, `merger`, `graph`)**: One record per
//!   logical file name, and a "depends on" graph between them that can be
//!   ordered whole or from a set of roots.
//! - **Assembly (`assemble`)**: Lays out harvested metadata, includes and
//!   content in dependency-first order.
//! - **Phases (`phases`)**: The configuration-driven pipeline the CLI runs.
//!
//! ## Execution Flow
//!
//! 1.  **Discovery**: Expand the configured sources into a file list.
//! 2.  **Parsing**: Build records and graph edges, one file at a time.
//! 3.  **Ordering**: Compute the merge plan for the requested scope.
//! 4.  **Assembly**: Produce the merged lines.
//! 5.  **Disk Output**: Write the merged file.

pub mod assemble;
pub mod config;
pub mod error;
pub mod graph;
pub mod include;
pub mod merger;
pub mod output;
pub mod phases;
pub mod policy;
pub mod record;
pub mod window;

#[cfg(test)]
mod graph_proptest;
