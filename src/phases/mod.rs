//! Implementation of the phases of a merge run.
//!
//! ## Overview
//!
//! A merge run follows 5 phases:
//! 1. Discovery - Expand the configured sources into an ordered file list
//! 2. Parsing - Build one record per file and the dependency graph between them
//! 3. Ordering - Compute the dependency-first merge plan for the requested scope
//! 4. Assembly - Lay out copyrights, prefix, authors, includes and content
//! 5. Writing to Disk - Write the merged file, only once assembly succeeded
//!
//! Each phase depends only on the previous phases and the engine modules
//! (`merger`, `graph`, `assemble`). Nothing is written if any phase fails.

use std::path::PathBuf;

use crate::assemble::MergePlan;

// Phase modules
pub mod assembly;
pub mod discovery;
pub mod orchestrator;
pub mod ordering;
pub mod parsing;
pub mod write;

pub use assembly as phase4;
pub use discovery as phase1;
pub use ordering as phase3;
pub use parsing as phase2;
pub use write as phase5;

/// A file selected by discovery, with the logical name it is merged under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Location on disk
    pub path: PathBuf,
    /// Logical name used for include resolution
    pub name: String,
}

impl SourceFile {
    pub fn new(path: PathBuf, name: impl Into<String>) -> Self {
        Self {
            path,
            name: name.into(),
        }
    }
}

/// Result of a complete merge run
#[derive(Debug, Clone)]
pub struct MergeOutput {
    /// The plan the output was assembled from
    pub plan: MergePlan,
    /// The merged lines, without trailing newlines
    pub lines: Vec<String>,
    /// Files read from disk that never reached a start marker
    pub missing_marker: Vec<String>,
}
