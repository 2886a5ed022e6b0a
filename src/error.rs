//! # Error Handling
//!
//! This module defines the centralized error type for `header-merger`. It uses
//! the `thiserror` library to build a single `Error` enum covering every
//! failure the merge pipeline can surface, each with enough context to tell
//! the user which file, marker or edge was at fault.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Parsing, ordering and assembly all return it.
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! A file that never reaches its start marker is *not* an error: it is logged
//! as a warning and kept with empty content. Everything listed here aborts the
//! requested merge, and nothing is written to disk once one of them occurs.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for header-merger operations
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file could not be parsed or failed validation.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The dependency subgraph of the requested scope contains a cycle.
    ///
    /// `scope` describes what was being ordered, `cycle` lists the files on
    /// the cycle, e.g. `a.h -> b.h -> a.h`.
    #[error("Cycle detected while ordering {scope}: {cycle}")]
    CycleDetected { scope: String, cycle: String },

    /// A file name was parsed a second time while duplicates are configured
    /// to be an error.
    #[error("File parsed twice: {name}")]
    DuplicateFile { name: String },

    /// A scope root or front file names a file the graph has never seen.
    #[error("Unknown file: {name}")]
    UnknownFile { name: String },

    /// An internal include never resolved to a parsed file or placeholder.
    #[error("Unresolved include in {from}: {to} is not part of the merged set")]
    UnresolvedInclude { from: String, to: String },

    /// A front file has internal dependencies, so it cannot be forced ahead
    /// of the files it depends on.
    #[error("Front file {name} depends on {dependency} and cannot be emitted first")]
    FrontFileDependency { name: String, dependency: String },

    /// Reading an input file failed.
    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the merged output failed.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
