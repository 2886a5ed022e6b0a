//! Phase 1: Discovery
//!
//! This is the first phase of the merge pipeline. It expands the `sources`
//! entries of the configuration into an ordered list of files to parse.
//!
//! ## Process
//!
//! 1.  **Glob entries** are expanded with the `glob` crate; matches come back
//!     sorted, directories are skipped.
//!
//! 2.  **Directory entries** are walked with `walkdir`, sorted by file name,
//!     keeping files whose name ends with one of the entry's suffixes.
//!
//! 3.  **File entries** are taken as-is, under an optional explicit logical
//!     name. Missing optional files are skipped; missing required files abort.
//!
//! Entries are processed in configuration order, and that order is the parse
//! order. A name discovered twice is kept twice here; the parsing phase
//! applies the duplicate policy.

use std::path::Path;

use log::debug;
use walkdir::WalkDir;

use super::SourceFile;
use crate::config::{MergeConfig, SourceEntry};
use crate::error::{Error, Result};

/// Execute Phase 1: list every file to parse, in order.
pub fn execute(config: &MergeConfig) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    for entry in &config.sources {
        match entry {
            SourceEntry::Glob { glob } => expand_glob(config, glob, &mut files)?,
            SourceEntry::Dir {
                dir,
                suffixes,
                recursive,
            } => walk_dir(&config.resolve(dir), suffixes, *recursive, &mut files)?,
            SourceEntry::File {
                path,
                name,
                optional,
            } => {
                let path = config.resolve(path);
                if !path.is_file() {
                    if *optional {
                        debug!("Optional source {} not found, skipping", path.display());
                        continue;
                    }
                    return Err(Error::FileRead {
                        path,
                        source: std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            "source file not found",
                        ),
                    });
                }
                let name = match name {
                    Some(name) => name.clone(),
                    None => file_name(&path)?,
                };
                files.push(SourceFile::new(path, name));
            }
        }
    }
    debug!("Discovered {} source files", files.len());
    Ok(files)
}

fn expand_glob(config: &MergeConfig, pattern: &str, files: &mut Vec<SourceFile>) -> Result<()> {
    let full = config.resolve(Path::new(pattern));
    let full = full.to_string_lossy();
    for entry in glob::glob(&full)? {
        let path = entry.map_err(|e| Error::Io(e.into_error()))?;
        if path.is_file() {
            let name = file_name(&path)?;
            files.push(SourceFile::new(path, name));
        }
    }
    Ok(())
}

fn walk_dir(
    dir: &Path,
    suffixes: &[String],
    recursive: bool,
    files: &mut Vec<SourceFile>,
) -> Result<()> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if suffixes.iter().any(|suffix| name.ends_with(suffix.as_str())) {
            let name = name.into_owned();
            files.push(SourceFile::new(entry.into_path(), name));
        }
    }
    Ok(())
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| Error::Filesystem {
            message: format!("'{}' has no file name", path.display()),
        })
}
