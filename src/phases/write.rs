//! Phase 5: Writing to Disk
//!
//! This is the final phase of the merge pipeline. It writes the assembled
//! lines to the output path, newline-joined with a trailing newline.
//!
//! It only runs after every earlier phase succeeded, so a failed run never
//! leaves a partial output file behind.

use std::fs;
use std::path::Path;

use log::info;

use crate::assemble::join_lines;
use crate::error::{Error, Result};

/// Execute Phase 5: write the merged lines to `output_path`.
///
/// Creates missing parent directories.
pub fn execute(lines: &[String], output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::Filesystem {
                message: format!("Failed to create directory '{}': {}", parent.display(), e),
            })?;
        }
    }

    fs::write(output_path, join_lines(lines)).map_err(|e| Error::Filesystem {
        message: format!("Failed to write file '{}': {}", output_path.display(), e),
    })?;

    info!("Wrote {} lines to {}", lines.len(), output_path.display());
    Ok(())
}
