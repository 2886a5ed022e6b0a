//! # CLI Command Implementations
//!
//! Each subcommand of `header-merger` lives in its own file with:
//! - An `Args` struct derived with `clap`.
//! - An `execute` function that loads the configuration and calls into the
//!   `header_merger` library.

use std::path::Path;

use anyhow::{Context, Result};

use header_merger::config::{self, MergeConfig};

pub mod completions;
pub mod merge;
pub mod order;
pub mod tree;
pub mod validate;

/// Load and validate the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<MergeConfig> {
    config::from_file(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

/// Replace the configured roots when any were given on the command line.
pub fn override_roots(config: &mut MergeConfig, roots: &[String]) {
    if !roots.is_empty() {
        config.layout.roots = roots.to_vec();
    }
}
