//! # Header Merger CLI
//!
//! This is the binary entry point for the `header-merger` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging.
//! - Executing the appropriate command and turning library errors into
//!   user-facing messages.
//!
//! The merge engine itself lives in the library crate; the binary is a thin
//! wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
