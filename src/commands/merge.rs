//! # Merge Command Implementation
//!
//! This module implements the `merge` subcommand, the main entry point of the
//! tool. It runs the full pipeline described by the configuration file and
//! writes the amalgamated result.
//!
//! ## Output modes
//!
//! - **File** (default): Writes to `--output`, or to the config's `output`.
//! - **Stdout** (`--stdout`): Prints the merged text and nothing else.
//! - **Dry run** (`--dry-run`): Prints the merge order without assembling.

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;

use header_merger::assemble::join_lines;
use header_merger::output::{OutputConfig, Status};
use header_merger::phases::orchestrator;

use super::{load_config, override_roots};

/// Merge the configured files into a single output file
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Path to the .header-merger.yaml configuration file.
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "HEADER_MERGER_CONFIG",
        default_value = ".header-merger.yaml"
    )]
    pub config: PathBuf,

    /// Write the merged file here instead of the configured output.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Merge only these files and their dependencies (repeatable).
    #[arg(long, value_name = "NAME")]
    pub root: Vec<String>,

    /// Print the merged text to stdout instead of writing a file.
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Show the merge order without writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Suppress status output.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `merge` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: MergeArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let mut config = load_config(&args.config)?;
    override_roots(&mut config, &args.root);

    if args.dry_run {
        let (_, plan) = orchestrator::plan(&config).context("Failed to plan merge")?;
        println!(
            "{} Dry run: {} files would be merged",
            out.marker(Status::Info),
            plan.files.len()
        );
        for name in &plan.files {
            println!("   {}", name);
        }
        return Ok(());
    }

    if args.stdout {
        let result = orchestrator::execute_merge(&config, None).context("Merge failed")?;
        print!("{}", join_lines(&result.lines));
        return Ok(());
    }

    let output = match (args.output, &config.output) {
        (Some(path), _) => path,
        (None, Some(path)) => config.resolve(path),
        (None, None) => bail!(
            "No output file: pass --output, --stdout, or set 'output' in {}",
            args.config.display()
        ),
    };

    if !args.quiet {
        println!(
            "{} Merging files from {}",
            out.marker(Status::Scan),
            args.config.display()
        );
    }

    let result = orchestrator::execute_merge(&config, Some(&output)).context("Merge failed")?;

    if !args.quiet {
        for name in &result.missing_marker {
            println!(
                "{} No content from {}, maybe missing start marker?",
                out.marker(Status::Warn),
                name
            );
        }
        println!(
            "{} Wrote {} files ({} lines) to {}",
            out.marker(Status::Write),
            result.plan.files.len(),
            result.lines.len(),
            output.display()
        );
    }

    Ok(())
}
