//! # Order Command Implementation
//!
//! Prints the merge plan: every file in scope, dependencies first, split
//! into the header-like part and the rest. Read-only.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

use header_merger::assemble::MergePlan;
use header_merger::phases::orchestrator;

use super::{load_config, override_roots};

/// Output format for the merge plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OrderFormat {
    /// One file name per line
    #[default]
    Text,
    /// A JSON object with `files`, `headers` and `sources`
    Json,
}

/// Print the dependency-ordered merge plan
#[derive(Args, Debug)]
pub struct OrderArgs {
    /// Path to the .header-merger.yaml configuration file.
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "HEADER_MERGER_CONFIG",
        default_value = ".header-merger.yaml"
    )]
    pub config: PathBuf,

    /// Order only these files and their dependencies (repeatable).
    #[arg(long, value_name = "NAME")]
    pub root: Vec<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OrderFormat::Text)]
    pub format: OrderFormat,
}

/// Execute the `order` command.
pub fn execute(args: OrderArgs) -> Result<()> {
    let mut config = load_config(&args.config)?;
    override_roots(&mut config, &args.root);

    let (_, plan) = orchestrator::plan(&config).context("Failed to compute merge order")?;
    println!("{}", render(&plan, args.format)?);
    Ok(())
}

fn render(plan: &MergePlan, format: OrderFormat) -> Result<String> {
    Ok(match format {
        OrderFormat::Text => plan.files.join("\n"),
        OrderFormat::Json => serde_json::to_string_pretty(plan)?,
    })
}
