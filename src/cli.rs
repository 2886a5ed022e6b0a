//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Header Merger - Amalgamate sources and headers into a single file
#[derive(Parser, Debug)]
#[command(name = "header-merger")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge the configured files into a single output file
    Merge(commands::merge::MergeArgs),

    /// Print the dependency-ordered merge plan
    Order(commands::order::OrderArgs),

    /// Show the internal include tree
    Tree(commands::tree::TreeArgs),

    /// Validate the configuration and the files it selects
    Validate(commands::validate::ValidateArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::Merge(args) => commands::merge::execute(args, &self.color),
            Commands::Order(args) => commands::order::execute(args),
            Commands::Tree(args) => commands::tree::execute(args),
            Commands::Validate(args) => commands::validate::execute(args, &self.color),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when running under tests.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
