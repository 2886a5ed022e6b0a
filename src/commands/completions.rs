//! Shell completion scripts, generated with `clap_complete`.
//!
//! ```bash
//! header-merger completions bash > ~/.local/share/bash-completion/completions/header-merger
//! header-merger completions fish > ~/.config/fish/completions/header-merger.fish
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io::{self, Write};

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the `completions` command, writing the script to stdout.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    write_completions(args.shell, &mut io::stdout())
}

fn write_completions<W: Write>(shell: Shell, buf: &mut W) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, buf);
    Ok(())
}
