//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks a
//! `.header-merger.yaml` configuration and the files it selects without
//! writing anything.
//!
//! ## Functionality
//!
//! - **Configuration Validation**: Parses the configuration file and checks
//!   markers, metadata rules, glob and include patterns.
//! - **Source Checks**: Parses every selected file, reporting files that never
//!   reach a start marker and internal includes that resolve to nothing.
//! - **Cycle Detection**: Orders the requested scope, reporting include cycles.
//! - **Layout Checks**: Assembles the output in memory, catching front-file
//!   and prefix template problems.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use header_merger::config;
use header_merger::output::{OutputConfig, Status};
use header_merger::phases::{orchestrator, phase3, phase4};

/// Validate a .header-merger.yaml configuration file
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the .header-merger.yaml configuration file to validate.
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "HEADER_MERGER_CONFIG",
        default_value = ".header-merger.yaml"
    )]
    pub config: PathBuf,

    /// Use strict validation (fail on warnings).
    #[arg(long)]
    pub strict: bool,
}

/// Execute the `validate` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let config_path = &args.config;
    println!(
        "{} Validating configuration: {}",
        out.marker(Status::Scan),
        config_path.display()
    );

    let config = match config::from_file(config_path) {
        Ok(config) => {
            println!(
                "{} Configuration file parsed successfully",
                out.marker(Status::Ok)
            );
            config
        }
        Err(e) => {
            println!(
                "{} Configuration parsing failed: {}",
                out.marker(Status::Err),
                e
            );
            return Err(anyhow::anyhow!("Configuration parsing failed: {}", e));
        }
    };

    let mut has_warnings = false;
    let mut has_errors = false;

    println!("\n{} Configuration Summary:", out.marker(Status::Info));
    println!("   Source entries: {}", config.sources.len());
    println!("   Placeholders: {}", config.placeholders.len());
    println!("   Front files: {}", config.layout.front.len());
    if !config.layout.roots.is_empty() {
        println!("   Roots: {}", config.layout.roots.join(", "));
    }

    println!("\n{} Parsing sources...", out.marker(Status::Scan));
    let merger = match orchestrator::parse(&config) {
        Ok(merger) => merger,
        Err(e) => {
            println!("{} Parsing failed: {}", out.marker(Status::Err), e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    };
    println!("   Parsed {} files", merger.len());

    for name in merger.graph().nodes() {
        // Placeholders and unresolved names were never read from disk.
        if merger.path_of(name).is_none() {
            continue;
        }
        if merger.record(name).is_some_and(|r| !r.started) {
            println!(
                "{} No content from {}, maybe missing start marker?",
                out.marker(Status::Warn),
                name
            );
            has_warnings = true;
        }
    }
    for (from, to) in merger.unresolved() {
        println!(
            "{} {} includes {}, which is not part of the merged set",
            out.marker(Status::Warn),
            from,
            to
        );
        has_warnings = true;
    }

    println!("\n{} Checking include order...", out.marker(Status::Scan));
    let scope = phase3::scope(&config);
    match phase3::execute(&merger, &config, &scope) {
        Ok(plan) => {
            println!(
                "{} No include cycles detected ({} files in scope)",
                out.marker(Status::Ok),
                plan.files.len()
            );
            match phase4::execute(&merger, &plan, &config) {
                Ok(lines) => println!(
                    "{} Layout is valid ({} merged lines)",
                    out.marker(Status::Ok),
                    lines.len()
                ),
                Err(e) => {
                    println!("{} Layout check failed: {}", out.marker(Status::Err), e);
                    has_errors = true;
                }
            }
        }
        Err(e) => {
            println!("{} {}", out.marker(Status::Err), e);
            has_errors = true;
        }
    }

    println!("\n{} Validation Result:", out.marker(Status::Info));

    if has_errors {
        println!(
            "{} Configuration has errors that must be fixed",
            out.marker(Status::Err)
        );
        return Err(anyhow::anyhow!("Configuration validation failed"));
    }

    if has_warnings && args.strict {
        println!(
            "{} Configuration has warnings (strict mode enabled)",
            out.marker(Status::Err)
        );
        return Err(anyhow::anyhow!(
            "Configuration validation failed in strict mode"
        ));
    }

    if has_warnings {
        println!(
            "{} Configuration is valid but has warnings",
            out.marker(Status::Warn)
        );
    } else {
        println!("{} Configuration is valid", out.marker(Status::Ok));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CONFIG: &str = "sources:\n  - glob: \"*.h\"\nmarkers:\n  start: [\"// start\"]\n";

    fn project(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".header-merger.yaml"), CONFIG).unwrap();
        for (name, text) in files {
            fs::write(temp.path().join(name), text).unwrap();
        }
        temp
    }

    fn args(temp: &TempDir, strict: bool) -> ValidateArgs {
        ValidateArgs {
            config: temp.path().join(".header-merger.yaml"),
            strict,
        }
    }

    #[test]
    fn test_execute_missing_config() {
        let args = ValidateArgs {
            config: PathBuf::from("/nonexistent/config.yaml"),
            strict: false,
        };
        assert!(execute(args, "never").is_err());
    }

    #[test]
    fn test_valid_project() {
        let temp = project(&[
            ("a.h", "// start\nint a;\n"),
            ("b.h", "#include \"a.h\"\n// start\nint b;\n"),
        ]);
        assert!(execute(args(&temp, true), "never").is_ok());
    }

    #[test]
    fn test_cycle_is_an_error() {
        let temp = project(&[
            ("a.h", "#include \"b.h\"\n// start\nint a;\n"),
            ("b.h", "#include \"a.h\"\n// start\nint b;\n"),
        ]);
        assert!(execute(args(&temp, false), "never").is_err());
    }

    #[test]
    fn test_missing_marker_fails_only_in_strict_mode() {
        let temp = project(&[("a.h", "int a;\n")]);
        assert!(execute(args(&temp, false), "never").is_ok());
        assert!(execute(args(&temp, true), "never")
            .unwrap_err()
            .to_string()
            .contains("strict mode"));
    }
}
