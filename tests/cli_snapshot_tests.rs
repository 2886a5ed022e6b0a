//! Snapshot tests for CLI output using insta.
//!
//! These tests capture merged output as snapshots, making it easy to review
//! changes to the layout of amalgamated files.
//!
//! To update snapshots after intentional changes:
//! ```bash
//! cargo insta test --accept
//! ```

mod common;
use common::prelude::*;

/// Strip trailing whitespace from each line for stable snapshots
fn normalize_output(output: &str) -> String {
    output
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_sample_merge_snapshot() {
    let fixture = TestFixture::new().with_sample_project();
    let output = cargo_bin_cmd!("header-merger")
        .arg("merge")
        .arg("--config")
        .arg(fixture.config_path())
        .arg("--stdout")
        .output()
        .expect("Failed to execute command");

    let merged = normalize_output(&String::from_utf8_lossy(&output.stdout));
    insta::assert_snapshot!("sample_merge", merged);
}

#[test]
fn test_sample_order_snapshot() {
    let fixture = TestFixture::new().with_sample_project();
    let output = cargo_bin_cmd!("header-merger")
        .arg("order")
        .arg("--config")
        .arg(fixture.config_path())
        .args(["--format", "json"])
        .output()
        .expect("Failed to execute command");

    let order = normalize_output(&String::from_utf8_lossy(&output.stdout));
    insta::assert_snapshot!("sample_order_json", order);
}
