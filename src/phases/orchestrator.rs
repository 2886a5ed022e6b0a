//! Orchestrator for a complete merge run
//!
//! This module coordinates all phases behind three entry points: [`parse`]
//! for the raw include graph, [`plan`] for the merge order and
//! [`execute_merge`] for producing the merged file.

use std::path::Path;

use log::info;

use super::{phase1, phase2, phase3, phase4, phase5, MergeOutput};
use crate::assemble::MergePlan;
use crate::config::MergeConfig;
use crate::error::Result;
use crate::merger::HeaderMerger;
use crate::policy::ConfiguredPolicy;

/// Run Phases 1-2: discover and parse. The graph may still contain cycles.
pub fn parse(config: &MergeConfig) -> Result<HeaderMerger<ConfiguredPolicy>> {
    // Phase 1: Discovery
    let files = phase1::execute(config)?;

    // Phase 2: Parsing
    phase2::execute(config, &files)
}

/// Run Phases 1-3: discover, parse and order, without assembling anything.
pub fn plan(config: &MergeConfig) -> Result<(HeaderMerger<ConfiguredPolicy>, MergePlan)> {
    let merger = parse(config)?;

    // Phase 3: Determining Merge Order
    let scope = phase3::scope(config);
    let plan = phase3::execute(&merger, config, &scope)?;

    Ok((merger, plan))
}

/// Execute the complete merge (Phases 1-5)
///
/// If `output_path` is `None`, returns the merged lines without writing to
/// disk. If `output_path` is `Some(path)`, writes them there as well.
pub fn execute_merge(config: &MergeConfig, output_path: Option<&Path>) -> Result<MergeOutput> {
    let (merger, plan) = plan(config)?;

    // Phase 4: Assembly
    let lines = phase4::execute(&merger, &plan, config)?;

    let missing_marker: Vec<String> = plan
        .files
        .iter()
        .filter(|name| merger.path_of(name).is_some())
        .filter(|name| merger.record(name).is_some_and(|record| !record.started))
        .cloned()
        .collect();

    // Phase 5: Write to Disk (if output path provided)
    if let Some(output) = output_path {
        phase5::execute(&lines, output)?;
    }

    info!(
        "Merged {} files ({} without a start marker) into {} lines",
        plan.files.len(),
        missing_marker.len(),
        lines.len()
    );
    Ok(MergeOutput {
        plan,
        lines,
        missing_marker,
    })
}
