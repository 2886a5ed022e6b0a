//! Phase 3: Determining Merge Order
//!
//! This phase computes the [`MergePlan`]: the files in scope, each after every
//! file it depends on, split into header-like files and the rest.
//!
//! ## Process
//!
//! 1.  **Scope**: With no `layout.roots` the whole graph is ordered; otherwise
//!     only the roots and their transitive dependencies.
//!
//! 2.  **Depth-First Traversal**: Dependencies are visited before the files
//!     that include them (post-order), in discovery order, so the result is
//!     reproducible. A cycle inside the scope aborts the run.
//!
//! 3.  **Header Partition**: Files whose name ends with a configured header
//!     suffix, plus everything they depend on, are header-like.

use crate::assemble::MergePlan;
use crate::config::MergeConfig;
use crate::error::Result;
use crate::graph::Scope;
use crate::merger::HeaderMerger;
use crate::policy::MergePolicy;

/// The scope requested by the configuration.
pub fn scope(config: &MergeConfig) -> Scope {
    if config.layout.roots.is_empty() {
        Scope::All
    } else {
        Scope::Roots(config.layout.roots.clone())
    }
}

/// Whether `name` is header-like by suffix.
pub fn is_header(config: &MergeConfig, name: &str) -> bool {
    config
        .header_suffixes
        .iter()
        .any(|suffix| name.ends_with(suffix.as_str()))
}

/// Execute Phase 3: compute the merge plan for `scope`.
pub fn execute<P: MergePolicy>(
    merger: &HeaderMerger<P>,
    config: &MergeConfig,
    scope: &Scope,
) -> Result<MergePlan> {
    MergePlan::build(merger, scope, |name| is_header(config, name))
}
