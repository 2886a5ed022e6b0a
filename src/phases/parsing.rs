//! Phase 2: Parsing
//!
//! This phase turns the discovered files into a [`HeaderMerger`]: one record
//! per logical name, plus the dependency graph built from internal includes.
//!
//! ## Process
//!
//! 1.  **Policy**: A [`ConfiguredPolicy`] is built from the configuration. Every
//!     discovered name, placeholder and `known` entry is an internal name.
//!
//! 2.  **Placeholders**: Placeholder names are registered as empty records
//!     before any file is parsed, so includes of them resolve to nothing.
//!
//! 3.  **Parsing**: Files are parsed in discovery order, each opened, read in
//!     one pass and closed before the next.
//!
//! 4.  **Resolution check**: Internal includes that never got a record are
//!     either warned about (default) or rejected (`includes.strict`).

use log::{info, warn};

use super::SourceFile;
use crate::config::MergeConfig;
use crate::error::{Error, Result};
use crate::merger::HeaderMerger;
use crate::policy::ConfiguredPolicy;
use crate::record::FileRecord;

/// Execute Phase 2: parse every file into records and graph edges.
pub fn execute(
    config: &MergeConfig,
    files: &[SourceFile],
) -> Result<HeaderMerger<ConfiguredPolicy>> {
    let policy = ConfiguredPolicy::from_config(config)
        .with_known_names(files.iter().map(|f| f.name.clone()));
    let mut merger = HeaderMerger::new(policy)
        .with_matcher(config.include_matcher()?)
        .with_duplicate_policy(config.layout.duplicates);

    for name in &config.placeholders {
        merger.add_file(FileRecord::new(name.as_str()))?;
    }

    for file in files {
        merger.parse_file(&file.path, Some(file.name.as_str()))?;
    }
    info!("Parsed {} files", files.len());

    for (from, to) in merger.unresolved() {
        if config.includes.strict {
            return Err(Error::UnresolvedInclude { from, to });
        }
        warn!(
            "{} includes {}, which is not part of the merged set; treating it as empty",
            from, to
        );
    }

    Ok(merger)
}
