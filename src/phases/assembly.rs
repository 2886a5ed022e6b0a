//! Phase 4: Assembly
//!
//! This phase turns the merge plan into the final line sequence. It resolves
//! the prefix block from the configuration, then hands the layout to
//! [`assemble`].
//!
//! ## Prefix block
//!
//! The prefix is either a literal list of lines or the head of a template
//! source file: every line up to the first one containing `stop_at`, without
//! lines starting with one of `skip_starts_with`, with the textual
//! replacements applied and the first line containing `banner_at` swapped
//! for the banner lines.

use std::fs;

use crate::assemble::{assemble, MergeLayout, MergePlan};
use crate::config::{MergeConfig, PrefixConfig, TemplatePrefix};
use crate::error::{Error, Result};
use crate::merger::HeaderMerger;
use crate::policy::MergePolicy;

/// Execute Phase 4: lay out the merged output.
pub fn execute<P: MergePolicy>(
    merger: &HeaderMerger<P>,
    plan: &MergePlan,
    config: &MergeConfig,
) -> Result<Vec<String>> {
    let layout = MergeLayout {
        prefix: load_prefix(config)?,
        front: config.layout.front.clone(),
        origin_comments: config.layout.origin_comments,
    };
    assemble(merger, plan, &layout)
}

/// Resolve the configured prefix block.
pub fn load_prefix(config: &MergeConfig) -> Result<Vec<String>> {
    match &config.layout.prefix {
        None => Ok(Vec::new()),
        Some(PrefixConfig::Lines { lines }) => Ok(lines.clone()),
        Some(PrefixConfig::Template { template }) => {
            let path = config.resolve(&template.path);
            let text = fs::read_to_string(&path).map_err(|source| Error::FileRead {
                path: path.clone(),
                source,
            })?;
            Ok(extract_template_prefix(&text, template))
        }
    }
}

/// Extract the prefix block from the text of a template file.
pub fn extract_template_prefix(text: &str, template: &TemplatePrefix) -> Vec<String> {
    let mut prefix = Vec::new();
    let mut banner_done = false;

    for line in text.lines() {
        let line = line.trim_end();
        if template
            .skip_starts_with
            .iter()
            .any(|skip| line.starts_with(skip.as_str()))
        {
            continue;
        }

        let mut line = line.to_string();
        for (from, to) in &template.replace {
            line = line.replace(from.as_str(), to);
        }

        if line.contains(template.stop_at.as_str()) {
            break;
        }
        if !banner_done {
            if let Some(banner_at) = &template.banner_at {
                if line.contains(banner_at.as_str()) {
                    prefix.extend(template.banner.iter().cloned());
                    banner_done = true;
                    continue;
                }
            }
        }
        prefix.push(line);
    }
    prefix
}
