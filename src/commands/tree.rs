//! # Tree Command Implementation
//!
//! This module implements the `tree` subcommand, which displays the internal
//! include graph as a tree: each file with the files it includes below it.
//!
//! ## Functionality
//!
//! - **Roots**: Files nothing includes, or the `--root` names when given
//! - **Depth Control**: Supports `--depth` flag to limit tree depth
//! - **Cycles**: A file that includes one of its ancestors is marked
//!   `(cycle)` instead of being expanded again
//! - **Repeats**: A file already expanded elsewhere is marked `(*)`
//!
//! The tree is built before ordering, so it also works on graphs that the
//! `merge` command rejects because of a cycle. Read-only.

use anyhow::{anyhow, Context, Result};
use clap::Args;
use ptree::{print_tree, TreeItem};
use std::collections::HashSet;
use std::path::PathBuf;

use header_merger::merger::HeaderMerger;
use header_merger::phases::orchestrator;
use header_merger::policy::MergePolicy;

use super::{load_config, override_roots};

/// Show the internal include tree
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Path to the .header-merger.yaml configuration file.
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "HEADER_MERGER_CONFIG",
        default_value = ".header-merger.yaml"
    )]
    pub config: PathBuf,

    /// Start the tree at these files (repeatable).
    #[arg(long, value_name = "NAME")]
    pub root: Vec<String>,

    /// Maximum depth to display in the tree.
    ///
    /// If not specified, displays the full tree.
    /// Use 0 to show only the root level, 1 to show direct includes, etc.
    #[arg(long, value_name = "NUM")]
    pub depth: Option<usize>,
}

/// Execute the `tree` command.
pub fn execute(args: TreeArgs) -> Result<()> {
    let mut config = load_config(&args.config)?;
    override_roots(&mut config, &args.root);

    let merger = orchestrator::parse(&config).context("Failed to parse sources")?;
    let root = build_forest(
        &merger,
        &config.layout.roots,
        args.depth.unwrap_or(usize::MAX),
    )?;
    print_tree(&root).map_err(|e| anyhow!("Failed to display tree: {}", e))?;
    Ok(())
}

/// Build the display tree under a synthetic node naming the file count.
fn build_forest<P: MergePolicy>(
    merger: &HeaderMerger<P>,
    roots: &[String],
    max_depth: usize,
) -> Result<TreeNode> {
    let graph = merger.graph();
    let roots: Vec<String> = if roots.is_empty() {
        let included: HashSet<&str> = graph.edges().map(|(_, to)| to).collect();
        graph
            .nodes()
            .filter(|name| !included.contains(name))
            .map(str::to_string)
            .collect()
    } else {
        for name in roots {
            if !graph.contains(name) {
                return Err(anyhow!("Unknown file: {}", name));
            }
        }
        roots.to_vec()
    };

    let mut builder = TreeBuilder {
        merger,
        max_depth,
        path: Vec::new(),
        expanded: HashSet::new(),
    };
    let mut children: Vec<TreeNode> = roots.iter().map(|name| builder.node(name, 0)).collect();

    // Files only reachable through a cycle have no top-level parent.
    if builder.expanded.len() < graph.len() && max_depth == usize::MAX {
        let leftover: Vec<String> = graph
            .nodes()
            .filter(|name| !builder.expanded.contains(*name))
            .map(str::to_string)
            .collect();
        for name in leftover {
            if !builder.expanded.contains(&name) {
                children.push(builder.node(&name, 0));
            }
        }
    }

    Ok(TreeNode {
        label: format!("{} files", graph.len()),
        children,
    })
}

struct TreeBuilder<'a, P> {
    merger: &'a HeaderMerger<P>,
    max_depth: usize,
    path: Vec<String>,
    expanded: HashSet<String>,
}

impl<P: MergePolicy> TreeBuilder<'_, P> {
    fn node(&mut self, name: &str, depth: usize) -> TreeNode {
        let mut label = name.to_string();
        if self.merger.record(name).map_or(true, |r| !r.has_content()) {
            label.push_str(" (no content)");
        }

        if self.path.iter().any(|p| p == name) {
            label.push_str(" (cycle)");
            return TreeNode::leaf(label);
        }

        let deps: Vec<String> = self
            .merger
            .graph()
            .dependencies(name)
            .into_iter()
            .map(str::to_string)
            .collect();
        if !self.expanded.insert(name.to_string()) && !deps.is_empty() {
            label.push_str(" (*)");
            return TreeNode::leaf(label);
        }
        if depth >= self.max_depth {
            return TreeNode::leaf(label);
        }

        self.path.push(name.to_string());
        let children = deps.iter().map(|dep| self.node(dep, depth + 1)).collect();
        self.path.pop();
        TreeNode { label, children }
    }
}

/// Tree node structure for ptree visualization
#[derive(Clone, Debug)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(label: String) -> Self {
        Self {
            label,
            children: vec![],
        }
    }
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: std::io::Write>(
        &self,
        f: &mut W,
        _style: &ptree::Style,
    ) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> std::borrow::Cow<'_, [Self::Child]> {
        std::borrow::Cow::Borrowed(&self.children)
    }
}
