//! Dependency graph between logical file names.
//!
//! An edge `a -> b` means "a includes b", so b's content must come first.
//! Nodes may be referenced by an edge before (or without ever) being parsed.
//!
//! Ordering is a depth-first post-order walk: dependencies are emitted before
//! the file that needs them. Roots are visited in discovery order and edges in
//! insertion order, so identical input always yields the identical order.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Which part of the graph to order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Every node.
    All,
    /// The named nodes plus everything they transitively depend on.
    Roots(Vec<String>),
}

impl Scope {
    /// Scope for a single file and its dependencies.
    pub fn root(name: impl Into<String>) -> Self {
        Scope::Roots(vec![name.into()])
    }

    /// Human-readable description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Scope::All => "all files".to_string(),
            Scope::Roots(names) => format!("dependencies of {}", names.join(", ")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Active,
    Done,
}

/// Directed "depends on" graph keyed by name.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    names: Vec<String>,
    index: HashMap<String, usize>,
    edges: Vec<Vec<usize>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node if it does not exist yet and return its index.
    pub fn add_node(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), idx);
        self.edges.push(Vec::new());
        idx
    }

    /// Record that `from` depends on `to`. Idempotent.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        let from = self.add_node(from);
        let to = self.add_node(to);
        if !self.edges[from].contains(&to) {
            self.edges[from].push(to);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All node names in discovery order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Direct dependencies of `name`, in the order they were added.
    pub fn dependencies(&self, name: &str) -> Vec<&str> {
        match self.index.get(name) {
            Some(&idx) => self.edges[idx]
                .iter()
                .map(|&dep| self.names[dep].as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    /// All `(from, to)` edges.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges.iter().enumerate().flat_map(move |(from, deps)| {
            deps.iter()
                .map(move |&to| (self.names[from].as_str(), self.names[to].as_str()))
        })
    }

    /// Order the nodes of `scope` so that every dependency precedes its
    /// dependents.
    ///
    /// Fails with [`Error::CycleDetected`] if the scoped subgraph has a cycle,
    /// and with [`Error::UnknownFile`] if a root is not in the graph.
    pub fn topological_order(&self, scope: &Scope) -> Result<Vec<String>> {
        let starts: Vec<usize> = match scope {
            Scope::All => (0..self.names.len()).collect(),
            Scope::Roots(roots) => roots
                .iter()
                .map(|name| {
                    self.index
                        .get(name)
                        .copied()
                        .ok_or_else(|| Error::UnknownFile { name: name.clone() })
                })
                .collect::<Result<_>>()?,
        };

        let mut marks = vec![Mark::Unvisited; self.names.len()];
        let mut order = Vec::new();
        for start in starts {
            if marks[start] == Mark::Unvisited {
                self.visit(start, &mut marks, &mut order, scope)?;
            }
        }

        Ok(order.into_iter().map(|idx| self.names[idx].clone()).collect())
    }

    fn visit(
        &self,
        start: usize,
        marks: &mut [Mark],
        order: &mut Vec<usize>,
        scope: &Scope,
    ) -> Result<()> {
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
        marks[start] = Mark::Active;

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            match self.edges[node].get(frame.1) {
                Some(&dep) => {
                    frame.1 += 1;
                    match marks[dep] {
                        Mark::Unvisited => {
                            marks[dep] = Mark::Active;
                            stack.push((dep, 0));
                        }
                        Mark::Active => return Err(self.cycle_error(&stack, dep, scope)),
                        Mark::Done => {}
                    }
                }
                None => {
                    marks[node] = Mark::Done;
                    order.push(node);
                    stack.pop();
                }
            }
        }
        Ok(())
    }

    fn cycle_error(&self, stack: &[(usize, usize)], back_to: usize, scope: &Scope) -> Error {
        let begin = stack
            .iter()
            .position(|&(node, _)| node == back_to)
            .unwrap_or(0);
        let mut path: Vec<&str> = stack[begin..]
            .iter()
            .map(|&(node, _)| self.names[node].as_str())
            .collect();
        path.push(self.names[back_to].as_str());
        Error::CycleDetected {
            scope: scope.describe(),
            cycle: path.join(" -> "),
        }
    }
}
