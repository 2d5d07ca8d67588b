//! Dependency graph for catalog loading
//!
//! This module tracks which patterns each catalog definition references and
//! orders the definitions so that every pattern can be expanded after the
//! patterns it depends on. It provides:
//! - An arena of definition names (name -> index) with per-definition edges
//! - A depth-first topological sort with cycle detection

use std::collections::HashMap;

use crate::error::{GrokError, Result};
use crate::scanner::Scanner;

/// Traversal state of a node during the sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Visited,
}

/// Mapping from definition name to the names it references
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Definition names, indexed by insertion order
    names: Vec<String>,
    /// Map from definition name to index
    name_to_index: HashMap<String, usize>,
    /// Referenced names per definition, in order of appearance
    edges: Vec<Vec<String>>,
}

impl DependencyGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(name, raw_pattern)` definitions
    pub fn from_definitions<'a, I>(definitions: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut graph = Self::new();
        for (name, raw) in definitions {
            graph.insert(name, raw);
        }
        graph
    }

    /// Add a definition, scanning `raw` for the names it references
    ///
    /// Only the referenced name matters for an edge; aliases are ignored.
    /// Re-inserting a name replaces its edges.
    pub fn insert(&mut self, name: &str, raw: &str) {
        let deps = Scanner::new(raw).map(|r| r.name).collect();
        self.insert_edges(name, deps);
    }

    /// Add a definition with an explicit dependency list
    pub fn insert_edges(&mut self, name: &str, deps: Vec<String>) {
        match self.name_to_index.get(name) {
            Some(&index) => self.edges[index] = deps,
            None => {
                self.name_to_index
                    .insert(name.to_string(), self.names.len());
                self.names.push(name.to_string());
                self.edges.push(deps);
            }
        }
    }

    /// Get the names referenced by a definition
    pub fn dependencies(&self, name: &str) -> Option<&[String]> {
        self.name_to_index
            .get(name)
            .map(|&index| self.edges[index].as_slice())
    }

    /// Check if a definition exists
    pub fn contains(&self, name: &str) -> bool {
        self.name_to_index.contains_key(name)
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the graph has no definitions
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Definition names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Resolve edges to indices, dropping names that are not definitions
    fn adjacency(&self) -> Vec<Vec<usize>> {
        self.edges
            .iter()
            .map(|deps| {
                deps.iter()
                    .filter_map(|dep| self.name_to_index.get(dep).copied())
                    .collect()
            })
            .collect()
    }

    /// Order the definitions with every dependent before its dependencies
    ///
    /// Reverse the result to get an expansion order where each name comes
    /// after everything it references. Names referenced but never defined
    /// are treated as leaves and do not appear in the output.
    ///
    /// # Errors
    /// Returns [`GrokError::CycleDetected`] naming the first definition that
    /// is reached again while it is still being visited.
    pub fn topological_sort(&self) -> Result<Vec<String>> {
        let adjacency = self.adjacency();
        let mut marks = vec![Mark::Unvisited; self.names.len()];
        let mut finished = Vec::with_capacity(self.names.len());

        for root in 0..self.names.len() {
            if marks[root] != Mark::Unvisited {
                continue;
            }

            // Explicit stack of (node, next edge to follow)
            let mut stack = vec![(root, 0usize)];
            marks[root] = Mark::Visiting;

            while let Some(frame) = stack.last_mut() {
                let (node, next) = *frame;
                match adjacency[node].get(next) {
                    Some(&dep) => {
                        frame.1 += 1;
                        match marks[dep] {
                            Mark::Unvisited => {
                                marks[dep] = Mark::Visiting;
                                stack.push((dep, 0));
                            }
                            Mark::Visiting => {
                                return Err(GrokError::CycleDetected {
                                    name: self.names[dep].clone(),
                                });
                            }
                            Mark::Visited => {}
                        }
                    }
                    None => {
                        marks[node] = Mark::Visited;
                        finished.push(node);
                        stack.pop();
                    }
                }
            }
        }

        Ok(finished
            .into_iter()
            .rev()
            .map(|index| self.names[index].clone())
            .collect())
    }
}
