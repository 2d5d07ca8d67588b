//! Pattern registry
//!
//! This module owns the mapping from pattern name to pattern text. Patterns
//! arrive either one at a time or as a catalog batch. A batch is ordered by
//! its references and expanded so that the stored text is reference-free.

use std::collections::HashMap;

use crate::error::Result;
use crate::expand::{OnUnresolved, PatternSource, expand};
use crate::graph::DependencyGraph;

/// Registry of named patterns
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    /// Map from pattern name to pattern text
    patterns: HashMap<String, String>,
    /// Bumped on every mutation
    generation: u64,
}

impl PatternRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pattern, replacing any previous one with the same name
    ///
    /// The text is stored as given; references in it are resolved when it
    /// is used.
    pub fn register(&mut self, name: impl Into<String>, raw: impl Into<String>) {
        self.patterns.insert(name.into(), raw.into());
        self.generation += 1;
    }

    /// Get the pattern text registered under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.patterns.get(name).map(String::as_str)
    }

    /// Check if a pattern name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.patterns.contains_key(name)
    }

    /// Number of registered patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Registered names, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    /// Counter that changes whenever the registry is modified
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Load a batch of `(name, raw_pattern)` definitions
    ///
    /// Definitions may reference each other in any declaration order. They
    /// are expanded dependencies-first, each one only against definitions of
    /// this same batch, and the expanded text is registered. A later
    /// definition of a name replaces an earlier one in the batch.
    ///
    /// Returns the number of patterns registered.
    ///
    /// # Errors
    /// - [`GrokError::CycleDetected`](crate::GrokError::CycleDetected) if
    ///   definitions reference each other in a cycle
    /// - [`GrokError::MissingPattern`](crate::GrokError::MissingPattern) if a
    ///   reference is unresolved and `on_unresolved` is
    ///   [`OnUnresolved::Fail`]
    ///
    /// On error nothing from the batch is registered.
    pub fn load_catalog<I, N, P>(
        &mut self,
        entries: I,
        on_unresolved: OnUnresolved,
    ) -> Result<usize>
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: Into<String>,
    {
        let mut definitions: HashMap<String, String> = HashMap::new();
        let mut graph = DependencyGraph::new();
        for (name, raw) in entries {
            let (name, raw) = (name.into(), raw.into());
            graph.insert(&name, &raw);
            definitions.insert(name, raw);
        }

        let order = graph.topological_sort()?;

        let mut expanded: HashMap<String, String> = HashMap::with_capacity(order.len());
        for name in order.into_iter().rev() {
            let raw = definitions.get(&name).map_or("", String::as_str);
            let body = expand(raw, &expanded, on_unresolved)?;
            expanded.insert(name, body);
        }

        let count = expanded.len();
        self.patterns.extend(expanded);
        self.generation += 1;
        tracing::debug!(count, "loaded pattern catalog");
        Ok(count)
    }
}

impl PatternSource for PatternRegistry {
    fn resolve(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}
