//! Pattern matcher
//!
//! [`Grok`] ties a [`PatternRegistry`] to a compiled regex. Compiling a
//! pattern expands its references against the registry (without storing the
//! expansion) and keeps the result until a different pattern is compiled.

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;

use crate::catalog::{CatalogEntry, parse_catalog, read_catalog};
use crate::config::Config;
use crate::error::{GrokError, Result};
use crate::expand::{OnUnresolved, expand};
use crate::groups::GroupLabels;
use crate::registry::PatternRegistry;

/// The most recently compiled pattern
#[derive(Debug, Clone)]
struct CompiledPattern {
    /// The pattern as passed to `compile`
    source: String,
    /// Registry generation the expansion was made against
    generation: u64,
    regex: Regex,
    /// Labels of groups renamed to keep names unique
    labels: GroupLabels,
}

/// Named-pattern regex engine
#[derive(Debug, Clone, Default)]
pub struct Grok {
    registry: PatternRegistry,
    config: Config,
    compiled: Option<CompiledPattern>,
}

impl Grok {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with the given configuration
    pub fn with_config(config: Config) -> Self {
        Grok {
            config,
            ..Self::default()
        }
    }

    /// The engine configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The pattern registry
    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Register a named pattern, replacing any previous one
    pub fn add_pattern(&mut self, name: impl Into<String>, pattern: impl Into<String>) {
        self.registry.register(name, pattern);
    }

    /// Get a registered pattern
    pub fn pattern(&self, name: &str) -> Option<&str> {
        self.registry.get(name)
    }

    /// Number of registered patterns
    pub fn pattern_count(&self) -> usize {
        self.registry.len()
    }

    /// Load catalog entries into the registry
    ///
    /// Returns the number of patterns registered.
    pub fn add_catalog<I>(&mut self, entries: I) -> Result<usize>
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        self.registry.load_catalog(
            entries.into_iter().map(CatalogEntry::into_pair),
            self.config.on_unresolved,
        )
    }

    /// Load patterns from a catalog file or a directory of catalog files
    pub fn add_patterns_from_path(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let entries = read_catalog(path)?;
        self.add_catalog(entries)
    }

    /// Load several catalog paths as one batch
    ///
    /// References may cross paths: a definition in one catalog can use a
    /// name defined in another.
    pub fn add_patterns_from_paths<I, P>(&mut self, paths: I) -> Result<usize>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut entries = Vec::new();
        for path in paths {
            entries.extend(read_catalog(path)?);
        }
        self.add_catalog(entries)
    }

    /// Load patterns from catalog text
    pub fn add_patterns_from_str(&mut self, text: &str) -> Result<usize> {
        self.add_catalog(parse_catalog(text, "<memory>"))
    }

    /// Expand every reference in `pattern` against the registry
    ///
    /// # Errors
    /// Returns [`GrokError::MissingPattern`] if a reference is not registered.
    pub fn expand(&self, pattern: &str) -> Result<String> {
        expand(pattern, &self.registry, OnUnresolved::Fail)
    }

    /// Compile `pattern` into the active matcher
    ///
    /// Compiling the pattern that is already active is a no-op as long as the
    /// registry has not changed since. On error the previous matcher stays
    /// active.
    pub fn compile(&mut self, pattern: &str) -> Result<()> {
        let generation = self.registry.generation();
        if let Some(compiled) = &self.compiled {
            if compiled.source == pattern && compiled.generation == generation {
                tracing::debug!(pattern, "compiled pattern cache hit");
                return Ok(());
            }
        }

        let expanded = self.expand(pattern)?;
        let (unique, labels) = GroupLabels::disambiguate(&expanded);
        if !labels.is_empty() {
            tracing::debug!(pattern, "renamed repeated group labels");
        }
        let regex = Regex::new(&unique).map_err(|source| GrokError::InvalidRegex {
            pattern: unique.clone(),
            source,
        })?;

        tracing::debug!(pattern, expanded = %unique, "compiled pattern");
        self.compiled = Some(CompiledPattern {
            source: pattern.to_string(),
            generation,
            regex,
            labels,
        });
        Ok(())
    }

    /// The source text of the active matcher
    pub fn compiled_pattern(&self) -> Option<&str> {
        self.compiled.as_ref().map(|c| c.source.as_str())
    }

    fn active(&self) -> Result<&CompiledPattern> {
        self.compiled.as_ref().ok_or(GrokError::NotCompiled)
    }

    /// The active compiled regex
    ///
    /// Repeated labels appear under renamed groups (`A`, `A_2`, ...).
    pub fn regex(&self) -> Result<&Regex> {
        Ok(&self.active()?.regex)
    }

    /// Check if the active matcher matches anywhere in `text`
    pub fn is_match(&self, text: &str) -> Result<bool> {
        Ok(self.regex()?.is_match(text))
    }

    /// Extract every named capture of the active matcher from `text`
    ///
    /// The whole match is reported under the empty label `""`. Groups that
    /// did not take part in the match map to an empty string, and so does
    /// every label when `text` does not match at all. When a label occurs
    /// more than once, the last group that took part in the match wins.
    pub fn captures(&self, text: &str) -> Result<HashMap<String, String>> {
        let compiled = self.active()?;
        let found = compiled.regex.captures(text);

        let mut captures = HashMap::new();
        for (index, name) in compiled.regex.capture_names().enumerate() {
            let label = match name {
                Some(name) => compiled.labels.label(name),
                None if index == 0 => "",
                None => continue,
            };
            match found.as_ref().and_then(|caps| caps.get(index)) {
                Some(m) => {
                    captures.insert(label.to_string(), m.as_str().to_string());
                }
                None => {
                    captures.entry(label.to_string()).or_default();
                }
            }
        }
        Ok(captures)
    }

    /// Compile `pattern` and extract the captures from `text`
    pub fn parse(&mut self, pattern: &str, text: &str) -> Result<HashMap<String, String>> {
        self.compile(pattern)?;
        self.captures(text)
    }
}
