//! Grokex Core Library
//!
//! Named, composable regex patterns. Patterns are registered under a name and
//! referenced from other patterns as `%{NAME}` or `%{NAME:ALIAS}`; each
//! reference becomes a named capture group in the compiled regex.
//!
//! ```
//! use grokex_core::Grok;
//!
//! let mut grok = Grok::new();
//! grok.add_pattern("NUMBER", r"\d+");
//! grok.add_pattern("WORD", r"\w+");
//!
//! let caps = grok.parse("%{WORD:user} has %{NUMBER:count}", "alice has 42").unwrap();
//! assert_eq!(caps["user"], "alice");
//! assert_eq!(caps["count"], "42");
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod expand;
pub mod graph;
pub mod groups;
pub mod matcher;
pub mod registry;
pub mod scanner;

pub use catalog::{CatalogEntry, parse_catalog, read_catalog, read_catalog_file};
pub use config::Config;
pub use error::{GrokError, Result, Span};
pub use expand::{OnUnresolved, PatternSource, expand};
pub use graph::DependencyGraph;
pub use groups::GroupLabels;
pub use matcher::Grok;
pub use registry::PatternRegistry;
pub use scanner::{Reference, Scanner, scan_references};
