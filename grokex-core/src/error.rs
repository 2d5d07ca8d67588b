//! Error types for the pattern engine
//!
//! This module provides error handling using the `thiserror` crate.
//! Errors are categorized by their source: expansion, regex compilation,
//! matching, dependency ordering, or catalog input.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the pattern engine
#[derive(Error, Debug)]
pub enum GrokError {
    /// A `%{NAME}` reference names a pattern that is not registered
    #[error("no pattern found for %{{{name}}}")]
    MissingPattern {
        /// The referenced pattern name
        name: String,
    },

    /// The fully expanded text is not a valid regular expression
    #[error("invalid regex `{pattern}`: {source}")]
    InvalidRegex {
        /// The expanded pattern handed to the regex compiler
        pattern: String,
        /// The underlying regex error
        #[source]
        source: regex::Error,
    },

    /// `is_match` or `captures` was called before any successful compile
    #[error("no compiled pattern")]
    NotCompiled,

    /// Catalog definitions reference each other in a cycle
    #[error("dependency cycle detected at pattern '{name}'")]
    CycleDetected {
        /// The pattern that was revisited while still on the traversal stack
        name: String,
    },

    /// A catalog file could not be read
    #[error("failed to read catalog '{}': {source}", path.display())]
    Io {
        /// The file or directory being read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A catalog directory could not be walked
    #[error("failed to walk catalog directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// A catalog line does not have the `NAME PATTERN` shape
    #[error("malformed catalog line {line} in {origin}: {content:?}")]
    MalformedLine {
        /// Where the line came from (a file path or `<memory>`)
        origin: String,
        /// 1-based line number
        line: usize,
        /// The offending line
        content: String,
    },
}

impl GrokError {
    /// Shorthand for [`GrokError::MissingPattern`]
    pub fn missing(name: impl Into<String>) -> Self {
        GrokError::MissingPattern { name: name.into() }
    }
}

/// A span representing a byte range in a pattern string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start position (inclusive)
    pub start: usize,
    /// End position (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, GrokError>;
