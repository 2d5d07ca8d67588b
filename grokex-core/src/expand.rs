//! Pattern expander
//!
//! Rewrites `%{NAME}` / `%{NAME:ALIAS}` references into named capture groups
//! `(?P<label>body)`, where `body` is the already-expanded text of `NAME`.
//!
//! The output is spliced together from the source text and the looked-up
//! bodies in one left-to-right pass, so a body that happens to contain
//! `%{...}` text is never expanded a second time.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::error::{GrokError, Result};
use crate::scanner::Scanner;

/// What to do with a reference whose name cannot be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnUnresolved {
    /// Abort with [`GrokError::MissingPattern`]
    Fail,
    /// Expand the reference to an empty capture group
    #[default]
    SubstituteEmpty,
}

/// A lookup of fully expanded pattern bodies by name
pub trait PatternSource {
    /// Get the expanded body registered under `name`
    fn resolve(&self, name: &str) -> Option<&str>;
}

impl PatternSource for HashMap<String, String> {
    fn resolve(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Expand every reference in `raw` against `source`
///
/// # Example
/// ```
/// use std::collections::HashMap;
/// use grokex_core::{OnUnresolved, expand};
///
/// let mut resolved = HashMap::new();
/// resolved.insert("NUM".to_string(), r"\d+".to_string());
///
/// let out = expand("%{NUM:n}s", &resolved, OnUnresolved::Fail).unwrap();
/// assert_eq!(out, r"(?P<n>\d+)s");
/// ```
///
/// # Errors
/// With [`OnUnresolved::Fail`], returns [`GrokError::MissingPattern`] for the
/// first reference whose name `source` does not know.
pub fn expand<S>(raw: &str, source: &S, on_unresolved: OnUnresolved) -> Result<String>
where
    S: PatternSource + ?Sized,
{
    let mut out = String::with_capacity(raw.len());
    let mut cursor = 0;

    for reference in Scanner::new(raw) {
        let body = match (source.resolve(&reference.name), on_unresolved) {
            (Some(body), _) => body,
            (None, OnUnresolved::Fail) => return Err(GrokError::missing(reference.name)),
            (None, OnUnresolved::SubstituteEmpty) => {
                tracing::warn!(
                    name = %reference.name,
                    "unresolved reference expanded to an empty group"
                );
                ""
            }
        };

        out.push_str(&raw[cursor..reference.span.start]);
        // Writing into a String cannot fail
        let _ = write!(out, "(?P<{}>{})", reference.label(), body);
        cursor = reference.span.end;
    }

    out.push_str(&raw[cursor..]);
    tracing::trace!(raw, expanded = %out, "expanded pattern");
    Ok(out)
}
