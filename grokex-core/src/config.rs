//! Engine configuration

use crate::expand::OnUnresolved;

/// Options controlling how a [`Grok`](crate::Grok) engine loads catalogs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Policy for references that cannot be resolved while bulk-loading a
    /// catalog. Compiling a single pattern always fails on them.
    pub on_unresolved: OnUnresolved,
}

impl Config {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog loading fails on the first unresolved reference
    pub fn strict() -> Self {
        Config {
            on_unresolved: OnUnresolved::Fail,
        }
    }

    /// Set the unresolved-reference policy for catalog loading
    pub fn with_on_unresolved(mut self, on_unresolved: OnUnresolved) -> Self {
        self.on_unresolved = on_unresolved;
        self
    }
}
