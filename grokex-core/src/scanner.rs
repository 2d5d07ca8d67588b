//! Reference scanner
//!
//! Finds `%{NAME}` and `%{NAME:ALIAS}` references in a pattern string.
//! Anything that does not have exactly that shape is left alone and
//! treated as literal pattern text.

use crate::error::Span;

/// A `%{NAME}` or `%{NAME:ALIAS}` reference found in a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// The referenced pattern name
    pub name: String,
    /// Optional capture label overriding `name`
    pub alias: Option<String>,
    /// Byte range of the whole `%{...}` token in the scanned text
    pub span: Span,
}

impl Reference {
    /// The capture label this reference expands to
    pub fn label(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// The literal `%{...}` text of this reference
    pub fn as_str<'a>(&self, input: &'a str) -> &'a str {
        &input[self.span.start..self.span.end]
    }
}

/// Iterator over the references of a pattern, left to right
pub struct Scanner<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given pattern
    pub fn new(input: &'a str) -> Self {
        Scanner { input, position: 0 }
    }

    /// Check if a character may appear in a name or alias
    fn is_word_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }

    /// Read a run of word characters starting at `start`, returning its end
    fn read_word(&self, start: usize) -> Option<usize> {
        let len = self.input[start..]
            .find(|c: char| !Self::is_word_char(c))
            .unwrap_or(self.input.len() - start);
        if len == 0 { None } else { Some(start + len) }
    }

    /// Try to read a reference whose `%{` opener starts at `start`
    fn read_reference(&self, start: usize) -> Option<Reference> {
        let name_start = start + 2;
        let name_end = self.read_word(name_start)?;
        let (alias, close) = if self.input[name_end..].starts_with(':') {
            let alias_start = name_end + 1;
            let alias_end = self.read_word(alias_start)?;
            (Some(&self.input[alias_start..alias_end]), alias_end)
        } else {
            (None, name_end)
        };

        if !self.input[close..].starts_with('}') {
            return None;
        }

        Some(Reference {
            name: self.input[name_start..name_end].to_string(),
            alias: alias.map(str::to_string),
            span: Span::new(start, close + 1),
        })
    }
}

impl Iterator for Scanner<'_> {
    type Item = Reference;

    fn next(&mut self) -> Option<Reference> {
        while let Some(offset) = self.input[self.position..].find("%{") {
            let start = self.position + offset;
            match self.read_reference(start) {
                Some(reference) => {
                    self.position = reference.span.end;
                    return Some(reference);
                }
                // Not a reference; resume right after the `%`
                None => self.position = start + 1,
            }
        }
        self.position = self.input.len();
        None
    }
}

/// Collect every reference in `pattern`, in order, keeping duplicates
pub fn scan_references(pattern: &str) -> Vec<Reference> {
    Scanner::new(pattern).collect()
}
