//! Capture group names of an expanded pattern
//!
//! Nested expansion repeats labels: `%{D}` over `D = %{B}%{C}`,
//! `B = %{A}`, `C = %{A}` yields two `A` groups. The regex engine rejects
//! duplicate group names, so every repeat is renamed to a unique internal
//! name and mapped back to its label when captures are read.

use std::collections::{HashMap, HashSet};

use crate::error::Span;

/// Byte spans of the names of all named groups `(?P<name>` / `(?<name>`
///
/// Escaped characters and character classes are skipped.
fn group_name_spans(pattern: &str) -> Vec<Span> {
    let bytes = pattern.as_bytes();
    let mut spans = Vec::new();
    let mut in_class = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b'[' if !in_class => {
                in_class = true;
                i += 1;
                // A leading `]` (after an optional `^`) is a literal
                if bytes.get(i) == Some(&b'^') {
                    i += 1;
                }
                if bytes.get(i) == Some(&b']') {
                    i += 1;
                }
                continue;
            }
            b']' if in_class => in_class = false,
            b'(' if !in_class => {
                let rest = &pattern[i + 1..];
                let prefix = if rest.starts_with("?P<") {
                    3
                } else if rest.starts_with("?<") {
                    2
                } else {
                    0
                };
                if prefix > 0 {
                    let start = i + 1 + prefix;
                    if let Some(len) = pattern[start..].find('>') {
                        let name = &pattern[start..start + len];
                        if !name.is_empty() && !name.starts_with(['=', '!']) {
                            spans.push(Span::new(start, start + len));
                            i = start + len + 1;
                            continue;
                        }
                    }
                }
            }
            _ => {}
        }
        i += 1;
    }

    spans
}

/// Mapping from the group names of a compiled regex to capture labels
#[derive(Debug, Clone, Default)]
pub struct GroupLabels {
    /// Renamed group -> the label it stands for
    renamed: HashMap<String, String>,
}

impl GroupLabels {
    /// Rename repeated group names in `pattern` so each one is unique
    ///
    /// The first occurrence of a name is kept; later ones become
    /// `name_2`, `name_3`, ... skipping names already used in the pattern.
    pub fn disambiguate(pattern: &str) -> (String, GroupLabels) {
        let spans = group_name_spans(pattern);
        let mut taken: HashSet<String> = spans
            .iter()
            .map(|span| pattern[span.start..span.end].to_string())
            .collect();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut labels = GroupLabels::default();
        let mut out = String::with_capacity(pattern.len());
        let mut cursor = 0;

        for span in &spans {
            let name = &pattern[span.start..span.end];
            if seen.insert(name) {
                continue;
            }

            let unique = (2..)
                .map(|n| format!("{name}_{n}"))
                .find(|candidate| !taken.contains(candidate))
                .unwrap_or_default();

            out.push_str(&pattern[cursor..span.start]);
            out.push_str(&unique);
            cursor = span.end;
            taken.insert(unique.clone());
            labels.renamed.insert(unique, name.to_string());
        }

        out.push_str(&pattern[cursor..]);
        (out, labels)
    }

    /// The capture label for a group name of the compiled regex
    pub fn label<'a>(&'a self, group: &'a str) -> &'a str {
        self.renamed.get(group).map_or(group, String::as_str)
    }

    /// Check if any group was renamed
    pub fn is_empty(&self) -> bool {
        self.renamed.is_empty()
    }
}
