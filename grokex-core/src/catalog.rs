//! Pattern catalog reader
//!
//! A catalog is plain text with one `NAME PATTERN` definition per line.
//! Blank lines and lines starting with `#` are ignored. A catalog path may
//! be a single file or a directory whose files are all catalogs.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::error::{GrokError, Result};

/// One `NAME PATTERN` definition read from a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// The pattern name
    pub name: String,
    /// The raw pattern text, possibly containing references
    pub pattern: String,
}

impl CatalogEntry {
    /// Create a new entry
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        CatalogEntry {
            name: name.into(),
            pattern: pattern.into(),
        }
    }

    /// Split into `(name, pattern)`
    pub fn into_pair(self) -> (String, String) {
        (self.name, self.pattern)
    }
}

/// Parse a single catalog line
///
/// Returns `Ok(None)` for blank and comment lines.
fn parse_line(line: &str) -> std::result::Result<Option<CatalogEntry>, ()> {
    let line = line.strip_suffix('\r').unwrap_or(line).trim_start();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    // Split on the first whitespace run
    let (name, pattern) = line.split_once(char::is_whitespace).ok_or(())?;
    let pattern = pattern.trim_start();
    if pattern.is_empty() {
        return Err(());
    }
    Ok(Some(CatalogEntry::new(name, pattern)))
}

/// Parse catalog text
///
/// `origin` names the source in diagnostics. Malformed lines are logged and
/// skipped; the rest of the text is still read.
pub fn parse_catalog(text: &str, origin: &str) -> Vec<CatalogEntry> {
    let mut entries = Vec::new();
    for (index, line) in text.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(entry)) => entries.push(entry),
            Ok(None) => {}
            Err(()) => {
                let err = GrokError::MalformedLine {
                    origin: origin.to_string(),
                    line: index + 1,
                    content: line.to_string(),
                };
                tracing::warn!("{err}");
            }
        }
    }
    entries
}

/// Read a catalog file
///
/// Invalid UTF-8 is replaced with U+FFFD rather than failing the file.
pub fn read_catalog_file(path: &Path) -> Result<Vec<CatalogEntry>> {
    let bytes = fs::read(path).map_err(|source| GrokError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    if let Cow::Owned(_) = text {
        tracing::warn!(path = %path.display(), "catalog is not valid UTF-8");
    }
    Ok(parse_catalog(&text, &path.display().to_string()))
}

/// Hidden files (`.name`) in a catalog directory are not catalogs
fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Read a catalog from a file, or from every file directly inside a directory
///
/// Directory entries are read in file name order and are not descended into.
/// Symlinks are followed; hidden files are skipped.
pub fn read_catalog(path: impl AsRef<Path>) -> Result<Vec<CatalogEntry>> {
    let path = path.as_ref();
    let metadata = fs::metadata(path).map_err(|source| GrokError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if !metadata.is_dir() {
        return read_catalog_file(path);
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_file() && !is_hidden(&entry) {
            entries.extend(read_catalog_file(entry.path())?);
        }
    }
    tracing::debug!(path = %path.display(), count = entries.len(), "read catalog directory");
    Ok(entries)
}
