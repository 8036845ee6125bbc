//! Expansion of input patterns into an ordered list of files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{MergeError, Result};

/// Characters that turn a pattern into a wildcard pattern.
const GLOB_META: [char; 3] = ['*', '?', '['];

/// A path produced by expanding one of the input patterns.
///
/// The merge fills in `valid`, `pages` and `skip_reason` as it processes the
/// file; files never reached because an earlier one aborted the run keep
/// `valid == None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFile {
    /// Path of the file.
    pub path: PathBuf,
    /// Index of the pattern that produced this path.
    pub pattern_index: usize,
    /// Whether the path existed when it was resolved.
    pub exists: bool,
    /// Whether the file parsed as a PDF; `None` until it has been opened.
    pub valid: Option<bool>,
    /// Pages contributed to the combined document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<usize>,
    /// Why the file was skipped, if it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,
}

impl ResolvedFile {
    fn new(path: PathBuf, pattern_index: usize) -> Self {
        let exists = path.try_exists().unwrap_or(false);
        Self {
            path,
            pattern_index,
            exists,
            valid: None,
            pages: None,
            skip_reason: None,
        }
    }
}

/// Outcome of expanding every pattern.
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    /// Resolved files in merge order.
    pub files: Vec<ResolvedFile>,
    /// Wildcard patterns that matched nothing, in input order.
    pub unmatched: Vec<String>,
    /// Directory entries a wildcard could not read.
    pub unreadable: Vec<UnreadableEntry>,
}

/// A path a wildcard pattern ran into but could not read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableEntry {
    /// Pattern being expanded.
    pub pattern: String,
    /// Path that could not be read.
    pub path: PathBuf,
    /// Error from the file system.
    pub reason: String,
}

impl Expansion {
    /// True when no pattern produced any path.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Whether `pattern` contains glob wildcards.
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains(GLOB_META)
}

/// Expand `patterns` in order.
///
/// Matches of a single pattern are sorted by path. A pattern without
/// wildcards is taken as a literal path and kept even if it does not exist,
/// so that the caller can report it as missing.
///
/// Directory entries a wildcard cannot read are collected in
/// [`Expansion::unreadable`] and do not stop the expansion.
///
/// # Errors
///
/// Returns [`MergeError::InvalidPattern`] if a pattern is not valid glob
/// syntax.
pub fn resolve_patterns<T>(patterns: T) -> Result<Expansion>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut expansion = Expansion::default();

    for (index, pattern) in patterns.into_iter().enumerate() {
        let pattern = pattern.as_ref();
        let paths = resolve_pattern(pattern, &mut expansion.unreadable)?;

        if paths.is_empty() {
            tracing::debug!(pattern, "pattern matched no files");
            expansion.unmatched.push(pattern.to_owned());
            continue;
        }

        tracing::debug!(pattern, matches = paths.len(), "expanded pattern");
        expansion
            .files
            .extend(paths.into_iter().map(|path| ResolvedFile::new(path, index)));
    }

    Ok(expansion)
}

fn resolve_pattern(pattern: &str, unreadable: &mut Vec<UnreadableEntry>) -> Result<Vec<PathBuf>> {
    if !is_glob_pattern(pattern) {
        if pattern.is_empty() {
            return Ok(Vec::new());
        }
        return Ok(vec![PathBuf::from(pattern)]);
    }

    let entries =
        glob::glob(pattern).map_err(|err| MergeError::invalid_pattern(pattern, err))?;

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => paths.push(path),
            Err(err) => {
                tracing::debug!(pattern, path = %err.path().display(), error = %err.error(), "unreadable entry");
                unreadable.push(UnreadableEntry {
                    pattern: pattern.to_owned(),
                    path: err.path().to_path_buf(),
                    reason: err.error().to_string(),
                });
            }
        }
    }
    paths.sort();

    Ok(paths)
}
