//! Pattern filtering over a folder listing.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::SearchError;
use crate::split::split_even;

/// Any rendered path containing this is dropped from every result.
pub const LOCK_MARKER: &str = "lock.";

/// Options controlling [`search`].
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct SearchOptions {
    /// Match patterns against names as-is (`true`) or case-folded (`false`).
    pub case_sensitive: bool,
    /// Require every pattern to match (`true`) or concatenate per-pattern matches (`false`).
    /// Union results keep per-pattern grouping and are not sorted unless no patterns are given.
    pub intersection: bool,
    /// Join each name onto the searched folder.
    pub full_path: bool,
    /// Sort the rendered results ascending.
    pub sort: bool,
    /// File names to drop from the result.
    pub exclude: HashSet<String>,
    /// Split into this many chunks; `-1` means one file per chunk.
    pub split_into: Option<i64>,
    /// Expect exactly one match and return it as [`SearchResult::Single`].
    pub load_single: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            intersection: true,
            full_path: true,
            sort: true,
            exclude: HashSet::new(),
            split_into: None,
            load_single: false,
        }
    }
}

/// Files found by [`search`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SearchResult {
    Files(Vec<String>),
    Chunks(Vec<Vec<String>>),
    Single(String),
}

impl SearchResult {
    /// All paths, flattened in order.
    #[must_use]
    pub fn files(&self) -> Vec<&str> {
        match self {
            Self::Files(files) => files.iter().map(String::as_str).collect(),
            Self::Chunks(chunks) => chunks.iter().flatten().map(String::as_str).collect(),
            Self::Single(file) => vec![file.as_str()],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Files(files) => files.len(),
            Self::Chunks(chunks) => chunks.iter().map(Vec::len).sum(),
            Self::Single(_) => 1,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Search the direct children of `root` whose names contain `patterns`.
///
/// Pipeline: list, match, drop `exclude`d names, render, drop lock markers,
/// sort, then split (or resolve to a single path when `load_single` is set).
/// With no patterns every entry matches.
///
/// # Errors
///
/// - [`SearchError::NotFound`] if `root` is not a directory
/// - [`SearchError::InvalidSplit`] for a split count of 0 or below -1
/// - [`SearchError::Empty`] / [`SearchError::Ambiguous`] when `load_single` is set
///   and the match count is not exactly one
pub fn search<S: AsRef<str>>(
    root: &Path,
    patterns: &[S],
    options: &SearchOptions,
) -> Result<SearchResult, SearchError> {
    if !root.is_dir() {
        return Err(SearchError::NotFound {
            path: root.to_path_buf(),
        });
    }
    let names = list_names(root)?;
    let patterns: Vec<&str> = patterns.iter().map(|p| p.as_ref()).collect();

    // Union results stay grouped by pattern; with no patterns there is no grouping.
    let (matched, sort) = if options.intersection {
        (matching_all(&names, &patterns, options.case_sensitive), options.sort)
    } else {
        let grouped = !patterns.is_empty();
        (
            matching_any(&names, &patterns, options.case_sensitive),
            options.sort && !grouped,
        )
    };

    let mut files: Vec<String> = matched
        .into_iter()
        .filter(|name| !options.exclude.contains(*name))
        .map(|name| render(root, name, options.full_path))
        .filter(|path| !path.contains(LOCK_MARKER))
        .collect();

    if sort {
        files.sort();
    }
    tracing::debug!(root = %root.display(), found = files.len(), "search complete");

    if options.load_single {
        return single(files).map(SearchResult::Single);
    }

    match options.split_into {
        None => Ok(SearchResult::Files(files)),
        Some(split) => {
            let parts = chunk_count(split, files.len())?;
            Ok(SearchResult::Chunks(split_even(files, parts)))
        }
    }
}

/// The only element of `files`.
///
/// # Errors
///
/// [`SearchError::Empty`] for no files, [`SearchError::Ambiguous`] (carrying every
/// file) for more than one.
pub fn single(mut files: Vec<String>) -> Result<String, SearchError> {
    match files.len() {
        0 => Err(SearchError::Empty),
        1 => Ok(files.remove(0)),
        _ => Err(SearchError::Ambiguous { matches: files }),
    }
}

fn list_names(root: &Path) -> Result<Vec<String>, SearchError> {
    let io_err = |source| SearchError::Io {
        path: root.to_path_buf(),
        source,
    };
    let mut names = Vec::new();
    for entry in fs::read_dir(root).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

fn fold(text: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        text.to_string()
    } else {
        text.to_lowercase()
    }
}

/// Names containing every pattern, in listing order.
fn matching_all<'a>(names: &'a [String], patterns: &[&str], case_sensitive: bool) -> Vec<&'a str> {
    let folded: Vec<String> = patterns.iter().map(|p| fold(p, case_sensitive)).collect();
    names
        .iter()
        .filter(|name| {
            let name = fold(name, case_sensitive);
            folded.iter().all(|pattern| name.contains(pattern.as_str()))
        })
        .map(String::as_str)
        .collect()
}

/// Per-pattern match lists, concatenated in pattern order.
fn matching_any<'a>(names: &'a [String], patterns: &[&str], case_sensitive: bool) -> Vec<&'a str> {
    if patterns.is_empty() {
        return names.iter().map(String::as_str).collect();
    }
    patterns
        .iter()
        .flat_map(|pattern| matching_all(names, &[*pattern], case_sensitive))
        .collect()
}

fn render(root: &Path, name: &str, full_path: bool) -> String {
    if full_path {
        root.join(name).to_string_lossy().into_owned()
    } else {
        name.to_string()
    }
}

fn chunk_count(split: i64, len: usize) -> Result<usize, SearchError> {
    match split {
        -1 => Ok(len),
        n if n > 0 => Ok(usize::try_from(n).map_or(len, |n| n.min(len))),
        other => Err(SearchError::InvalidSplit(other)),
    }
}
