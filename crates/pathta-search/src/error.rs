//! Search error types for pathta-search.

use std::path::PathBuf;

/// Errors from folder search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The folder to search does not exist.
    #[error("search folder not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Listing the folder failed.
    #[error("cannot list {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single result was requested but several files matched.
    #[error("expected exactly one match, found {}:\n{}", matches.len(), matches.join("\n"))]
    Ambiguous { matches: Vec<String> },

    /// A single result was requested but nothing matched.
    #[error("expected exactly one match, found none")]
    Empty,

    /// Split count is neither positive nor -1.
    #[error("invalid split count {0}: use a positive number or -1")]
    InvalidSplit(i64),
}
