//! Study error types.

use std::path::PathBuf;

use pathta_config::ConfigError;
use pathta_core::CoreError;
use pathta_search::SearchError;
use pathta_store::StoreError;

/// Errors from registry and study operations.
#[derive(Debug, thiserror::Error)]
pub enum StudyError {
    /// The name is not in the registry.
    #[error("study '{name}' is not registered")]
    UnknownStudy { name: String },

    /// The parent directory given for a new study does not exist.
    #[error("study root directory not found: {}", path.display())]
    RootNotFound { path: PathBuf },

    /// The registry references a study whose root is gone from disk.
    #[error("registry and disk disagree: study '{name}' points to missing {}", path.display())]
    Desync { name: String, path: PathBuf },

    /// A configuration operation was given a file that is not JSON.
    #[error("'{file}' is not a JSON configuration file")]
    NotJson { file: String },

    /// The study name cannot be used as a folder name.
    #[error("invalid study name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// Another process holds the registry lock.
    #[error("registry is locked by {holder}; lock file {}", path.display())]
    Locked { holder: String, path: PathBuf },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StudyError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
