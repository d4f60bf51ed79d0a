//! Store error types.

use std::path::PathBuf;

/// Errors from JSON document I/O, path helpers, and blob codecs.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A file or directory that must already exist is missing.
    #[error("not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but is not valid JSON.
    #[error("malformed JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An update patch or the document it applies to is not a JSON object.
    #[error("{what} is not a JSON object")]
    NotAMapping { what: String },

    /// No codec is registered for the file extension.
    #[error("extension '{extension}' is not supported")]
    UnsupportedFormat { extension: String },

    /// The codec cannot write this kind of blob.
    #[error("{codec} codec cannot save a {kind} blob")]
    BlobMismatch { codec: String, kind: &'static str },

    /// Underlying filesystem failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
