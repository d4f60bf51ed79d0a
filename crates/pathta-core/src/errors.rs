//! Cross-cutting error types for pathta.
//!
//! Domain-specific errors (`StoreError`, `SearchError`, `StudyError`) live in
//! their respective crates and wrap this one where needed.

use thiserror::Error;

/// Errors that can be raised by the core types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Attempted to overwrite a structural record field through the metadata accessor.
    #[error("'{key}' is a reserved study record field")]
    ReservedKey { key: String },
}
