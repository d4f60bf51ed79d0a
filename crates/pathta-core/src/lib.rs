//! # pathta-core
//!
//! Core types shared across all pathta crates:
//! - The study record persisted in the registry
//! - The fixed folder taxonomy created under every study root
//! - Timestamp formats used for creation stamps and backup names
//! - Cross-cutting error types

pub mod errors;
pub mod record;
pub mod taxonomy;
pub mod timestamp;

pub use errors::CoreError;
pub use record::StudyRecord;
pub use taxonomy::{BACKUP_FOLDER, CACHE_FOLDER, CONFIG_FOLDER, SCRIPT_FOLDER, TAXONOMY};
