//! # pathta-search
//!
//! Filename search over a single folder.
//!
//! A file matches a pattern when the pattern is a substring of its name. Several
//! patterns combine either as an intersection (every pattern must match) or as a
//! union (per-pattern match lists concatenated in pattern order, duplicates kept).
//! Results can be filtered, rendered as full paths, sorted, and split into
//! near-equal chunks.
//!
//! ```no_run
//! use std::path::Path;
//! use pathta_search::{SearchOptions, search};
//!
//! let files = search(Path::new("/data/Alpha/feature"), &["subj01", "alpha"], &SearchOptions::default())
//!     .expect("search");
//! println!("{:?}", files.files());
//! ```

pub mod error;
pub mod filter;
pub mod split;

pub use error::SearchError;
pub use filter::{LOCK_MARKER, SearchOptions, SearchResult, search, single};
pub use split::split_even;
