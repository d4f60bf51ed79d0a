//! # pathta-study
//!
//! The study registry and the per-study facade built on it.
//!
//! - [`StudyRegistry`]: name → record document, study creation and deletion
//! - [`Study`]: folder resolution, codec-dispatched load/save, configuration
//!   documents with backups, and folder search for one study
//! - [`Confirm`]: the gate asked before anything is deleted
//!
//! ```no_run
//! use std::path::Path;
//! use pathta_study::{Study, StudyRegistry};
//! use pathta_search::SearchOptions;
//!
//! let mut registry = StudyRegistry::open("/tmp/pathta/studies.json")?;
//! registry.create("Alpha", Path::new("/data"))?;
//!
//! let study = Study::open(&registry, "Alpha")?;
//! let files = study.search(Some("feature"), &["subj01"], &SearchOptions::default())?;
//! # Ok::<(), pathta_study::StudyError>(())
//! ```

pub mod confirm;
pub mod error;
pub mod lock;
pub mod registry;
pub mod runtime;
pub mod study;

pub use confirm::{AssumeYes, Confirm, StdinConfirm};
pub use error::StudyError;
pub use registry::{RegistryOptions, StudyRegistry};
pub use runtime::{RUNTIME_FILE, RuntimeTimer};
pub use study::Study;
