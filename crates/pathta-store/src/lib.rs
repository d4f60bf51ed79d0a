//! # pathta-store
//!
//! Persistence primitives for pathta studies:
//! - [`json`]: load, save, and update-with-backup of JSON documents
//! - [`paths`]: folder creation and collision-avoiding file names
//! - [`codec`]: extension-keyed blob codecs behind a uniform load/save capability

pub mod codec;
pub mod error;
pub mod json;
pub mod paths;

pub use codec::{Blob, BlobCodec, CodecRegistry, SaveOptions};
pub use error::StoreError;
pub use json::UpdateOutcome;
