//! Extension-keyed blob codecs.
//!
//! A [`CodecRegistry`] maps file extensions to [`BlobCodec`] implementations.
//! New formats are added with [`CodecRegistry::register`]; the dispatcher itself
//! never changes.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use crate::error::StoreError;
use crate::json;
use crate::paths::safe_name;

/// In-memory content of a study file.
#[derive(Debug, Clone, PartialEq)]
pub enum Blob {
    /// A single JSON document.
    Json(Value),
    /// Plain text.
    Text(String),
    /// One JSON value per line.
    Records(Vec<Value>),
}

impl Blob {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Json(_) => "json",
            Self::Text(_) => "text",
            Self::Records(_) => "records",
        }
    }

    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// Load/save capability for one family of file extensions.
pub trait BlobCodec: Send + Sync {
    /// Short human-readable codec name, used in errors.
    fn name(&self) -> &'static str;

    /// Extensions handled, lowercase and without the leading dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Read the file at `path`. The registry has already checked it exists.
    ///
    /// # Errors
    ///
    /// Codec-specific parse or I/O failures.
    fn load(&self, path: &Path) -> Result<Blob, StoreError>;

    /// Write `blob` to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// [`StoreError::BlobMismatch`] if the codec cannot represent `blob`, or I/O failures.
    fn save(&self, path: &Path, blob: &Blob) -> Result<(), StoreError>;
}

/// Options for [`CodecRegistry::save`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// Write over an existing file instead of picking a free `name(k).ext`.
    pub overwrite: bool,
}

/// `.json` documents, written sorted and indented.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

impl BlobCodec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn load(&self, path: &Path) -> Result<Blob, StoreError> {
        json::load(path).map(Blob::Json)
    }

    fn save(&self, path: &Path, blob: &Blob) -> Result<(), StoreError> {
        match blob {
            Blob::Json(value) => json::save(path, value).map(|_| ()),
            other => Err(mismatch(self, other)),
        }
    }
}

/// `.jsonl` files, one value per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonLinesCodec;

impl BlobCodec for JsonLinesCodec {
    fn name(&self) -> &'static str {
        "jsonl"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["jsonl"]
    }

    fn load(&self, path: &Path) -> Result<Blob, StoreError> {
        let records = serde_jsonlines::json_lines::<Value, _>(path)
            .and_then(|lines| lines.collect::<std::io::Result<Vec<Value>>>())
            .map_err(|e| StoreError::io(path, e))?;
        Ok(Blob::Records(records))
    }

    fn save(&self, path: &Path, blob: &Blob) -> Result<(), StoreError> {
        match blob {
            Blob::Records(records) => serde_jsonlines::write_json_lines(path, records)
                .map_err(|e| StoreError::io(path, e)),
            other => Err(mismatch(self, other)),
        }
    }
}

/// Plain text and delimited text, kept verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextCodec;

impl BlobCodec for TextCodec {
    fn name(&self) -> &'static str {
        "text"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["txt", "csv", "tsv"]
    }

    fn load(&self, path: &Path) -> Result<Blob, StoreError> {
        fs::read_to_string(path)
            .map(Blob::Text)
            .map_err(|e| StoreError::io(path, e))
    }

    fn save(&self, path: &Path, blob: &Blob) -> Result<(), StoreError> {
        match blob {
            Blob::Text(text) => fs::write(path, text).map_err(|e| StoreError::io(path, e)),
            other => Err(mismatch(self, other)),
        }
    }
}

fn mismatch(codec: &dyn BlobCodec, blob: &Blob) -> StoreError {
    StoreError::BlobMismatch {
        codec: codec.name().to_string(),
        kind: blob.kind(),
    }
}

/// Dispatches load/save to the codec registered for a file's extension.
#[derive(Clone, Default)]
pub struct CodecRegistry {
    codecs: HashMap<String, Arc<dyn BlobCodec>>,
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("extensions", &self.supported_extensions())
            .finish()
    }
}

impl CodecRegistry {
    /// A registry with no codecs.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry with the built-in JSON, JSON-lines, and text codecs.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(JsonCodec);
        registry.register(JsonLinesCodec);
        registry.register(TextCodec);
        registry
    }

    /// Register `codec` for all of its extensions, replacing earlier registrations.
    pub fn register<C: BlobCodec + 'static>(&mut self, codec: C) {
        let codec: Arc<dyn BlobCodec> = Arc::new(codec);
        for ext in codec.extensions() {
            self.codecs.insert((*ext).to_string(), Arc::clone(&codec));
        }
    }

    /// Registered extensions, sorted.
    #[must_use]
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.codecs.keys().map(String::as_str).collect();
        exts.sort_unstable();
        exts
    }

    /// Codec for `path`'s extension.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnsupportedFormat`] if nothing is registered for it.
    pub fn codec_for(&self, path: &Path) -> Result<Arc<dyn BlobCodec>, StoreError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        self.codecs
            .get(&extension)
            .cloned()
            .ok_or(StoreError::UnsupportedFormat { extension })
    }

    /// Load the file at `path`.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if `path` is not a file,
    /// [`StoreError::UnsupportedFormat`] for unknown extensions, or codec failures.
    pub fn load(&self, path: &Path) -> Result<Blob, StoreError> {
        if !path.is_file() {
            return Err(StoreError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let codec = self.codec_for(path)?;
        codec.load(path)
    }

    /// Save `blob` at `path` and return where it was written.
    ///
    /// Unless `options.overwrite` is set, an existing file is left alone and the
    /// blob goes to the first free `name(k).ext` (see [`safe_name`]).
    ///
    /// # Errors
    ///
    /// [`StoreError::UnsupportedFormat`] for unknown extensions, or codec failures.
    pub fn save(
        &self,
        path: &Path,
        blob: &Blob,
        options: SaveOptions,
    ) -> Result<PathBuf, StoreError> {
        let codec = self.codec_for(path)?;
        let target = if options.overwrite {
            path.to_path_buf()
        } else {
            safe_name(path)
        };
        codec.save(&target, blob)?;
        Ok(target)
    }
}
