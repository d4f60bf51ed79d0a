//! Per-study file operations.

use std::fmt;
use std::path::{Path, PathBuf};

use pathta_core::{BACKUP_FOLDER, CONFIG_FOLDER, StudyRecord};
use pathta_search::{SearchOptions, SearchResult};
use pathta_store::{Blob, CodecRegistry, SaveOptions, UpdateOutcome, json, paths};
use serde_json::Value;

use crate::error::StudyError;
use crate::registry::StudyRegistry;
use crate::runtime::RuntimeTimer;

/// A registered study, bound to its root folder.
#[derive(Debug, Clone)]
pub struct Study {
    name: String,
    record: StudyRecord,
    codecs: CodecRegistry,
}

impl Study {
    /// Look up `name` in `registry`.
    ///
    /// # Errors
    ///
    /// [`StudyError::UnknownStudy`] if it is not registered.
    pub fn open(registry: &StudyRegistry, name: &str) -> Result<Self, StudyError> {
        let record = registry
            .get(name)
            .cloned()
            .ok_or_else(|| StudyError::UnknownStudy {
                name: name.to_string(),
            })?;
        tracing::debug!(study = name, "study loaded");
        Ok(Self::from_record(name, record))
    }

    /// Bind to an already resolved record, with the default codecs.
    #[must_use]
    pub fn from_record(name: &str, record: StudyRecord) -> Self {
        Self {
            name: name.to_string(),
            record,
            codecs: CodecRegistry::with_defaults(),
        }
    }

    /// Replace the codecs used by [`load`](Self::load) and [`save`](Self::save).
    #[must_use]
    pub fn with_codecs(mut self, codecs: CodecRegistry) -> Self {
        self.codecs = codecs;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.record.path()
    }

    #[must_use]
    pub fn created(&self) -> &str {
        self.record.created()
    }

    #[must_use]
    pub const fn record(&self) -> &StudyRecord {
        &self.record
    }

    /// Path of subfolder `name`, created first when `force` is set.
    ///
    /// Without `force` the path is returned whether or not it exists.
    ///
    /// # Errors
    ///
    /// Folder creation failures when `force` is set.
    pub fn folder(&self, name: &str, force: bool) -> Result<PathBuf, StudyError> {
        let path = self.path().join(name);
        if force && !path.is_dir() {
            paths::ensure_dir(&path)?;
        }
        Ok(path)
    }

    /// Create subfolder `name`. An existing folder is reported and returned as-is.
    ///
    /// # Errors
    ///
    /// Folder creation failures.
    pub fn add_folder(&self, name: &str) -> Result<PathBuf, StudyError> {
        let path = self.path().join(name);
        if path.is_dir() {
            tracing::warn!(study = %self.name, folder = name, "folder already exists");
            return Ok(path);
        }
        paths::ensure_dir(&path)?;
        tracing::info!(study = %self.name, folder = name, "folder added");
        Ok(path)
    }

    /// `file` inside `folder` (the study root when `None`).
    ///
    /// # Errors
    ///
    /// Folder creation failures when `force` is set.
    pub fn join(&self, file: &str, folder: Option<&str>, force: bool) -> Result<PathBuf, StudyError> {
        let base = match folder {
            Some(folder) => self.folder(folder, force)?,
            None => self.path().to_path_buf(),
        };
        Ok(base.join(file))
    }

    /// Load `file` from `folder` through the codec for its extension.
    ///
    /// # Errors
    ///
    /// [`pathta_store::StoreError::NotFound`], unsupported extensions, or codec failures.
    pub fn load(&self, file: &str, folder: Option<&str>) -> Result<Blob, StudyError> {
        let path = self.join(file, folder, false)?;
        let blob = self.codecs.load(&path)?;
        tracing::info!(study = %self.name, file, "loaded");
        Ok(blob)
    }

    /// Save `blob` as `file` in `folder` and return the path written.
    ///
    /// # Errors
    ///
    /// Unsupported extensions or codec failures.
    pub fn save(
        &self,
        file: &str,
        folder: Option<&str>,
        blob: &Blob,
        options: SaveOptions,
    ) -> Result<PathBuf, StudyError> {
        let path = self.join(file, folder, false)?;
        let written = self.codecs.save(&path, blob, options)?;
        tracing::info!(study = %self.name, path = %written.display(), "saved");
        Ok(written)
    }

    /// Load configuration document `file` from `config/`, or its `entry` field
    /// when given and present.
    ///
    /// # Errors
    ///
    /// [`StudyError::NotJson`] unless `file` has a `.json` extension, or load failures.
    pub fn load_config(&self, file: &str, entry: Option<&str>) -> Result<Value, StudyError> {
        require_json(file)?;
        let document = self
            .load(file, Some(CONFIG_FOLDER))?
            .into_json()
            .ok_or_else(|| not_json(file))?;
        match entry.and_then(|entry| document.get(entry)) {
            Some(value) => Ok(value.clone()),
            None => Ok(document),
        }
    }

    /// Save configuration document `file` into `config/`.
    ///
    /// Goes through [`save`](Self::save), so an existing file is kept and the
    /// document lands at the next free `name(k).json`.
    ///
    /// # Errors
    ///
    /// [`StudyError::NotJson`] unless `file` has a `.json` extension, or write failures.
    pub fn save_config(&self, file: &str, document: &Value) -> Result<PathBuf, StudyError> {
        require_json(file)?;
        self.save(
            file,
            Some(CONFIG_FOLDER),
            &Blob::Json(document.clone()),
            SaveOptions::default(),
        )
    }

    /// Merge `patch` into configuration document `file`, snapshotting the current
    /// version into `backup/` first when `backup` is set.
    ///
    /// # Errors
    ///
    /// [`StudyError::NotJson`], a missing config file, a non-object patch, or write failures.
    pub fn update_config(
        &self,
        file: &str,
        patch: &Value,
        backup: bool,
    ) -> Result<UpdateOutcome, StudyError> {
        require_json(file)?;
        let backup_dir = if backup {
            Some(self.folder(BACKUP_FOLDER, true)?)
        } else {
            None
        };
        let path = self.path().join(CONFIG_FOLDER).join(file);
        let outcome = json::update(&path, patch, backup_dir.as_deref())?;
        tracing::info!(study = %self.name, file, "configuration file updated");
        Ok(outcome)
    }

    /// Search `folder` (the study root when `None`).
    ///
    /// # Errors
    ///
    /// See [`pathta_search::search`].
    pub fn search<S: AsRef<str>>(
        &self,
        folder: Option<&str>,
        patterns: &[S],
        options: &SearchOptions,
    ) -> Result<SearchResult, StudyError> {
        let dir = folder.map_or_else(|| self.path().to_path_buf(), |f| self.path().join(f));
        let found = pathta_search::search(&dir, patterns, options)?;
        tracing::info!(study = %self.name, folder = %dir.display(), found = found.len(), "files found");
        Ok(found)
    }

    /// Search `folder` for exactly one file and load it.
    ///
    /// # Errors
    ///
    /// [`pathta_search::SearchError::Empty`] / [`pathta_search::SearchError::Ambiguous`]
    /// unless exactly one file matches, then as [`load`](Self::load).
    pub fn search_load<S: AsRef<str>>(
        &self,
        folder: Option<&str>,
        patterns: &[S],
        options: &SearchOptions,
    ) -> Result<Blob, StudyError> {
        let options = SearchOptions {
            load_single: true,
            ..options.clone()
        };
        let file = match self.search(folder, patterns, &options)? {
            SearchResult::Single(file) => file,
            other => pathta_search::single(other.files().into_iter().map(str::to_string).collect())?,
        };
        self.load(&file, folder)
    }

    /// Start a wall-clock timer whose result can be appended to `cache/runtime.txt`.
    #[must_use]
    pub fn start_timer(&self) -> RuntimeTimer {
        RuntimeTimer::start()
    }
}

impl fmt::Display for Study {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Study : {}\nPath : {}\nCreation : {}",
            self.name,
            self.path().display(),
            self.created()
        )
    }
}

fn require_json(file: &str) -> Result<(), StudyError> {
    let is_json = Path::new(file)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json { Ok(()) } else { Err(not_json(file)) }
}

fn not_json(file: &str) -> StudyError {
    StudyError::NotJson {
        file: file.to_string(),
    }
}
