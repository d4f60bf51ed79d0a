//! The study registry: one JSON document mapping study names to records.
//!
//! Every mutation re-reads the document from disk (under the advisory lock when
//! enabled), applies its change, and writes it back, so the in-memory view is
//! never the source of truth for a write.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use pathta_config::PathtaConfig;
use pathta_core::timestamp::{created_stamp, local_now};
use pathta_core::{StudyRecord, TAXONOMY};
use pathta_store::{StoreError, json, paths};
use serde_json::Value;

use crate::confirm::Confirm;
use crate::error::StudyError;
use crate::lock::RegistryLock;

/// Locking behaviour of a [`StudyRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryOptions {
    pub lock: bool,
    pub lock_timeout: Duration,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            lock: true,
            lock_timeout: Duration::from_secs(30),
        }
    }
}

impl From<&PathtaConfig> for RegistryOptions {
    fn from(config: &PathtaConfig) -> Self {
        Self {
            lock: config.registry.lock,
            lock_timeout: config.registry.lock_timeout(),
        }
    }
}

#[derive(Debug)]
pub struct StudyRegistry {
    path: PathBuf,
    options: RegistryOptions,
    studies: BTreeMap<String, StudyRecord>,
}

impl StudyRegistry {
    /// Open the registry at `path`, creating an empty one on first use.
    ///
    /// First-use initialization runs under the registry lock and re-checks for
    /// the file, so it never clobbers a registry another process just wrote.
    ///
    /// # Errors
    ///
    /// I/O failures creating the file, or [`StoreError::Parse`] if the existing
    /// document is not a map of complete study records.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StudyError> {
        Self::open_with(path, RegistryOptions::default())
    }

    /// Like [`open`](Self::open) with explicit locking behaviour.
    ///
    /// # Errors
    ///
    /// Same as [`open`](Self::open).
    pub fn open_with(path: impl Into<PathBuf>, options: RegistryOptions) -> Result<Self, StudyError> {
        let path = path.into();
        if !path.is_file() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                paths::ensure_dir(parent)?;
            }
            let _guard = lock_registry(&path, options)?;
            if !path.is_file() {
                json::save(&path, &Value::Object(serde_json::Map::new()))?;
                tracing::info!(path = %path.display(), "registry initialized");
            }
        }
        let studies = read(&path)?;
        Ok(Self {
            path,
            options,
            studies,
        })
    }

    /// Open the registry at the location and with the locking set in `config`.
    ///
    /// # Errors
    ///
    /// [`StudyError::Config`] if no registry path can be resolved, else as [`open`](Self::open).
    pub fn from_config(config: &PathtaConfig) -> Result<Self, StudyError> {
        let path = config.registry.resolved_path()?;
        Self::open_with(path, RegistryOptions::from(config))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of all registered studies.
    #[must_use]
    pub fn list(&self) -> BTreeSet<String> {
        self.studies.keys().cloned().collect()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StudyRecord> {
        self.studies.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.studies.contains_key(name)
    }

    /// Re-read the registry from disk.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the file was removed, or parse failures.
    pub fn reload(&mut self) -> Result<(), StudyError> {
        self.studies = read(&self.path)?;
        Ok(())
    }

    /// Create study `name` under `root`: the study folder, its taxonomy
    /// subfolders, and the registry entry.
    ///
    /// Returns `Ok(None)` without touching anything when `name` is already
    /// registered.
    ///
    /// # Errors
    ///
    /// - [`StudyError::RootNotFound`] if `root` is not a directory
    /// - [`StudyError::InvalidName`] for names that are not a single path component
    /// - [`StudyError::Locked`], folder creation, or registry write failures
    pub fn create(&mut self, name: &str, root: &Path) -> Result<Option<StudyRecord>, StudyError> {
        validate_name(name)?;
        if !root.is_dir() {
            return Err(StudyError::RootNotFound {
                path: root.to_path_buf(),
            });
        }

        let _guard = self.lock()?;
        self.reload()?;
        if self.contains(name) {
            tracing::warn!(study = name, "study already exists; use a different name or delete it first");
            return Ok(None);
        }

        let study_root = root.join(name);
        paths::ensure_dir(&study_root)?;
        for folder in TAXONOMY {
            paths::ensure_dir(&study_root.join(folder))?;
        }

        let record = StudyRecord::new(study_root, created_stamp(&local_now()));
        let patch = serde_json::json!({ name: encode(&self.path, &record)? });
        json::update(&self.path, &patch, None)?;
        self.verify_entry(name)?;

        self.studies.insert(name.to_string(), record.clone());
        tracing::info!(study = name, path = %record.path().display(), "study created");
        Ok(Some(record))
    }

    /// Delete study `name`: its whole folder tree and its registry entry.
    ///
    /// Asks `confirm` first and returns `Ok(false)` if declined.
    ///
    /// # Errors
    ///
    /// - [`StudyError::UnknownStudy`] if `name` is not registered
    /// - [`StudyError::Desync`] if the registered root no longer exists on disk
    /// - [`StudyError::Locked`], removal, or registry write failures
    pub fn delete(&mut self, name: &str, confirm: &dyn Confirm) -> Result<bool, StudyError> {
        self.reload()?;
        if !self.contains(name) {
            return Err(unknown(name));
        }
        if !confirm.confirm(&format!("Delete the study {name}?")) {
            tracing::info!(study = name, "delete declined");
            return Ok(false);
        }

        let _guard = self.lock()?;
        self.reload()?;
        let root = self
            .get(name)
            .map(|record| record.path().to_path_buf())
            .ok_or_else(|| unknown(name))?;
        if !root.is_dir() {
            return Err(StudyError::Desync {
                name: name.to_string(),
                path: root,
            });
        }

        std::fs::remove_dir_all(&root).map_err(|e| StudyError::io(&root, e))?;
        self.studies.remove(name);
        json::save(&self.path, &encode(&self.path, &self.studies)?)?;
        tracing::info!(study = name, "study deleted");
        Ok(true)
    }

    /// Store an extra field in the record of study `name`.
    ///
    /// # Errors
    ///
    /// [`StudyError::UnknownStudy`], [`pathta_core::CoreError::ReservedKey`] for
    /// `path`/`created`, or registry write failures.
    pub fn set_metadata(&mut self, name: &str, key: &str, value: Value) -> Result<(), StudyError> {
        let _guard = self.lock()?;
        self.reload()?;
        let record = self.studies.get_mut(name).ok_or_else(|| unknown(name))?;
        record.set_metadata(key, value)?;

        let patch = serde_json::json!({ name: encode(&self.path, &*record)? });
        json::update(&self.path, &patch, None)?;
        tracing::debug!(study = name, key, "study metadata updated");
        Ok(())
    }

    fn lock(&self) -> Result<Option<RegistryLock>, StudyError> {
        lock_registry(&self.path, self.options)
    }

    /// Soft check that the entry just written reads back with both fields.
    fn verify_entry(&self, name: &str) -> Result<(), StudyError> {
        let document = json::load(&self.path)?;
        let complete = document
            .get(name)
            .and_then(Value::as_object)
            .is_some_and(|entry| {
                ["path", "created"]
                    .iter()
                    .all(|field| entry.get(*field).is_some_and(|v| !v.is_null()))
            });
        if !complete {
            tracing::warn!(study = name, registry = %self.path.display(), "registry entry did not read back complete");
        }
        Ok(())
    }
}

fn lock_registry(path: &Path, options: RegistryOptions) -> Result<Option<RegistryLock>, StudyError> {
    if options.lock {
        RegistryLock::acquire(path, options.lock_timeout).map(Some)
    } else {
        Ok(None)
    }
}

fn read(path: &Path) -> Result<BTreeMap<String, StudyRecord>, StudyError> {
    let document = json::load(path)?;
    serde_json::from_value(document).map_err(|source| {
        StudyError::Store(StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
    })
}

fn encode<T: serde::Serialize>(path: &Path, value: &T) -> Result<Value, StudyError> {
    serde_json::to_value(value).map_err(|source| {
        StudyError::Store(StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
    })
}

fn unknown(name: &str) -> StudyError {
    StudyError::UnknownStudy {
        name: name.to_string(),
    }
}

fn validate_name(name: &str) -> Result<(), StudyError> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name == "." || name == ".." {
        "name is a relative path marker"
    } else if name.contains(['/', '\\']) {
        "name contains a path separator"
    } else {
        return Ok(());
    };
    Err(StudyError::InvalidName {
        name: name.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::confirm::AssumeYes;

    fn registry(temp: &TempDir) -> StudyRegistry {
        StudyRegistry::open(temp.path().join("registry").join("studies.json"))
            .expect("registry should open")
    }

    #[test]
    fn open_initializes_empty_registry() {
        let temp = TempDir::new().expect("tempdir should create");
        let reg = registry(&temp);

        assert!(reg.path().is_file());
        assert!(reg.list().is_empty());
        assert_eq!(json::load(reg.path()).expect("load"), serde_json::json!({}));
    }

    #[test]
    fn open_rejects_incomplete_records() {
        let temp = TempDir::new().expect("tempdir should create");
        let path = temp.path().join("studies.json");
        json::save(&path, &serde_json::json!({"Alpha": {"path": "/x"}})).expect("seed");

        let err = StudyRegistry::open(&path).unwrap_err();
        assert!(matches!(err, StudyError::Store(StoreError::Parse { .. })));
    }

    #[test]
    fn create_missing_root_fails() {
        let temp = TempDir::new().expect("tempdir should create");
        let mut reg = registry(&temp);
        let err = reg.create("Alpha", &temp.path().join("absent")).unwrap_err();
        assert!(matches!(err, StudyError::RootNotFound { .. }));
        assert!(reg.list().is_empty());
    }

    #[rstest]
    #[case("")]
    #[case("..")]
    #[case("a/b")]
    fn create_rejects_bad_names(#[case] name: &str) {
        let temp = TempDir::new().expect("tempdir should create");
        let mut reg = registry(&temp);
        let err = reg.create(name, temp.path()).unwrap_err();
        assert!(matches!(err, StudyError::InvalidName { .. }));
    }

    #[test]
    fn created_stamp_has_expected_shape() {
        let temp = TempDir::new().expect("tempdir should create");
        let mut reg = registry(&temp);
        let record = reg
            .create("Alpha", temp.path())
            .expect("create")
            .expect("new study");

        let (date, time) = record.created().split_once(", ").expect("comma separator");
        assert_eq!(date.split('/').count(), 3);
        assert_eq!(time.split(':').count(), 3);
    }

    #[test]
    fn metadata_persists_and_reserved_keys_are_refused() {
        let temp = TempDir::new().expect("tempdir should create");
        let mut reg = registry(&temp);
        reg.create("Alpha", temp.path()).expect("create");

        reg.set_metadata("Alpha", "owner", serde_json::json!("lab-a"))
            .expect("metadata");
        let reopened = StudyRegistry::open(reg.path()).expect("reopen");
        let record = reopened.get("Alpha").expect("registered");
        assert_eq!(record.metadata("owner"), Some(&serde_json::json!("lab-a")));

        let err = reg
            .set_metadata("Alpha", "path", serde_json::json!("/elsewhere"))
            .unwrap_err();
        assert!(matches!(err, StudyError::Core(_)));
    }

    #[test]
    fn delete_unknown_study_fails() {
        let temp = TempDir::new().expect("tempdir should create");
        let mut reg = registry(&temp);
        let err = reg.delete("Ghost", &AssumeYes).unwrap_err();
        assert!(matches!(err, StudyError::UnknownStudy { .. }));
    }

    #[test]
    fn disabled_locking_ignores_held_lock() {
        let temp = TempDir::new().expect("tempdir should create");
        let path = temp.path().join("studies.json");
        let mut reg = StudyRegistry::open_with(
            &path,
            RegistryOptions {
                lock: false,
                ..RegistryOptions::default()
            },
        )
        .expect("open");

        let _held = RegistryLock::acquire(&path, Duration::from_millis(10)).expect("external lock");
        reg.create("Alpha", temp.path()).expect("create ignores the lock");
        assert!(reg.contains("Alpha"));
    }
}
