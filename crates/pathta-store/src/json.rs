//! JSON documents on disk.
//!
//! Documents are written with sorted keys, 4-space indentation, and non-ASCII
//! characters kept as-is. Every write lands in a temp file next to the target
//! that is flushed to disk and renamed into place, so a failed write leaves the
//! previous contents intact. A rewrite keeps the permissions of the file it
//! replaces.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use pathta_core::timestamp::{backup_suffix, local_now};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;

use crate::error::StoreError;

/// What [`update`] did besides rewriting the live file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    /// Snapshot of the pre-update document, when a backup folder was given.
    pub backup: Option<PathBuf>,
}

/// Load a JSON document.
///
/// # Errors
///
/// [`StoreError::NotFound`] if `path` is not a file, [`StoreError::Parse`] on
/// malformed JSON.
pub fn load(path: &Path) -> Result<Value, StoreError> {
    if !path.is_file() {
        return Err(StoreError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let raw = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Save a JSON document, replacing whatever is at `path`.
///
/// An empty `path` is a skipped save, not an error: returns `Ok(false)`.
///
/// # Errors
///
/// [`StoreError::Io`] if the parent directory is missing or not writable.
pub fn save(path: &Path, document: &Value) -> Result<bool, StoreError> {
    if path.as_os_str().is_empty() {
        tracing::debug!("empty path, save skipped");
        return Ok(false);
    }
    write_atomic(path, document)?;
    Ok(true)
}

/// Shallow-merge `patch` into the document at `path`.
///
/// When `backup_dir` is given, the current document is first written there under
/// a timestamped name (see [`backup_file_name`]) and that write is complete and
/// flushed before the live file is touched.
///
/// # Errors
///
/// - [`StoreError::NotAMapping`] if `patch` or the stored document is not an object
/// - [`StoreError::NotFound`] if `path` or `backup_dir` does not exist
/// - [`StoreError::Parse`] / [`StoreError::Io`] from the underlying load and writes
pub fn update(
    path: &Path,
    patch: &Value,
    backup_dir: Option<&Path>,
) -> Result<UpdateOutcome, StoreError> {
    update_with(path, patch, backup_dir, write_atomic)
}

fn update_with(
    path: &Path,
    patch: &Value,
    backup_dir: Option<&Path>,
    write_live: impl FnOnce(&Path, &Value) -> Result<(), StoreError>,
) -> Result<UpdateOutcome, StoreError> {
    let Some(patch) = patch.as_object() else {
        return Err(StoreError::NotAMapping {
            what: "update patch".to_string(),
        });
    };

    let mut document = load(path)?;
    if !document.is_object() {
        return Err(StoreError::NotAMapping {
            what: path.display().to_string(),
        });
    }

    let backup = match backup_dir {
        Some(dir) => Some(backup(path, &document, dir)?),
        None => None,
    };

    if let Some(fields) = document.as_object_mut() {
        for (key, value) in patch {
            fields.insert(key.clone(), value.clone());
        }
    }
    write_live(path, &document)?;
    tracing::debug!(path = %path.display(), keys = patch.len(), "document updated");

    Ok(UpdateOutcome { backup })
}

/// Render a document the way it is stored on disk.
///
/// # Errors
///
/// Only fails if `document` cannot be serialized, which does not happen for
/// values built from JSON.
pub fn to_pretty_string(document: &Value) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    document.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn backup(path: &Path, document: &Value, dir: &Path) -> Result<PathBuf, StoreError> {
    if !dir.is_dir() {
        return Err(StoreError::NotFound {
            path: dir.to_path_buf(),
        });
    }
    let target = free_backup_path(dir, path);
    write_atomic(&target, document)?;
    tracing::info!(from = %path.display(), to = %target.display(), "backup written");
    Ok(target)
}

fn write_atomic(path: &Path, document: &Value) -> Result<(), StoreError> {
    let rendered = to_pretty_string(document).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = temp_file_in(parent).map_err(|e| StoreError::io(parent, e))?;
    tmp.write_all(rendered.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| StoreError::io(tmp.path(), e))?;
    if let Ok(existing) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| StoreError::io(tmp.path(), e))?;
    }
    tmp.persist(path)
        .map_err(|e| StoreError::io(path, e.error))?;
    Ok(())
}

/// New files start at `0666` less the process umask, like a plain create.
#[cfg(unix)]
fn temp_file_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn temp_file_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

/// Backup file name for `path` stamped with the current time:
/// `<stem>_<Y>_<M>_<D>_<h>_<m>_<s><ext>`.
#[must_use]
pub fn backup_file_name(path: &Path) -> String {
    let (stem, ext) = stem_and_ext(path);
    format!("{stem}{}{ext}", backup_suffix(&local_now()))
}

/// First free backup path in `dir`. A same-second collision appends `(k)` after
/// the timestamp and leaves the stem alone.
fn free_backup_path(dir: &Path, path: &Path) -> PathBuf {
    let name = backup_file_name(path);
    let first = dir.join(&name);
    if !first.exists() {
        return first;
    }
    let (stamped, ext) = stem_and_ext(Path::new(&name));
    let mut counter: u64 = 1;
    loop {
        let candidate = dir.join(format!("{stamped}({counter}){ext}"));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

fn stem_and_ext(path: &Path) -> (String, String) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    (stem, ext)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn save_then_load_roundtrips() {
        let temp = TempDir::new().expect("tempdir should create");
        let path = temp.path().join("cfg.json");
        let doc = json!({"b": [1, 2, {"z": null}], "a": "café", "n": 1.5});

        assert!(save(&path, &doc).expect("save should succeed"));
        assert_eq!(load(&path).expect("load should succeed"), doc);
    }

    #[test]
    fn saved_text_is_sorted_indented_and_unescaped() {
        let temp = TempDir::new().expect("tempdir should create");
        let path = temp.path().join("cfg.json");
        save(&path, &json!({"b": 1, "a": "é"})).expect("save should succeed");

        let raw = fs::read_to_string(&path).expect("file should read");
        assert_eq!(raw, "{\n    \"a\": \"é\",\n    \"b\": 1\n}");
    }

    #[test]
    fn empty_path_skips_save() {
        assert!(!save(Path::new(""), &json!({"a": 1})).expect("skip is not an error"));
    }

    #[test]
    fn load_missing_is_not_found() {
        let temp = TempDir::new().expect("tempdir should create");
        let err = load(&temp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn load_malformed_is_parse_error() {
        let temp = TempDir::new().expect("tempdir should create");
        let path = temp.path().join("bad.json");
        fs::write(&path, "{not json").expect("fixture should write");
        assert!(matches!(load(&path).unwrap_err(), StoreError::Parse { .. }));
    }

    #[test]
    fn update_requires_existing_file_and_object_patch() {
        let temp = TempDir::new().expect("tempdir should create");
        let path = temp.path().join("cfg.json");

        let missing = update(&path, &json!({"a": 1}), None).unwrap_err();
        assert!(matches!(missing, StoreError::NotFound { .. }));

        save(&path, &json!({"a": 1})).expect("save should succeed");
        let not_map = update(&path, &json!([1, 2]), None).unwrap_err();
        assert!(matches!(not_map, StoreError::NotAMapping { .. }));
    }

    #[test]
    fn update_without_backup_merges_shallowly() {
        let temp = TempDir::new().expect("tempdir should create");
        let path = temp.path().join("cfg.json");
        save(&path, &json!({"a": 1, "nested": {"x": 1, "y": 2}})).expect("save should succeed");

        let outcome = update(&path, &json!({"nested": {"x": 9}, "c": true}), None)
            .expect("update should succeed");

        assert_eq!(outcome, UpdateOutcome::default());
        assert_eq!(
            load(&path).expect("load should succeed"),
            json!({"a": 1, "nested": {"x": 9}, "c": true})
        );
    }

    #[test]
    fn update_with_missing_backup_dir_leaves_file_untouched() {
        let temp = TempDir::new().expect("tempdir should create");
        let path = temp.path().join("cfg.json");
        save(&path, &json!({"a": 1})).expect("save should succeed");

        let err = update(&path, &json!({"a": 2}), Some(&temp.path().join("missing"))).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(load(&path).expect("load should succeed"), json!({"a": 1}));
    }

    #[test]
    fn failed_live_write_keeps_the_backup() {
        let temp = TempDir::new().expect("tempdir should create");
        let path = temp.path().join("cfg.json");
        let backups = temp.path().join("backup");
        fs::create_dir(&backups).expect("backup dir should create");
        save(&path, &json!({"a": 1})).expect("save should succeed");

        let err = update_with(&path, &json!({"a": 2}), Some(&backups), |target, _| {
            Err(StoreError::io(target, std::io::Error::other("disk full")))
        })
        .unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));

        let kept: Vec<PathBuf> = fs::read_dir(&backups)
            .expect("backup dir should list")
            .filter_map(Result::ok)
            .map(|e| e.path())
            .collect();
        assert_eq!(kept.len(), 1);
        assert_eq!(load(&kept[0]).expect("backup should load"), json!({"a": 1}));
        assert_eq!(load(&path).expect("live should load"), json!({"a": 1}));
    }

    #[test]
    fn backup_collision_counts_after_the_stamp() {
        let temp = TempDir::new().expect("tempdir should create");
        let source = temp.path().join("acq(1).json");
        let taken = free_backup_path(temp.path(), &source);
        fs::write(&taken, b"{}").expect("fixture should write");

        let next = free_backup_path(temp.path(), &source);
        let name = next.file_name().and_then(|n| n.to_str()).expect("utf-8 name");
        assert_ne!(next, taken);
        assert!(name.starts_with("acq(1)_"), "{name}");
        assert!(name.ends_with(".json"), "{name}");
    }

    #[test]
    fn backup_name_keeps_stem_and_extension() {
        let name = backup_file_name(Path::new("/x/settings.json"));
        assert!(name.starts_with("settings_"));
        assert!(name.ends_with(".json"));
        assert_eq!(name.matches('_').count(), 6);
    }
}
