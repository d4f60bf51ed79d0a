//! Folder creation and collision-avoiding file names.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Create `path` and any missing parents.
///
/// Returns `true` when something was created, `false` when the directory was
/// already there.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the directory cannot be created (including when
/// a regular file already occupies `path`).
pub fn ensure_dir(path: &Path) -> Result<bool, StoreError> {
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(path).map_err(|e| StoreError::io(path, e))?;
    tracing::info!(path = %path.display(), "created folder");
    Ok(true)
}

/// Return `path` unchanged if nothing exists there, otherwise the first free
/// variant `name(k).ext`.
///
/// On each collision the stem is rewritten from its first `(` onwards, so
/// `a(1).txt` becomes `a(2).txt` rather than `a(1)(1).txt`. A stem that already
/// carries unrelated parentheses is rewritten the same way:
/// `report (draft).txt` collides into `report (1).txt`.
#[must_use]
pub fn safe_name(path: &Path) -> PathBuf {
    let mut candidate = path.to_path_buf();
    let mut counter: u64 = 1;
    while candidate.exists() {
        candidate = numbered(&candidate, counter);
        counter += 1;
    }
    candidate
}

fn numbered(path: &Path, counter: u64) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = stem.find('(').map_or(stem.as_str(), |open| &stem[..open]);

    let mut name = format!("{base}({counter})");
    if let Some(ext) = path.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    path.with_file_name(name)
}
