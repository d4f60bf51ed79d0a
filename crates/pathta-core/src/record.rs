use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::CoreError;

const RESERVED_FIELDS: [&str; 2] = ["path", "created"];

/// Registry entry for a single study.
///
/// `path` and `created` are fixed at creation. Anything else stored alongside
/// them in the registry document goes through [`metadata`](Self::metadata) and
/// [`set_metadata`](Self::set_metadata).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudyRecord {
    path: PathBuf,
    created: String,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl StudyRecord {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, created: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            created: created.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Root directory of the study.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creation stamp, `M/D/YYYY, H:M:S`.
    #[must_use]
    pub fn created(&self) -> &str {
        &self.created
    }

    /// Whether both structural fields are populated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.path.as_os_str().is_empty() && !self.created.is_empty()
    }

    #[must_use]
    pub fn metadata(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Store an extra field next to `path` and `created`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ReservedKey`] for `path` or `created`.
    pub fn set_metadata(&mut self, key: &str, value: Value) -> Result<Option<Value>, CoreError> {
        if RESERVED_FIELDS.contains(&key) {
            return Err(CoreError::ReservedKey {
                key: key.to_string(),
            });
        }
        Ok(self.extra.insert(key.to_string(), value))
    }

    #[must_use]
    pub const fn all_metadata(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }
}
