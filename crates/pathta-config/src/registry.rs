//! Location and locking behaviour of the study registry file.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// File name of the registry inside the pathta data directory.
pub const REGISTRY_FILE: &str = "studies.json";

const fn default_lock_timeout_secs() -> u64 {
    30
}

const fn default_lock() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// Explicit registry path. Empty means `<data dir>/pathta/studies.json`.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Take an advisory lock around registry read-modify-write cycles.
    #[serde(default = "default_lock")]
    pub lock: bool,

    /// How long to wait for another writer to release the lock, in seconds.
    #[serde(default = "default_lock_timeout_secs")]
    pub lock_timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: None,
            lock: default_lock(),
            lock_timeout_secs: default_lock_timeout_secs(),
        }
    }
}

impl RegistryConfig {
    /// Registry file path: the explicit `path` if set, else the well-known location
    /// under the user's data directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoRegistryPath`] when no path is set and the platform
    /// has no data directory.
    pub fn resolved_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = self.path.as_ref().filter(|p| !p.as_os_str().is_empty()) {
            return Ok(path.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join("pathta").join(REGISTRY_FILE))
            .ok_or(ConfigError::NoRegistryPath)
    }

    #[must_use]
    pub const fn lock_timeout(&self) -> Duration {
        Duration::from_secs(self.lock_timeout_secs)
    }
}
