//! General behaviour toggles.

use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Snapshot a config file into the study's `backup/` folder before updating it.
    #[serde(default = "default_true")]
    pub backup_on_update: bool,

    /// Ask before deleting a study (the CLI `--yes` flag bypasses this).
    #[serde(default = "default_true")]
    pub confirm_delete: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            backup_on_update: default_true(),
            confirm_delete: default_true(),
        }
    }
}
