//! # pathta-config
//!
//! Layered configuration loading for pathta using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PATHTA_*` prefix, `__` as separator)
//! 2. Project-level `.pathta/config.toml`
//! 3. User-level `~/.config/pathta/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PATHTA_REGISTRY__PATH` -> `registry.path`,
//! `PATHTA_GENERAL__BACKUP_ON_UPDATE` -> `general.backup_on_update`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use pathta_config::PathtaConfig;
//!
//! let config = PathtaConfig::load_with_dotenv().expect("config");
//! let registry = config.registry.resolved_path().expect("registry path");
//! println!("registry at {}", registry.display());
//! ```

mod error;
mod general;
mod registry;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use registry::{REGISTRY_FILE, RegistryConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PathtaConfig {
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl PathtaConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`load_with_dotenv`](Self::load_with_dotenv)
    /// if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source fails to parse or a value
    /// has the wrong type, and [`ConfigError::InvalidValue`] for a zero lock timeout.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".pathta/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("PATHTA_").split("__"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.registry.lock && self.registry.lock_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "registry.lock_timeout_secs".to_string(),
                reason: "must be greater than zero when locking is enabled".to_string(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pathta").join("config.toml"))
    }
}
