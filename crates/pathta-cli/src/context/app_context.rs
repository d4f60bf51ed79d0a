use std::path::PathBuf;

use anyhow::Context;
use pathta_config::PathtaConfig;
use pathta_study::{RegistryOptions, Study, StudyRegistry};

use crate::cli::GlobalFlags;

/// Loaded configuration plus the registry every command works against.
pub struct AppContext {
    pub config: PathtaConfig,
    pub registry: StudyRegistry,
}

impl AppContext {
    /// Open the registry named by `--registry`, else the configured one.
    pub fn init(config: PathtaConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let path = match flags.registry.as_deref() {
            Some(explicit) => PathBuf::from(explicit),
            None => config.registry.resolved_path()?,
        };

        let registry = StudyRegistry::open_with(&path, RegistryOptions::from(&config))
            .with_context(|| format!("failed to open study registry at {}", path.display()))?;
        tracing::debug!(registry = %path.display(), studies = registry.list().len(), "registry opened");

        Ok(Self { config, registry })
    }

    /// Facade for a registered study.
    pub fn study(&self, name: &str) -> anyhow::Result<Study> {
        Ok(Study::open(&self.registry, name)?)
    }
}
