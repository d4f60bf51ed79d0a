//! Errors raised while loading pathta settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file or `PATHTA_*` variable could not be merged or parsed.
    #[error("invalid pathta settings: {0}")]
    Figment(#[from] figment::Error),

    /// No registry file location could be determined.
    #[error(
        "no study registry location: set [registry] path in config.toml or PATHTA_REGISTRY__PATH (this platform has no data directory to default to)"
    )]
    NoRegistryPath,

    #[error("{field} = {reason}")]
    InvalidValue { field: String, reason: String },
}
