//! Integration tests for TOML + environment configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use std::path::PathBuf;

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pathta_config::PathtaConfig;
use pretty_assertions::assert_eq;

fn layered(file: &str) -> Figment {
    Figment::from(Serialized::defaults(PathtaConfig::default()))
        .merge(Toml::file(file))
        .merge(Env::prefixed("PATHTA_").split("__"))
}

#[test]
fn loads_registry_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[registry]
path = "/srv/pathta/studies.json"
lock = false
lock_timeout_secs = 5
"#,
        )?;

        let config = PathtaConfig::from_figment(&layered("config.toml"))
            .map_err(|e| e.to_string())?;

        assert_eq!(
            config.registry.path,
            Some(PathBuf::from("/srv/pathta/studies.json"))
        );
        assert!(!config.registry.lock);
        assert_eq!(config.registry.lock_timeout_secs, 5);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
backup_on_update = true
"#,
        )?;
        jail.set_env("PATHTA_GENERAL__BACKUP_ON_UPDATE", "false");
        jail.set_env("PATHTA_REGISTRY__PATH", "/tmp/override.json");

        let config = PathtaConfig::from_figment(&layered("config.toml"))
            .map_err(|e| e.to_string())?;

        assert!(!config.general.backup_on_update);
        assert_eq!(
            config.registry.resolved_path().map_err(|e| e.to_string())?,
            PathBuf::from("/tmp/override.json")
        );
        Ok(())
    });
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "")?;

        let config = PathtaConfig::from_figment(&layered("config.toml"))
            .map_err(|e| e.to_string())?;

        assert!(config.registry.path.is_none());
        assert!(config.registry.lock);
        assert!(config.general.confirm_delete);
        Ok(())
    });
}

#[test]
fn invalid_timeout_is_reported() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[registry]
lock_timeout_secs = 0
"#,
        )?;

        let result = PathtaConfig::from_figment(&layered("config.toml"));
        assert!(result.is_err());
        Ok(())
    });
}
