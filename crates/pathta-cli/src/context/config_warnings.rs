/// Config sections and an example field for each, as spelled in env var keys.
const SECTIONS: [(&str, &str); 2] = [("REGISTRY", "PATH"), ("GENERAL", "BACKUP_ON_UPDATE")];

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_mistyped_env() {
    for warning in collect_mistyped_env_warnings(std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_mistyped_env_warnings<I>(env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    SECTIONS
        .iter()
        .filter_map(|(section, field)| {
            let prefix = format!("PATHTA_{section}");
            let nested = format!("{prefix}__");
            env_keys
                .iter()
                .any(|key| key.starts_with(&prefix) && !key.starts_with(&nested))
                .then(|| {
                    format!(
                        "{prefix}* env vars without a double underscore are ignored. Use {nested}<FIELD> (example: {nested}{field})."
                    )
                })
        })
        .collect()
}
