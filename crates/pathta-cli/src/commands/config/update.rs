use std::path::PathBuf;

use pathta_core::CONFIG_FOLDER;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_json;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct UpdateResponse {
    path: PathBuf,
    backup: Option<PathBuf>,
}

pub fn run(
    study: &str,
    file: &str,
    raw_patch: &str,
    no_backup: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let patch = parse_json(raw_patch, "patch")?;
    let backup = ctx.config.general.backup_on_update && !no_backup;

    let study = ctx.study(study)?;
    let outcome = study.update_config(file, &patch, backup)?;

    output(
        &UpdateResponse {
            path: study.path().join(CONFIG_FOLDER).join(file),
            backup: outcome.backup,
        },
        flags.format,
    )
}
