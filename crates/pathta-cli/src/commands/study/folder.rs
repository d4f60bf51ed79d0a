use std::path::PathBuf;

use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct FolderResponse {
    path: PathBuf,
    exists: bool,
}

pub fn run(
    name: &str,
    folder: &str,
    force: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let study = ctx.study(name)?;
    let path = study.folder(folder, force)?;

    output(
        &FolderResponse {
            exists: path.is_dir(),
            path,
        },
        flags.format,
    )
}
