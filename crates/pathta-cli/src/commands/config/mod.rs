mod get;
mod set;
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ConfigCommands;
use crate::context::AppContext;

/// Handle `pathta config`.
pub fn handle(action: &ConfigCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ConfigCommands::Get { study, file, entry } => {
            get::run(study, file, entry.as_deref(), ctx, flags)
        }
        ConfigCommands::Set {
            study,
            file,
            document,
        } => set::run(study, file, document, ctx, flags),
        ConfigCommands::Update {
            study,
            file,
            patch,
            no_backup,
        } => update::run(study, file, patch, *no_backup, ctx, flags),
    }
}
