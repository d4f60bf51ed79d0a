mod create;
mod delete;
mod folder;
mod info;
mod list;
mod tag;

use pathta_core::StudyRecord;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::StudyCommands;
use crate::context::AppContext;

/// A registry entry as printed: the name next to the flattened record.
#[derive(Debug, Serialize)]
struct StudyView<'a> {
    name: &'a str,
    #[serde(flatten)]
    record: &'a StudyRecord,
}

/// Handle `pathta study`.
pub fn handle(action: &StudyCommands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        StudyCommands::Create { name, root } => create::run(name, root, ctx, flags),
        StudyCommands::List => list::run(ctx, flags),
        StudyCommands::Info { name } => info::run(name, ctx, flags),
        StudyCommands::Delete { name, yes } => delete::run(name, *yes, ctx, flags),
        StudyCommands::Folder {
            name,
            folder,
            force,
        } => folder::run(name, folder, *force, ctx, flags),
        StudyCommands::Tag { name, key, value } => tag::run(name, key, value, ctx, flags),
    }
}
