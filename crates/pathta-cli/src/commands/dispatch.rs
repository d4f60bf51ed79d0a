use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Study { action } => commands::study::handle(&action, ctx, flags),
        Commands::Search(args) => commands::search::handle(&args, ctx, flags),
        Commands::Config { action } => commands::config::handle(&action, ctx, flags),
    }
}
