use clap::Subcommand;

/// Study configuration document commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print a configuration document, or one of its entries.
    Get {
        study: String,
        file: String,
        #[arg(long)]
        entry: Option<String>,
    },
    /// Write a new configuration document (never overwrites).
    Set {
        study: String,
        file: String,
        document: String,
    },
    /// Merge a JSON object into an existing configuration document.
    Update {
        study: String,
        file: String,
        patch: String,
        /// Do not snapshot the current document into backup/.
        #[arg(long)]
        no_backup: bool,
    },
}
