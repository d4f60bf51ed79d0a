use std::path::PathBuf;

use clap::Subcommand;

/// Study registry commands.
#[derive(Clone, Debug, Subcommand)]
pub enum StudyCommands {
    /// Create a study folder under ROOT and register it.
    Create { name: String, root: PathBuf },
    /// List registered study names.
    List,
    /// Show a study's registry record.
    Info { name: String },
    /// Delete a study's folder tree and registry entry.
    Delete {
        name: String,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Resolve a study subfolder, creating it with --force.
    Folder {
        name: String,
        folder: String,
        #[arg(long)]
        force: bool,
    },
    /// Store a metadata field (a JSON value) in a study's record.
    Tag {
        name: String,
        key: String,
        value: String,
    },
}
