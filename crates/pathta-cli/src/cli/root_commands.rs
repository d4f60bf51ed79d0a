use clap::{Args, Subcommand};

use crate::cli::subcommands::{ConfigCommands, StudyCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Study registry and folder management.
    Study {
        #[command(subcommand)]
        action: StudyCommands,
    },
    /// Find entries in a study folder by name fragments.
    Search(SearchArgs),
    /// JSON configuration documents under a study's config folder.
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    /// Registered study name.
    pub study: String,
    /// Name fragments to match (all of them unless --union).
    pub patterns: Vec<String>,
    /// Subfolder to search instead of the study root.
    #[arg(long)]
    pub folder: Option<String>,
    #[arg(long)]
    pub ignore_case: bool,
    /// Keep names matching any pattern instead of all of them.
    #[arg(long)]
    pub union: bool,
    /// Print bare names instead of full paths.
    #[arg(long)]
    pub name_only: bool,
    #[arg(long)]
    pub no_sort: bool,
    /// Exact names to drop (repeatable).
    #[arg(long)]
    pub exclude: Vec<String>,
    /// Split results into N chunks (-1 for one chunk per file).
    #[arg(long, allow_negative_numbers = true)]
    pub split: Option<i64>,
    /// Require exactly one match and print it.
    #[arg(long)]
    pub single: bool,
}
