/// Subfolders created under every study root, in creation order.
pub const TAXONOMY: [&str; 13] = [
    "config",
    "database",
    "feature",
    "classified",
    "multifeature",
    "figure",
    "backup",
    "anatomy",
    "setting",
    "other",
    "script",
    "xyz",
    "channels",
];

/// Folder holding JSON configuration documents.
pub const CONFIG_FOLDER: &str = "config";

/// Default target for configuration backups.
pub const BACKUP_FOLDER: &str = "backup";

/// Scratch folder for runtime history. Not part of the taxonomy; created on demand.
pub const CACHE_FOLDER: &str = "cache";

/// Folder for user scripts.
pub const SCRIPT_FOLDER: &str = "script";
