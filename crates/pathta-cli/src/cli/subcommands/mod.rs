mod config;
mod study;

pub use config::ConfigCommands;
pub use study::StudyCommands;
