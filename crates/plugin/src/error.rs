//! Plugin error types.

/// Errors produced by plugin flows.
///
/// Display strings double as the detail part of user-facing failure
/// prompts, so wrapped errors pass through without extra prefixes.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Legendary(#[from] linjector_legendary::LegendaryError),

    #[error("{0}")]
    Archive(#[from] linjector_archive::ArchiveError),

    /// A game with this app name is already in the manifest.
    #[error("Game is already installed")]
    AlreadyInstalled(String),

    /// The manifest no longer contains the game a menu entry referred to.
    #[error("no installed game named {0}")]
    UnknownGame(String),

    #[error("background task failed: {0}")]
    Task(String),
}
