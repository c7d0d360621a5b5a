//! Legendary launcher state.
//!
//! Reads and writes the files Legendary keeps under `~/.config/legendary`:
//! the `installed.json` manifest of installed games and the per-game
//! metadata documents under `metadata/`. Legendary itself owns these files,
//! so record field names and file layouts match the launcher byte for byte.

mod manifest;
mod metadata;
mod paths;
mod record;

pub use manifest::{Manifest, ManifestStore};
pub use metadata::MetadataStore;
pub use paths::LegendaryPaths;
pub use record::InstalledGame;

/// Errors produced by the legendary crate.
#[derive(Debug, thiserror::Error)]
pub enum LegendaryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupt manifest at {path}: {source}")]
    ManifestCorrupt {
        path: String,
        source: serde_json::Error,
    },

    #[error("no metadata document for {0}")]
    MetadataMissing(String),
}
