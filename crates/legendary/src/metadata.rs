//! Per-game metadata documents.
//!
//! Legendary keeps one JSON document per game under `metadata/`, named
//! `<app_name>.json`. The contents are opaque here: documents are copied
//! byte for byte, never parsed or rewritten.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{LegendaryError, LegendaryPaths};

/// Copies metadata documents in and out of Legendary's metadata directory.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    dir: PathBuf,
}

impl MetadataStore {
    /// Creates a store for the metadata directory under the given paths.
    pub fn new(paths: &LegendaryPaths) -> Self {
        Self {
            dir: paths.metadata_dir(),
        }
    }

    /// Creates a store over an explicit metadata directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the path of the metadata document for a game.
    pub fn path_for(&self, app_name: &str) -> PathBuf {
        self.dir.join(format!("{app_name}.json"))
    }

    /// Returns true if a metadata document exists for the game.
    pub fn exists(&self, app_name: &str) -> bool {
        self.path_for(app_name).exists()
    }

    /// Copies the game's metadata document to `dest`.
    pub fn copy_out(&self, app_name: &str, dest: &Path) -> Result<(), LegendaryError> {
        let src = self.path_for(app_name);
        if !src.exists() {
            return Err(LegendaryError::MetadataMissing(app_name.into()));
        }

        fs::copy(&src, dest)?;
        Ok(())
    }

    /// Copies `src` into the store as the game's metadata document, unless
    /// one already exists. The launcher's own document always wins; returns
    /// whether a copy happened.
    pub fn copy_in_if_absent(&self, app_name: &str, src: &Path) -> Result<bool, LegendaryError> {
        let dest = self.path_for(app_name);
        if dest.exists() {
            debug!(app_name, "metadata document already present, keeping it");
            return Ok(false);
        }

        fs::create_dir_all(&self.dir)?;
        fs::copy(src, &dest)?;
        info!(app_name, "published metadata document");
        Ok(true)
    }
}
