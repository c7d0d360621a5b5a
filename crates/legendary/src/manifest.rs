//! The `installed.json` manifest.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{InstalledGame, LegendaryError, LegendaryPaths};

/// Mapping of app name to installed game record.
///
/// A `BTreeMap` keeps the serialized manifest deterministically ordered.
pub type Manifest = BTreeMap<String, InstalledGame>;

/// Reads and writes Legendary's `installed.json`.
///
/// The store keeps no cache: callers reload before every operation so a
/// manifest edited by the launcher in the meantime is picked up. Writers
/// are not coordinated across processes; Legendary itself must not be
/// mid-operation while the manifest is rewritten.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    path: PathBuf,
}

impl ManifestStore {
    /// Creates a store for the manifest under the given Legendary paths.
    pub fn new(paths: &LegendaryPaths) -> Self {
        Self {
            path: paths.installed_manifest_path(),
        }
    }

    /// Creates a store reading and writing an explicit manifest file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the manifest file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Loads the manifest from disk.
    ///
    /// A missing file is an empty manifest, not an error: Legendary only
    /// creates `installed.json` once the first game is installed.
    pub fn load(&self) -> Result<Manifest, LegendaryError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no manifest file, starting empty");
            return Ok(Manifest::new());
        }

        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|source| LegendaryError::ManifestCorrupt {
            path: self.path.display().to_string(),
            source,
        })
    }

    /// Writes the full manifest, replacing the previous file.
    ///
    /// The content lands in a temp file first and is renamed over the
    /// target, so a crash mid-write cannot leave a truncated manifest.
    /// Output is compact JSON, the format the launcher reads back.
    pub fn save(&self, manifest: &Manifest) -> Result<(), LegendaryError> {
        let parent = self.path.parent().unwrap_or(Path::new("."));
        fs::create_dir_all(parent)?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        tmp.write_all(&serde_json::to_vec(manifest)?)?;
        tmp.persist(&self.path).map_err(|e| LegendaryError::Io(e.error))?;

        info!(path = %self.path.display(), entries = manifest.len(), "wrote manifest");
        Ok(())
    }
}
