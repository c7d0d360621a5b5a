//! Legendary directory layout.

use std::path::PathBuf;

const CONFIG_DIR: &str = ".config/legendary";
const INSTALLED_FILE: &str = "installed.json";
const METADATA_DIR: &str = "metadata";

/// Provides access to Legendary's config directory paths.
///
/// Legendary uses `~/.config/legendary` on every platform, so there is no
/// per-OS detection beyond resolving the home directory.
#[derive(Debug, Clone)]
pub struct LegendaryPaths {
    config_dir: PathBuf,
}

impl LegendaryPaths {
    /// Creates a new `LegendaryPaths` rooted at the user's home directory.
    pub fn new() -> Self {
        Self {
            config_dir: home_dir().join(CONFIG_DIR),
        }
    }

    /// Creates a new `LegendaryPaths` with a custom config directory.
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Returns the Legendary config directory.
    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    /// Returns the path to `installed.json`.
    pub fn installed_manifest_path(&self) -> PathBuf {
        self.config_dir.join(INSTALLED_FILE)
    }

    /// Returns the per-game metadata directory.
    pub fn metadata_dir(&self) -> PathBuf {
        self.config_dir.join(METADATA_DIR)
    }
}

impl Default for LegendaryPaths {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the user's home directory.
///
/// `USERPROFILE` covers Windows, where `HOME` is usually unset.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
}
