//! Installed game records.
//!
//! One record per game, exactly as Legendary stores them in
//! `installed.json`. The launcher is the authority on this format: field
//! names are its snake_case keys, and fields this crate does not know about
//! are carried through `extra` so a load/save cycle never drops them.

use serde::{Deserialize, Serialize};

/// A single entry of Legendary's `installed.json`.
///
/// Every field except `app_name` is tolerated missing on the wire and
/// filled with a default, so partially populated records (as produced by
/// older tools) still parse. `install_path`, `manifest_path` and
/// `save_path` are machine-specific and meaningless on another system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstalledGame {
    pub app_name: String,
    #[serde(default)]
    pub base_urls: Vec<String>,
    #[serde(default)]
    pub can_run_offline: bool,
    #[serde(default)]
    pub egl_guid: String,
    #[serde(default)]
    pub executable: String,
    #[serde(default)]
    pub install_path: String,
    #[serde(default)]
    pub install_size: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_tags: Option<Vec<String>>,
    #[serde(default)]
    pub is_dlc: bool,
    #[serde(default)]
    pub launch_parameters: String,
    #[serde(default)]
    pub manifest_path: String,
    #[serde(default)]
    pub needs_verification: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Opaque prerequisite blob; written back verbatim.
    #[serde(default)]
    pub prereq_info: serde_json::Value,
    #[serde(default)]
    pub requires_ot: bool,
    /// Opaque cloud-save blob. Serialized as `null` when absent, which is
    /// what Legendary writes for games without cloud saves.
    #[serde(default)]
    pub save_path: Option<serde_json::Value>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: String,
    /// Fields Legendary knows about and this crate does not.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl InstalledGame {
    /// Returns a copy stripped of machine-specific state, suitable for
    /// embedding in a portable archive. `install_path` becomes empty and
    /// `save_path` becomes `null`; the receiving side fills in its own.
    pub fn sanitized(&self) -> Self {
        let mut copy = self.clone();
        copy.install_path = String::new();
        copy.save_path = None;
        copy
    }

    /// Title to show users, falling back to the app name when empty.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.app_name
        } else {
            &self.title
        }
    }
}
