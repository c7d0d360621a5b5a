//! Host application bridge.
//!
//! The launcher frontend hosting this plugin owns all UI and the game
//! library. [`Host`] is the narrow surface the flows need from it; the
//! host implements this trait, the plugin only consumes it.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

/// Capabilities the host application provides to the plugin.
pub trait Host: Send + Sync {
    /// Base directory where the host keeps game installations.
    fn game_dir(&self) -> PathBuf;

    /// Shows a progress message the user cannot dismiss.
    fn prompt_blocking(&self, message: &str);

    /// Shows a message the user can dismiss, replacing any blocking one.
    fn prompt_dismissible(&self, message: &str);

    /// Asks the user to choose a folder. Resolves to `None` on cancel.
    fn pick_folder(
        &self,
        title: &str,
        label: &str,
        action: &str,
    ) -> Pin<Box<dyn Future<Output = Option<PathBuf>> + Send + '_>>;

    /// Asks the user to choose a file. Resolves to `None` on cancel.
    fn pick_file(
        &self,
        title: &str,
        label: &str,
        action: &str,
    ) -> Pin<Box<dyn Future<Output = Option<PathBuf>> + Send + '_>>;

    /// Tells the host to re-scan its game library.
    fn reload_game_list(&self);
}
