//! Dump and install flows.
//!
//! Each flow reloads the manifest before touching it, reports progress and
//! outcome through the host's prompts, and runs zip work on a blocking
//! worker. Errors are surfaced to the user here and never propagate out.

use std::fs;
use std::path::{Path, PathBuf};

use linjector_archive::{
    METADATA_MARKER, archive_file_name, create_archive, extract_archive, stage_markers,
    validate_archive,
};
use linjector_legendary::{
    InstalledGame, LegendaryPaths, Manifest, ManifestStore, MetadataStore,
};
use tokio::task;
use tracing::{debug, error, info, warn};

use crate::INSTALL_NAMESPACE;
use crate::commands::{MenuAction, MenuCommand};
use crate::error::PluginError;
use crate::host::Host;

/// The plugin's business logic: dumping installed games to portable
/// archives and installing archives back into the library.
///
/// The host is handed in per call, the same way it supplies pickers and
/// prompts to every plugin it loads.
pub struct Injector {
    manifest: ManifestStore,
    metadata: MetadataStore,
}

impl Injector {
    /// Creates an injector over the user's Legendary installation.
    pub fn new() -> Self {
        Self::with_paths(&LegendaryPaths::new())
    }

    /// Creates an injector over explicit Legendary paths.
    pub fn with_paths(paths: &LegendaryPaths) -> Self {
        Self {
            manifest: ManifestStore::new(paths),
            metadata: MetadataStore::new(paths),
        }
    }

    /// Returns the installed games, freshly loaded, sorted by display
    /// title for stable menu order.
    pub fn installed_games(&self) -> Result<Vec<InstalledGame>, PluginError> {
        let manifest = self.manifest.load()?;
        let mut games: Vec<InstalledGame> = manifest.into_values().collect();
        games.sort_by(|a, b| a.display_title().cmp(b.display_title()));
        Ok(games)
    }

    /// Builds the plugin's menu: one dump entry per installed game plus
    /// the install-from-zip entry.
    pub fn global_commands(&self) -> Result<Vec<MenuCommand>, PluginError> {
        let games = self.installed_games()?;
        let dump_children = games
            .iter()
            .map(|game| {
                MenuCommand::action(
                    game.display_title(),
                    MenuAction::DumpGame {
                        app_name: game.app_name.clone(),
                    },
                )
            })
            .collect();

        Ok(vec![
            MenuCommand::submenu("Dump Game", dump_children),
            MenuCommand::action("Install game via zip", MenuAction::InstallFromZip),
        ])
    }

    /// Runs a menu action to completion.
    ///
    /// Flows report their outcome through the host's prompts; errors never
    /// propagate out of here.
    pub async fn run(&self, host: &dyn Host, action: MenuAction) {
        match action {
            MenuAction::DumpGame { app_name } => self.dump_game(host, &app_name).await,
            MenuAction::InstallFromZip => self.install_from_zip(host).await,
        }
    }

    // -----------------------------------------------------------------------
    // Dump flow
    // -----------------------------------------------------------------------

    async fn dump_game(&self, host: &dyn Host, app_name: &str) {
        let game = match self.find_game(app_name) {
            Ok(game) => game,
            Err(e) => {
                error!(app_name, error = %e, "cannot dump game");
                host.prompt_dismissible(&format!("Failed to dump game: {e}"));
                return;
            }
        };

        let title = game.display_title().to_owned();
        let Some(dest_dir) = host
            .pick_folder(&format!("Dump {title} to?"), "Destination folder", "Dump")
            .await
        else {
            debug!(app_name, "dump cancelled");
            return;
        };

        host.prompt_blocking("Dumping game...");

        match self.dump_to(&game, &dest_dir).await {
            Ok(zip_name) => {
                info!(app_name, zip = %zip_name, dest = %dest_dir.display(), "dumped game");
                host.prompt_dismissible(&format!(
                    "Dumped {title} as {zip_name} in {}",
                    dest_dir.display()
                ));
            }
            Err(e) => {
                error!(app_name, error = %e, "dump failed");
                host.prompt_dismissible(&format!("Failed to dump game: {e}"));
            }
        }
    }

    /// Stages the markers inside the game's install directory and zips the
    /// directory into `dest_dir`. Returns the archive file name.
    async fn dump_to(&self, game: &InstalledGame, dest_dir: &Path) -> Result<String, PluginError> {
        let zip_name = archive_file_name(game);
        let dest_zip = dest_dir.join(&zip_name);
        let install_dir = PathBuf::from(&game.install_path);

        let record = game.clone();
        let metadata = self.metadata.clone();
        let work = task::spawn_blocking(move || {
            stage_markers(&install_dir, &record, &metadata)?;
            create_archive(&install_dir, &dest_zip)
        });

        match work.await {
            Ok(result) => result?,
            Err(e) => return Err(PluginError::Task(e.to_string())),
        }

        Ok(zip_name)
    }

    // -----------------------------------------------------------------------
    // Install flow
    // -----------------------------------------------------------------------

    async fn install_from_zip(&self, host: &dyn Host) {
        let Some(zip_path) = host
            .pick_file("Select a game zip", "Game Zip Path", "Extract")
            .await
        else {
            debug!("install cancelled");
            return;
        };

        host.prompt_blocking("Extracting...");

        let validate_path = zip_path.clone();
        let record = match task::spawn_blocking(move || validate_archive(&validate_path)).await {
            Ok(Ok(record)) => record,
            Ok(Err(e)) => {
                error!(zip = %zip_path.display(), error = %e, "archive validation failed");
                host.prompt_dismissible(&format!("Failed to validate zip: {e}"));
                return;
            }
            Err(e) => {
                error!(zip = %zip_path.display(), error = %e, "validation task failed");
                host.prompt_dismissible(&format!("Failed to validate zip: {e}"));
                return;
            }
        };

        let dest = host
            .game_dir()
            .join(INSTALL_NAMESPACE)
            .join(&record.app_name);

        match self.install_to(&record, &zip_path, &dest).await {
            Ok(()) => {
                info!(app_name = %record.app_name, dest = %dest.display(), "installed game");
                host.reload_game_list();
                host.prompt_dismissible(&format!("Added {} to library", record.display_title()));
            }
            Err(e @ PluginError::AlreadyInstalled(_)) => {
                info!(app_name = %record.app_name, "install rejected");
                host.prompt_dismissible(&e.to_string());
            }
            Err(e) => {
                error!(app_name = %record.app_name, error = %e, "install failed");
                host.prompt_dismissible(&format!("Failed to extract zip: {e}"));
            }
        }
    }

    /// Installs a validated archive: extract, publish metadata, then
    /// register the game in the manifest.
    ///
    /// The manifest is written last, so no failure can leave a registered
    /// game without files on disk. A partially extracted destination is
    /// removed on failure.
    async fn install_to(
        &self,
        record: &InstalledGame,
        zip_path: &Path,
        dest: &Path,
    ) -> Result<(), PluginError> {
        let mut manifest = self.manifest.load()?;
        if manifest.contains_key(&record.app_name) {
            return Err(PluginError::AlreadyInstalled(record.app_name.clone()));
        }

        fs::create_dir_all(dest)?;

        let result = self
            .populate_install(&mut manifest, record.clone(), zip_path, dest)
            .await;
        if result.is_err() {
            remove_partial_install(dest);
        }
        result
    }

    async fn populate_install(
        &self,
        manifest: &mut Manifest,
        mut record: InstalledGame,
        zip_path: &Path,
        dest: &Path,
    ) -> Result<(), PluginError> {
        let zip = zip_path.to_path_buf();
        let target = dest.to_path_buf();
        match task::spawn_blocking(move || extract_archive(&zip, &target)).await {
            Ok(result) => result?,
            Err(e) => return Err(PluginError::Task(e.to_string())),
        }

        self.metadata
            .copy_in_if_absent(&record.app_name, &dest.join(METADATA_MARKER))?;

        record.install_path = dest.display().to_string();
        manifest.insert(record.app_name.clone(), record);
        self.manifest.save(manifest)?;
        Ok(())
    }

    /// Looks the game up in a fresh manifest so a stale menu entry cannot
    /// dump outdated state.
    fn find_game(&self, app_name: &str) -> Result<InstalledGame, PluginError> {
        let mut manifest = self.manifest.load()?;
        manifest
            .remove(app_name)
            .ok_or_else(|| PluginError::UnknownGame(app_name.into()))
    }
}

impl Default for Injector {
    fn default() -> Self {
        Self::new()
    }
}

fn remove_partial_install(dest: &Path) {
    if let Err(e) = fs::remove_dir_all(dest)
        && e.kind() != std::io::ErrorKind::NotFound
    {
        warn!(dest = %dest.display(), error = %e, "failed to clean up partial install");
    }
}
