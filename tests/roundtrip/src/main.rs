fn main() {
    println!("Run `cargo test -p roundtrip` to execute manifest and archive roundtrip tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::future::Future;
    use std::io::{BufReader, Read};
    use std::path::{Path, PathBuf};
    use std::pin::Pin;
    use std::sync::Mutex;

    use linjector_archive::{METADATA_MARKER, RECORD_MARKER};
    use linjector_legendary::{
        InstalledGame, LegendaryPaths, Manifest, ManifestStore, MetadataStore,
    };
    use linjector_plugin::{Host, INSTALL_NAMESPACE, Injector, MenuAction};
    use tempfile::TempDir;

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    // --- Manifest wire format ---

    #[test]
    fn fixture_installed_manifest_roundtrip() {
        let fixture = load_fixture("installed.json");
        let manifest: Manifest = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize installed.json: {e}"));
        let reserialized = serde_json::to_value(&manifest)
            .unwrap_or_else(|e| panic!("failed to re-serialize installed.json: {e}"));

        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch:\n  launcher: {fixture}\n  ours:     {reserialized}"
        );
    }

    #[test]
    fn fixture_unknown_fields_survive() {
        let manifest: Manifest = serde_json::from_value(load_fixture("installed.json")).unwrap();

        // Fields this crate does not model ride along in the extras map.
        assert_eq!(manifest["Min"].extra["sync_saves"], serde_json::json!(true));
        assert!(manifest["Moria"].extra.contains_key("launch_env"));

        let reserialized = serde_json::to_value(&manifest).unwrap();
        assert_eq!(reserialized["Min"]["sync_saves"], serde_json::json!(true));
    }

    #[test]
    fn partial_record_fills_defaults() {
        // The launcher config can hold entries with most fields missing;
        // loading must not reject them.
        let json = r#"{
            "Partial": {
                "app_name": "Partial",
                "install_path": "/tmp/partial",
                "title": "Partially Known"
            }
        }"#;
        let manifest: Manifest = serde_json::from_str(json).unwrap();
        let game = &manifest["Partial"];
        assert_eq!(game.install_size, 0);
        assert!(!game.can_run_offline);
        assert!(game.platform.is_none());
        assert!(game.install_tags.is_none());
        assert!(game.base_urls.is_empty());
        assert_eq!(game.version, "");

        // Optional object fields write null, absent optionals stay absent.
        let reserialized = serde_json::to_value(&manifest).unwrap();
        assert_eq!(reserialized["Partial"]["save_path"], serde_json::Value::Null);
        assert!(reserialized["Partial"].get("platform").is_none());
    }

    // --- Dump and install roundtrip ---

    /// Minimal host backed by canned picker results.
    struct TestHost {
        game_dir: PathBuf,
        folder_pick: Option<PathBuf>,
        file_pick: Option<PathBuf>,
        messages: Mutex<Vec<String>>,
    }

    impl TestHost {
        fn new(game_dir: &Path) -> Self {
            Self {
                game_dir: game_dir.to_path_buf(),
                folder_pick: None,
                file_pick: None,
                messages: Mutex::new(Vec::new()),
            }
        }

        fn last_message(&self) -> String {
            self.messages.lock().unwrap().last().unwrap().clone()
        }
    }

    impl Host for TestHost {
        fn game_dir(&self) -> PathBuf {
            self.game_dir.clone()
        }

        fn prompt_blocking(&self, _message: &str) {}

        fn prompt_dismissible(&self, message: &str) {
            self.messages.lock().unwrap().push(message.into());
        }

        fn pick_folder(
            &self,
            _title: &str,
            _label: &str,
            _action: &str,
        ) -> Pin<Box<dyn Future<Output = Option<PathBuf>> + Send + '_>> {
            let pick = self.folder_pick.clone();
            Box::pin(async move { pick })
        }

        fn pick_file(
            &self,
            _title: &str,
            _label: &str,
            _action: &str,
        ) -> Pin<Box<dyn Future<Output = Option<PathBuf>> + Send + '_>> {
            let pick = self.file_pick.clone();
            Box::pin(async move { pick })
        }

        fn reload_game_list(&self) {}
    }

    const METADATA_DOC: &[u8] = br#"{"app_name":"Min","app_title":"Hades","asset_infos":{}}"#;

    /// Seeds a launcher config dir with one installed game and returns its
    /// record. The install tree lives under `games_dir`.
    fn seed_source(
        paths: &LegendaryPaths,
        games_dir: &Path,
        app_name: &str,
        title: &str,
    ) -> InstalledGame {
        let install_dir = games_dir.join(app_name);
        fs::create_dir_all(install_dir.join("Content")).unwrap();
        fs::write(install_dir.join("Hades.exe"), b"EXE").unwrap();
        fs::write(install_dir.join("Content").join("data.pak"), b"PAK").unwrap();

        let game: InstalledGame = serde_json::from_value(serde_json::json!({
            "app_name": app_name,
            "base_urls": ["https://epicgames-download1.akamaized.net/Builds/default"],
            "can_run_offline": true,
            "executable": "Hades.exe",
            "install_path": install_dir.to_str().unwrap(),
            "install_size": 7359975424_i64,
            "platform": "Windows",
            "save_path": "{UserSavedGames}/Hades",
            "title": title,
            "version": "1.38290",
        }))
        .unwrap();

        let store = ManifestStore::new(paths);
        let mut manifest = store.load().unwrap();
        manifest.insert(app_name.into(), game.clone());
        store.save(&manifest).unwrap();

        fs::create_dir_all(paths.metadata_dir()).unwrap();
        fs::write(
            paths.metadata_dir().join(format!("{app_name}.json")),
            METADATA_DOC,
        )
        .unwrap();

        game
    }

    async fn dump(paths: &LegendaryPaths, games_dir: &Path, out: &Path, app_name: &str) -> TestHost {
        fs::create_dir_all(out).unwrap();
        let mut host = TestHost::new(games_dir);
        host.folder_pick = Some(out.to_path_buf());
        Injector::with_paths(paths)
            .run(
                &host,
                MenuAction::DumpGame {
                    app_name: app_name.into(),
                },
            )
            .await;
        host
    }

    #[tokio::test]
    async fn dump_then_install_preserves_record() {
        let tmp = TempDir::new().unwrap();
        let source = LegendaryPaths::with_config_dir(tmp.path().join("source/legendary"));
        let source_games = tmp.path().join("source/games");
        let game = seed_source(&source, &source_games, "Min", "Hades");

        let out = tmp.path().join("out");
        let host = dump(&source, &source_games, &out, "Min").await;
        let zip_path = out.join("Hades.zip");
        assert!(zip_path.exists(), "dump failed: {}", host.last_message());

        // Install the dumped zip into a second, empty launcher setup.
        let target = LegendaryPaths::with_config_dir(tmp.path().join("target/legendary"));
        let target_games = tmp.path().join("target/games");
        let mut host = TestHost::new(&target_games);
        host.file_pick = Some(zip_path);
        Injector::with_paths(&target)
            .run(&host, MenuAction::InstallFromZip)
            .await;
        assert_eq!(host.last_message(), "Added Hades to library");

        // The installed record matches the dumped one except for the
        // machine-local install path.
        let dest = target_games.join(INSTALL_NAMESPACE).join("Min");
        let mut expected = game.sanitized();
        expected.install_path = dest.display().to_string();
        let manifest = ManifestStore::new(&target).load().unwrap();
        assert_eq!(manifest["Min"], expected);

        // Game files and the metadata document made the trip too.
        assert_eq!(fs::read(dest.join("Hades.exe")).unwrap(), b"EXE");
        assert_eq!(
            fs::read(dest.join("Content").join("data.pak")).unwrap(),
            b"PAK"
        );
        assert!(dest.join(RECORD_MARKER).exists());
        assert_eq!(
            fs::read(target.metadata_dir().join("Min.json")).unwrap(),
            METADATA_DOC
        );
    }

    #[tokio::test]
    async fn dumped_zip_embeds_sanitized_record_and_metadata() {
        let tmp = TempDir::new().unwrap();
        let source = LegendaryPaths::with_config_dir(tmp.path().join("legendary"));
        let source_games = tmp.path().join("games");
        seed_source(&source, &source_games, "Min", "Hades");

        let out = tmp.path().join("out");
        dump(&source, &source_games, &out, "Min").await;

        let file = fs::File::open(out.join("Hades.zip")).unwrap();
        let mut archive = zip::ZipArchive::new(BufReader::new(file)).unwrap();

        let mut record_json = String::new();
        archive
            .by_name(RECORD_MARKER)
            .unwrap()
            .read_to_string(&mut record_json)
            .unwrap();
        let record: InstalledGame = serde_json::from_str(&record_json).unwrap();
        assert_eq!(record.app_name, "Min");
        assert_eq!(record.install_path, "");
        assert!(record.save_path.is_none());

        let mut metadata = Vec::new();
        archive
            .by_name(METADATA_MARKER)
            .unwrap()
            .read_to_end(&mut metadata)
            .unwrap();
        assert_eq!(metadata, METADATA_DOC);

        assert!(archive.by_name("Content/data.pak").is_ok());
    }

    #[tokio::test]
    async fn illegal_title_falls_back_to_app_name() {
        let tmp = TempDir::new().unwrap();
        let source = LegendaryPaths::with_config_dir(tmp.path().join("legendary"));
        let source_games = tmp.path().join("games");
        seed_source(
            &source,
            &source_games,
            "Moria",
            "Lord of the Rings: Return to Moria",
        );

        let out = tmp.path().join("out");
        let host = dump(&source, &source_games, &out, "Moria").await;

        // The colon cannot appear in a file name everywhere the zip may
        // travel, so the archive is named after the app instead.
        assert!(out.join("Moria.zip").exists());
        assert_eq!(
            host.last_message(),
            format!(
                "Dumped Lord of the Rings: Return to Moria as Moria.zip in {}",
                out.display()
            )
        );
    }

    #[tokio::test]
    async fn reinstall_on_same_machine_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let source = LegendaryPaths::with_config_dir(tmp.path().join("legendary"));
        let source_games = tmp.path().join("games");
        seed_source(&source, &source_games, "Min", "Hades");

        let out = tmp.path().join("out");
        dump(&source, &source_games, &out, "Min").await;

        // Installing back into the launcher setup that dumped it: the game
        // is still registered there.
        let mut host = TestHost::new(&source_games);
        host.file_pick = Some(out.join("Hades.zip"));
        Injector::with_paths(&source)
            .run(&host, MenuAction::InstallFromZip)
            .await;

        assert_eq!(host.last_message(), "Game is already installed");
        assert!(!source_games.join(INSTALL_NAMESPACE).exists());
    }
}
