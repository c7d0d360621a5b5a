//! Archive validation and extraction.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use linjector_legendary::InstalledGame;
use tracing::{debug, info};
use zip::ZipArchive;

use crate::{ArchiveError, METADATA_MARKER, RECORD_MARKER, pack};

/// Checks that `path` holds an installable game archive and returns the
/// embedded record.
///
/// Required: a `.zip` extension, a metadata marker, and a record marker
/// that parses. Markers are matched by entry base name, wherever they sit
/// in the archive's directory structure. Nothing is written to disk.
pub fn validate_archive(path: &Path) -> Result<InstalledGame, ArchiveError> {
    let is_zip = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"));
    if !is_zip {
        return Err(ArchiveError::InvalidFormat("File is not a zip file".into()));
    }

    let mut archive = ZipArchive::new(BufReader::new(File::open(path)?))?;

    if find_entry(&archive, METADATA_MARKER).is_none() {
        return Err(ArchiveError::InvalidFormat(
            "Zip seemingly is not a valid Legendary Injector zip".into(),
        ));
    }

    let Some(record_entry) = find_entry(&archive, RECORD_MARKER) else {
        return Err(ArchiveError::InvalidFormat(
            "Zip seemingly is not a valid Legendary Injector zip".into(),
        ));
    };

    let mut text = String::new();
    archive.by_name(&record_entry)?.read_to_string(&mut text)?;
    let record: InstalledGame = serde_json::from_str(&text).map_err(ArchiveError::RecordCorrupt)?;

    // The app name becomes a path component under the install namespace
    // and the metadata store, so names from untrusted archives must be a
    // single well-formed file name.
    if !safe_app_name(&record.app_name) {
        return Err(ArchiveError::InvalidFormat(format!(
            "unsafe app name in game record: {:?}",
            record.app_name
        )));
    }

    debug!(zip = %path.display(), app_name = %record.app_name, "validated archive");
    Ok(record)
}

/// Extracts the full archive into `dest`.
///
/// Path handling is the zip crate's, which refuses entries that would
/// escape `dest` and restores unix permissions where recorded.
pub fn extract_archive(path: &Path, dest: &Path) -> Result<(), ArchiveError> {
    let mut archive = ZipArchive::new(BufReader::new(File::open(path)?))?;
    archive.extract(dest)?;

    info!(zip = %path.display(), dest = %dest.display(), "extracted archive");
    Ok(())
}

/// Finds an entry whose base name matches, ignoring directory structure.
fn find_entry<R: Read + Seek>(archive: &ZipArchive<R>, base_name: &str) -> Option<String> {
    archive
        .file_names()
        .find(|name| entry_base_name(name) == base_name)
        .map(str::to_owned)
}

/// Returns the file-name portion of a zip entry name.
///
/// Entry names use either separator depending on the tool that wrote the
/// archive. Directory entries end in a separator and so have an empty
/// base name.
fn entry_base_name(name: &str) -> &str {
    match name.rfind(['/', '\\']) {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}

fn safe_app_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.chars().any(pack::is_illegal_in_file_name)
}
