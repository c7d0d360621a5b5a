//! Building portable game archives.
//!
//! Packing a game means staging the two marker files inside its install
//! directory, then zipping the whole directory. The markers travel with the
//! game files, so the resulting zip is self-describing.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use linjector_legendary::{InstalledGame, MetadataStore};
use tracing::{debug, info, warn};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::{ArchiveError, METADATA_MARKER, RECORD_MARKER};

/// Writes the marker files for a game into its install directory.
///
/// The record marker holds a sanitized copy of `record`; the caller's
/// record is not modified. A stale metadata marker from an earlier dump is
/// removed before the current document is copied in, so the archive always
/// carries the launcher's present metadata.
pub fn stage_markers(
    install_dir: &Path,
    record: &InstalledGame,
    metadata: &MetadataStore,
) -> Result<(), ArchiveError> {
    let record_path = install_dir.join(RECORD_MARKER);
    fs::write(&record_path, serde_json::to_vec(&record.sanitized())?)?;

    let meta_path = install_dir.join(METADATA_MARKER);
    if let Err(e) = fs::remove_file(&meta_path)
        && e.kind() != std::io::ErrorKind::NotFound
    {
        return Err(e.into());
    }
    metadata.copy_out(&record.app_name, &meta_path)?;

    debug!(app_name = %record.app_name, dir = %install_dir.display(), "staged archive markers");
    Ok(())
}

/// Returns the zip file name for a game: `<title>.zip`, or
/// `<app_name>.zip` when the title is empty or not a portable file name.
pub fn archive_file_name(record: &InstalledGame) -> String {
    let title = record.title.trim();
    if title.is_empty() || title.chars().any(is_illegal_in_file_name) {
        format!("{}.zip", record.app_name)
    } else {
        format!("{title}.zip")
    }
}

/// Characters that cannot appear in a file name on every supported OS.
///
/// The Windows set, applied everywhere: an archive dumped on Linux must
/// still be a valid file name on Windows.
pub(crate) fn is_illegal_in_file_name(c: char) -> bool {
    matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') || c.is_control()
}

/// Zips the full contents of `src_dir` into `dest_zip`.
///
/// Entry names are relative to `src_dir` with `/` separators. Directories
/// get their own entries, so empty ones survive the trip. A half-written
/// zip left by a failure is removed.
pub fn create_archive(src_dir: &Path, dest_zip: &Path) -> Result<(), ArchiveError> {
    let result = write_archive(src_dir, dest_zip);
    if result.is_err()
        && let Err(e) = fs::remove_file(dest_zip)
        && e.kind() != std::io::ErrorKind::NotFound
    {
        warn!(path = %dest_zip.display(), error = %e, "failed to remove partial archive");
    }
    result
}

fn write_archive(src_dir: &Path, dest_zip: &Path) -> Result<(), ArchiveError> {
    let file = File::create(dest_zip)?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    add_dir(&mut zip, src_dir, src_dir, options)?;

    zip.finish()?.flush()?;

    info!(src = %src_dir.display(), dest = %dest_zip.display(), "created archive");
    Ok(())
}

fn add_dir(
    zip: &mut ZipWriter<BufWriter<File>>,
    root: &Path,
    current: &Path,
    options: SimpleFileOptions,
) -> Result<(), ArchiveError> {
    let entries = fs::read_dir(current)?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        // fs::metadata follows symlinks; linked content is archived as
        // regular files and directories.
        let metadata = fs::metadata(&path)?;

        let rel_path = path.strip_prefix(root).map_err(std::io::Error::other)?;
        let rel_str = rel_path.to_string_lossy().replace('\\', "/");

        if metadata.is_dir() {
            zip.add_directory(rel_str, options)?;
            add_dir(zip, root, &path, options)?;
        } else if metadata.is_file() {
            let mut opts = options.large_file(metadata.len() >= u64::from(u32::MAX));
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                opts = opts.unix_permissions(metadata.permissions().mode());
            }

            zip.start_file(rel_str, opts)?;
            let mut f = File::open(&path)?;
            std::io::copy(&mut f, zip)?;
        }
    }

    Ok(())
}
