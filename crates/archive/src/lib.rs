//! Portable game archives.
//!
//! A dumped game is a plain zip of its install directory plus two marker
//! entries: the sanitized game record and the launcher's metadata document.
//! Any zip carrying both markers can be installed, wherever it came from.
//!
//! Everything here is blocking; async callers run these functions on a
//! worker thread.

mod pack;
mod unpack;

pub use pack::{archive_file_name, create_archive, stage_markers};
pub use unpack::{extract_archive, validate_archive};

use linjector_legendary::LegendaryError;

/// Marker entry holding the sanitized game record.
pub const RECORD_MARKER: &str = "install.lin.json";

/// Marker entry holding the game's metadata document.
pub const METADATA_MARKER: &str = "meta.lin.json";

/// Errors produced while packing, validating or extracting archives.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Legendary(#[from] LegendaryError),

    /// Not a zip, or the marker entries are missing.
    #[error("{0}")]
    InvalidFormat(String),

    /// The zip container itself could not be read. The wrapped detail is
    /// for logs; users get the stable message.
    #[error("Zip file is seemingly corrupt or invalid")]
    Corrupt(String),

    /// The record marker was present but did not parse.
    #[error("invalid game record: {0}")]
    RecordCorrupt(serde_json::Error),
}

impl From<zip::result::ZipError> for ArchiveError {
    fn from(e: zip::result::ZipError) -> Self {
        match e {
            zip::result::ZipError::Io(io) => ArchiveError::Io(io),
            other => ArchiveError::Corrupt(other.to_string()),
        }
    }
}
