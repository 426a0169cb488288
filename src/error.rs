//! Crate-level error type for archive and document operations.

use std::path::PathBuf;

/// Errors that can occur while opening or writing an MVR archive.
///
/// Field-level leniency is deliberate and not represented here: malformed
/// optional values inside the XML fall back to their defaults during
/// construction instead of surfacing an error. Only the inability to locate
/// or decode the archive and its root XML payload is fatal.
#[derive(Debug, thiserror::Error)]
pub enum MvrError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML parsing or writing error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The archive is readable but does not contain the required entry
    #[error("archive {archive} has no entry named {entry}")]
    MissingEntry {
        /// Path of the archive that was opened
        archive: PathBuf,
        /// Name of the entry that could not be found
        entry: String,
    },

    /// The root XML payload could not be decoded
    #[error("invalid scene description: {0}")]
    InvalidDocument(String),
}
