//! Error types for pdf-outline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdf-outline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting or writing an outline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input files or listing directories.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// The document yielded no usable text fragments.
    #[error("Document has no extractable text")]
    EmptyDocument,

    /// The outline artifact could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON serialization failed.
    #[error("JSON serialization error: {0}")]
    Serialize(String),

    /// An outline JSON document does not have the expected shape.
    #[error("Invalid outline: {0}")]
    InvalidOutline(String),
}

/// Closed classification of per-document failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The document could not be opened or parsed.
    Open,
    /// The document opened but produced no text fragments.
    EmptyDocument,
    /// The output artifact could not be produced or written.
    Write,
}

impl Error {
    /// Classify this error for batch reporting.
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::EmptyDocument => FailureKind::EmptyDocument,
            Error::Write { .. } | Error::Serialize(_) | Error::InvalidOutline(_) => {
                FailureKind::Write
            }
            Error::Io(_)
            | Error::UnknownFormat
            | Error::UnsupportedVersion(_)
            | Error::PdfParse(_)
            | Error::Encrypted
            | Error::PageOutOfRange(..) => FailureKind::Open,
        }
    }

    /// Whether the pipeline degrades this error to an empty outline.
    pub fn degrades_to_empty(&self) -> bool {
        matches!(self.kind(), FailureKind::Open | FailureKind::EmptyDocument)
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}
