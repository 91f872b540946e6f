//! Error types for pdf2dxf library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdf2dxf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input document does not exist.
    #[error("Source document not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The input is not a recognized decoded page dump.
    #[error("Unknown source format: expected a decoded page dump")]
    UnknownFormat,

    /// The input is recognized but cannot be decoded by this crate.
    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),

    /// The decoded page dump is malformed.
    #[error("Source decoding error: {0}")]
    Decode(String),

    /// After dropping out-of-range indices no page is left to convert.
    #[error("No valid pages to convert ({requested} requested, document has {page_count} pages)")]
    NoValidPages {
        /// Number of indices requested by the caller
        requested: usize,
        /// Number of pages in the source document
        page_count: usize,
    },

    /// Invalid page list string.
    #[error("Invalid page list: {0}")]
    InvalidPageList(String),

    /// Error raised by the DXF backend.
    #[error("DXF error: {0}")]
    Dxf(String),

    /// Error while rendering an output file (JSON dump, etc.).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Writing a planned output file failed.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        /// Target path of the failed file
        path: PathBuf,
        /// Underlying failure
        source: Box<Error>,
    },

    /// No writer is registered for the output extension.
    #[error("No writer for extension: {0}")]
    NoWriter(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wrap an error as a write failure for `path`.
    pub fn write_failed(path: impl Into<PathBuf>, source: Error) -> Self {
        Error::Write {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Io => Error::Io(err.into()),
            _ => Error::Decode(err.to_string()),
        }
    }
}

impl From<dxf::DxfError> for Error {
    fn from(err: dxf::DxfError) -> Self {
        Error::Dxf(err.to_string())
    }
}
