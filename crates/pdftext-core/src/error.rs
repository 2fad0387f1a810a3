//! Error types for the pdftext-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for a conversion batch.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Walking the input tree failed.
    #[error("failed to list PDFs under {}: {source}", path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input path exists but is not a directory.
    #[error("input path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// Reading a discovered PDF failed.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The PDF bytes could not be turned into page text.
    #[error("failed to extract text from {}: {source}", path.display())]
    Extraction {
        path: PathBuf,
        #[source]
        source: ExtractionError,
    },

    /// Creating or writing an output file failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Coarse error classes, as reported to callers that only care about the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Directory or file access failure.
    Io,
    /// Malformed or unsupported PDF content.
    Extraction,
    /// Invalid configuration.
    Config,
}

impl ConvertError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::Discovery { .. }
            | ConvertError::NotADirectory { .. }
            | ConvertError::Read { .. }
            | ConvertError::Write { .. } => ErrorKind::Io,
            ConvertError::Extraction { .. } => ErrorKind::Extraction,
            ConvertError::Config(_) => ErrorKind::Config,
        }
    }

    /// The file or directory the error is about, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            ConvertError::Discovery { path, .. }
            | ConvertError::NotADirectory { path }
            | ConvertError::Read { path, .. }
            | ConvertError::Extraction { path, .. }
            | ConvertError::Write { path, .. } => Some(path),
            ConvertError::Config(_) => None,
        }
    }
}

/// Errors produced while extracting page text from PDF bytes.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The bytes are not a parseable PDF document.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Page content could not be decoded into text.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be opened without a password.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The document has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Result type for the pdftext library.
pub type Result<T> = std::result::Result<T, ConvertError>;
