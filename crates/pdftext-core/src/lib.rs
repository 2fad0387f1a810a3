//! Core library for batch PDF to plain-text conversion.
//!
//! This crate provides:
//! - Recursive discovery of `.pdf` files under an input directory
//! - Per-page text extraction (lopdf, or pdf-extract as an alternative backend)
//! - A batch converter writing one flat `<stem>.txt` per PDF, with an explicit
//!   fail-fast or skip-and-report error policy

pub mod convert;
pub mod discovery;
pub mod error;
pub mod models;
pub mod pdf;

#[cfg(any(test, feature = "test-utils"))]
pub mod fixtures;

pub use convert::{ConvertEvent, Converter, ExtractedText, convert_all, output_path_for};
pub use discovery::list_pdfs;
pub use error::{ConvertError, ErrorKind, ExtractionError, Result};
pub use models::config::{ErrorPolicy, ExtractionBackend, PdfTextConfig};
pub use models::report::{BatchReport, FailureStage, FileFailure, FileOutcome};
pub use pdf::{PageExtractor, PageText, PdfExtractor};
