//! PDF page text extraction using lopdf and pdf-extract.

use std::panic::{self, AssertUnwindSafe};

use lopdf::Document;
use tracing::{debug, trace};

use super::{PageExtractor, PageText, Result};
use crate::error::ExtractionError;
use crate::models::config::{ExtractionBackend, ExtractionConfig};

/// Production [`PageExtractor`] backed by lopdf, with pdf-extract as an alternative backend.
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor {
    config: ExtractionConfig,
}

/// A parsed document plus the bytes pdf-extract should read.
struct LoadedPdf {
    document: Document,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create an extractor with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with the given configuration.
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Set the extraction backend.
    pub fn with_backend(mut self, backend: ExtractionBackend) -> Self {
        self.config.backend = backend;
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    fn load(&self, data: &[u8]) -> Result<LoadedPdf> {
        let mut document =
            Document::load_mem(data).map_err(|e| ExtractionError::Parse(e.to_string()))?;

        // Only documents with an empty user password can be opened.
        let raw_data = if document.is_encrypted() {
            if !self.config.try_empty_password || document.decrypt("").is_err() {
                return Err(ExtractionError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            document
                .save_to(&mut decrypted)
                .map_err(|e| ExtractionError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = document.get_pages().len();
        if page_count == 0 {
            return Err(ExtractionError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        Ok(LoadedPdf { document, raw_data })
    }

    fn extract_with_lopdf(&self, pdf: &LoadedPdf) -> Result<Vec<PageText>> {
        let page_numbers: Vec<u32> = pdf.document.get_pages().keys().copied().collect();
        let mut pages = Vec::with_capacity(page_numbers.len());

        for number in page_numbers {
            let text = pdf
                .document
                .extract_text(&[number])
                .map_err(|e| ExtractionError::TextExtraction(format!("page {}: {}", number, e)))?;
            trace!("Page {}: {} chars", number, text.len());
            pages.push(PageText::new(number, text));
        }

        Ok(pages)
    }

    /// pdf-extract does not keep page boundaries, so the whole document comes back as page 1.
    fn extract_with_pdf_extract(&self, pdf: &LoadedPdf) -> Result<Vec<PageText>> {
        let raw_data = &pdf.raw_data;
        let text = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(raw_data)
        }))
        .map_err(|_| ExtractionError::TextExtraction("pdf-extract panicked".to_string()))?
        .map_err(|e| ExtractionError::TextExtraction(e.to_string()))?;

        Ok(vec![PageText::new(1, text)])
    }
}

impl PageExtractor for PdfExtractor {
    fn extract_pages(&self, data: &[u8]) -> Result<Vec<PageText>> {
        let pdf = self.load(data)?;

        let pages = match self.config.backend {
            ExtractionBackend::Lopdf => self.extract_with_lopdf(&pdf)?,
            ExtractionBackend::PdfExtract => self.extract_with_pdf_extract(&pdf)?,
        };

        debug!(
            "Extracted {} page texts ({} chars) with {:?}",
            pages.len(),
            pages.iter().map(|p| p.text.len()).sum::<usize>(),
            self.config.backend
        );
        Ok(pages)
    }
}
