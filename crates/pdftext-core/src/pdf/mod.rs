//! PDF text extraction.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::ExtractionError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Text content of a single PDF page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text. Empty for blank or image-only pages.
    pub text: String,
}

impl PageText {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Turns raw PDF bytes into per-page text.
pub trait PageExtractor {
    /// Extract every page's text, in physical page order.
    ///
    /// Either all pages are returned or the whole document fails.
    fn extract_pages(&self, data: &[u8]) -> Result<Vec<PageText>>;
}

impl<T: PageExtractor + ?Sized> PageExtractor for &T {
    fn extract_pages(&self, data: &[u8]) -> Result<Vec<PageText>> {
        (**self).extract_pages(data)
    }
}

impl<T: PageExtractor + ?Sized> PageExtractor for Box<T> {
    fn extract_pages(&self, data: &[u8]) -> Result<Vec<PageText>> {
        (**self).extract_pages(data)
    }
}

/// Concatenate page text in page order with nothing in between.
pub fn merge_pages(pages: &[PageText]) -> String {
    let mut merged = String::with_capacity(pages.iter().map(|p| p.text.len()).sum());
    for page in pages {
        merged.push_str(&page.text);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merge_pages_has_no_separator() {
        let pages = vec![
            PageText::new(1, "first"),
            PageText::new(2, ""),
            PageText::new(3, "second\n"),
            PageText::new(4, "third"),
        ];
        assert_eq!(merge_pages(&pages), "firstsecond\nthird");
    }

    #[test]
    fn test_merge_no_pages() {
        assert_eq!(merge_pages(&[]), "");
    }
}
