//! Configuration structures for the conversion pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};

/// Main configuration for pdftext.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfTextConfig {
    /// Batch behaviour.
    pub conversion: ConversionConfig,

    /// Input tree traversal.
    pub discovery: DiscoveryConfig,

    /// PDF text extraction.
    pub extraction: ExtractionConfig,
}

/// What to do when a single PDF cannot be read or extracted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Abort the batch on the first failing file.
    #[default]
    FailFast,
    /// Record the failure in the batch report and continue.
    SkipAndReport,
}

/// Batch configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Handling of per-file read and extraction failures.
    /// Output write failures always abort the batch.
    pub error_policy: ErrorPolicy,
}

/// Directory traversal configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Visit directory entries sorted by file name.
    pub sorted: bool,

    /// Descend into symlinked directories.
    pub follow_links: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            sorted: true,
            follow_links: false,
        }
    }
}

/// Text extraction backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionBackend {
    /// Page-by-page extraction with lopdf.
    #[default]
    Lopdf,
    /// Whole-document extraction with pdf-extract.
    PdfExtract,
}

/// PDF extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Backend used to decode page text.
    pub backend: ExtractionBackend,

    /// Open encrypted documents that only carry an empty user password.
    pub try_empty_password: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            backend: ExtractionBackend::default(),
            try_empty_password: true,
        }
    }
}

impl PdfTextConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> std::result::Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ConvertError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> std::result::Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
