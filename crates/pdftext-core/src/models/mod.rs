//! Configuration and report data models.

pub mod config;
pub mod report;

pub use config::{
    ConversionConfig, DiscoveryConfig, ErrorPolicy, ExtractionBackend, ExtractionConfig,
    PdfTextConfig,
};
pub use report::{BatchReport, FailureStage, FileFailure, FileOutcome};
