//! Batch conversion of a PDF tree into flat `.txt` files.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::discovery::list_pdfs;
use crate::error::{ConvertError, Result};
use crate::models::config::{ErrorPolicy, PdfTextConfig};
use crate::models::report::{BatchReport, FailureStage, FileFailure, FileOutcome};
use crate::pdf::{PageExtractor, PdfExtractor, merge_pages};

/// Extension given to every output file.
pub const TEXT_EXTENSION: &str = "txt";

/// Progress notifications emitted while a batch runs.
#[derive(Debug)]
pub enum ConvertEvent<'a> {
    /// Discovery finished; `total` PDFs will be processed.
    Discovered { total: usize },
    /// About to process a PDF.
    Started { source: &'a Path },
    /// A PDF was converted.
    Converted(&'a FileOutcome),
    /// A PDF was skipped under [`ErrorPolicy::SkipAndReport`].
    Skipped(&'a FileFailure),
}

/// Merged text of one PDF, before it is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub pages: usize,
}

/// Drives discovery, extraction and output writing for a batch.
pub struct Converter<E = PdfExtractor> {
    extractor: E,
    config: PdfTextConfig,
}

impl Converter<PdfExtractor> {
    /// Create a converter with the default configuration.
    pub fn new() -> Self {
        Self::from_config(PdfTextConfig::default())
    }

    /// Create a converter whose extractor follows `config.extraction`.
    pub fn from_config(config: PdfTextConfig) -> Self {
        let extractor = PdfExtractor::with_config(config.extraction.clone());
        Self { extractor, config }
    }
}

impl Default for Converter<PdfExtractor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: PageExtractor> Converter<E> {
    /// Create a converter around a custom extractor.
    pub fn with_extractor(extractor: E, config: PdfTextConfig) -> Self {
        Self { extractor, config }
    }

    /// Set the per-file error policy.
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.config.conversion.error_policy = policy;
        self
    }

    pub fn config(&self) -> &PdfTextConfig {
        &self.config
    }

    /// Convert every PDF under `input_dir` into `output_dir/<stem>.txt`.
    pub fn convert_all(&self, input_dir: &Path, output_dir: &Path) -> Result<BatchReport> {
        self.convert_all_with(input_dir, output_dir, |_| {})
    }

    /// Like [`Converter::convert_all`], reporting progress to `on_event`.
    ///
    /// Discovery and output write failures always abort the batch. Read and
    /// extraction failures abort it under [`ErrorPolicy::FailFast`] and are
    /// recorded in the report under [`ErrorPolicy::SkipAndReport`]; a failed
    /// PDF never produces an output file.
    pub fn convert_all_with<F>(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        mut on_event: F,
    ) -> Result<BatchReport>
    where
        F: FnMut(ConvertEvent<'_>),
    {
        let start = Instant::now();
        let policy = self.config.conversion.error_policy;

        let pdfs = list_pdfs(input_dir, &self.config.discovery)?;
        info!(
            "Converting {} PDF files from {} into {}",
            pdfs.len(),
            input_dir.display(),
            output_dir.display()
        );
        on_event(ConvertEvent::Discovered { total: pdfs.len() });

        let mut report = BatchReport::default();
        for path in &pdfs {
            on_event(ConvertEvent::Started { source: path });

            let extracted = match self.extract_text(path) {
                Ok(extracted) => extracted,
                Err(err) => {
                    if policy == ErrorPolicy::FailFast {
                        error!("{}", err);
                        return Err(err);
                    }

                    warn!("Skipping {}: {}", path.display(), err);
                    let failure = FileFailure {
                        source: path.clone(),
                        stage: failure_stage(&err),
                        message: err.to_string(),
                    };
                    on_event(ConvertEvent::Skipped(&failure));
                    report.failed.push(failure);
                    continue;
                }
            };

            let outcome = self.write_output(path, output_dir, &extracted).inspect_err(|err| {
                error!("{}", err);
            })?;
            on_event(ConvertEvent::Converted(&outcome));
            report.converted.push(outcome);
        }

        report.elapsed = start.elapsed();
        info!(
            "Converted {} of {} PDF files in {:?} ({} skipped)",
            report.converted.len(),
            report.total(),
            report.elapsed,
            report.failed.len()
        );
        Ok(report)
    }

    /// Convert a single PDF into `output_dir/<stem>.txt`.
    pub fn convert_file(&self, pdf: &Path, output_dir: &Path) -> Result<FileOutcome> {
        let extracted = self.extract_text(pdf)?;
        self.write_output(pdf, output_dir, &extracted)
    }

    /// Read a PDF and merge its page text, without writing anything.
    pub fn extract_text(&self, pdf: &Path) -> Result<ExtractedText> {
        let data = fs::read(pdf).map_err(|source| ConvertError::Read {
            path: pdf.to_path_buf(),
            source,
        })?;

        let pages = self
            .extractor
            .extract_pages(&data)
            .map_err(|source| ConvertError::Extraction {
                path: pdf.to_path_buf(),
                source,
            })?;

        Ok(ExtractedText {
            text: merge_pages(&pages),
            pages: pages.len(),
        })
    }

    fn write_output(
        &self,
        pdf: &Path,
        output_dir: &Path,
        extracted: &ExtractedText,
    ) -> Result<FileOutcome> {
        let output = output_path_for(pdf, output_dir);
        if output.exists() {
            debug!("Overwriting {}", output.display());
        }

        fs::write(&output, &extracted.text).map_err(|source| ConvertError::Write {
            path: output.clone(),
            source,
        })?;
        debug!("Wrote {} ({} bytes)", output.display(), extracted.text.len());

        Ok(FileOutcome {
            source: pdf.to_path_buf(),
            output,
            pages: extracted.pages,
            bytes_written: extracted.text.len(),
        })
    }
}

/// Output location for a PDF: its file stem plus `.txt`, directly under `output_dir`.
///
/// Input nesting is not mirrored, so `a/x.pdf` and `b/x.pdf` map to the same file.
/// A name made only of a dotted extension, such as `.pdf`, has an empty stem.
pub fn output_path_for(pdf: &Path, output_dir: &Path) -> PathBuf {
    let stem = match (pdf.file_name(), pdf.extension()) {
        (Some(name), None) if name.as_encoded_bytes().starts_with(b".") => OsStr::new(""),
        _ => pdf.file_stem().unwrap_or_default(),
    };
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(TEXT_EXTENSION);
    output_dir.join(name)
}

/// Convert with the default configuration.
pub fn convert_all(input_dir: &Path, output_dir: &Path) -> Result<BatchReport> {
    Converter::new().convert_all(input_dir, output_dir)
}

fn failure_stage(err: &ConvertError) -> FailureStage {
    match err {
        ConvertError::Extraction { .. } => FailureStage::Extract,
        _ => FailureStage::Read,
    }
}
