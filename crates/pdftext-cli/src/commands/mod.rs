//! Subcommand implementations.

pub mod config;
pub mod convert;
pub mod extract;
pub mod list;

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tracing::debug;

use pdftext_core::{ExtractionBackend, PdfTextConfig};

/// Text extraction backend selectable on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum BackendArg {
    /// Page-by-page extraction with lopdf
    Lopdf,
    /// Whole-document extraction with pdf-extract
    PdfExtract,
}

impl From<BackendArg> for ExtractionBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Lopdf => ExtractionBackend::Lopdf,
            BackendArg::PdfExtract => ExtractionBackend::PdfExtract,
        }
    }
}

/// Location of the user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pdftext")
        .join("config.json")
}

/// Load the configuration named by `--config`, else the user file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PdfTextConfig> {
    if let Some(path) = config_path {
        return Ok(PdfTextConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading configuration from {}", default_path.display());
        Ok(PdfTextConfig::from_file(&default_path)?)
    } else {
        Ok(PdfTextConfig::default())
    }
}
