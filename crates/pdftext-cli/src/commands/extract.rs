//! Extract command - print the text of a single PDF.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use pdftext_core::Converter;

use super::{BackendArg, load_config};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Text extraction backend
    #[arg(short, long, value_enum)]
    backend: Option<BackendArg>,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(backend) = args.backend {
        config.extraction.backend = backend.into();
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Extracting text from {}", args.input.display());
    let extracted = Converter::from_config(config).extract_text(&args.input)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &extracted.text)?;
        eprintln!(
            "{} {} pages written to {}",
            style("✓").green(),
            extracted.pages,
            output_path.display()
        );
    } else {
        print!("{}", extracted.text);
    }

    Ok(())
}
