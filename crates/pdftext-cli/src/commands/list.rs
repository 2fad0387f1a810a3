//! List command - show the PDFs a conversion would pick up.

use std::path::PathBuf;

use clap::Args;
use console::style;

use pdftext_core::{list_pdfs, output_path_for};

use super::load_config;

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Directory searched recursively for .pdf files
    input_dir: PathBuf,

    /// Keep filesystem enumeration order instead of sorting by name
    #[arg(long)]
    unsorted: bool,

    /// Show the output file each PDF maps to, relative to this directory
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

pub fn run(args: ListArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if args.unsorted {
        config.discovery.sorted = false;
    }

    let pdfs = list_pdfs(&args.input_dir, &config.discovery)?;

    for pdf in &pdfs {
        match &args.output_dir {
            Some(output_dir) => println!(
                "{} -> {}",
                pdf.display(),
                output_path_for(pdf, output_dir).display()
            ),
            None => println!("{}", pdf.display()),
        }
    }

    eprintln!(
        "{} Found {} PDF files",
        style("ℹ").blue(),
        pdfs.len()
    );

    Ok(())
}
