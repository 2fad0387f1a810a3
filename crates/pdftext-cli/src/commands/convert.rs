//! Convert command - batch conversion of a PDF tree.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use pdftext_core::{BatchReport, ConvertEvent, Converter, ErrorPolicy};

use super::{BackendArg, load_config};

/// Arguments for the convert command.
#[derive(Args)]
pub struct ConvertArgs {
    /// Directory searched recursively for .pdf files
    input_dir: PathBuf,

    /// Existing directory receiving one .txt file per PDF
    output_dir: PathBuf,

    /// Skip PDFs that cannot be read or extracted instead of stopping
    #[arg(long)]
    continue_on_error: bool,

    /// Text extraction backend
    #[arg(short, long, value_enum)]
    backend: Option<BackendArg>,

    /// Keep filesystem enumeration order instead of sorting by name
    #[arg(long)]
    unsorted: bool,

    /// Also write a CSV summary of the batch
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Print the batch report as JSON on stdout
    #[arg(long)]
    json: bool,
}

pub fn run(args: ConvertArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if args.continue_on_error {
        config.conversion.error_policy = ErrorPolicy::SkipAndReport;
    }
    if let Some(backend) = args.backend {
        config.extraction.backend = backend.into();
    }
    if args.unsorted {
        config.discovery.sorted = false;
    }
    debug!("Effective configuration: {:?}", config);

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}")?
            .progress_chars("=>-"),
    );

    let converter = Converter::from_config(config);
    let result = converter.convert_all_with(&args.input_dir, &args.output_dir, |event| match event {
        ConvertEvent::Discovered { total } => pb.set_length(total as u64),
        ConvertEvent::Started { source } => pb.set_message(display_name(source)),
        ConvertEvent::Converted(_) => pb.inc(1),
        ConvertEvent::Skipped(failure) => {
            pb.println(format!(
                "{} {}: {}",
                style("✗").red(),
                failure.source.display(),
                failure.message
            ));
            pb.inc(1);
        }
    });

    let report = match result {
        Ok(report) => {
            pb.finish_and_clear();
            report
        }
        Err(err) => {
            pb.abandon();
            return Err(err).context("Conversion aborted");
        }
    };

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &report)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &args.output_dir);
    }

    if !report.is_success() {
        anyhow::bail!(
            "{} of {} PDF files could not be converted",
            report.failed.len(),
            report.total()
        );
    }

    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn print_report(report: &BatchReport, output_dir: &Path) {
    println!(
        "{} Converted {} PDF files into {} in {:?}",
        style("✓").green(),
        report.converted.len(),
        output_dir.display(),
        report.elapsed
    );

    if !report.failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for failure in &report.failed {
            println!(
                "  - {} ({}): {}",
                failure.source.display(),
                failure.stage,
                failure.message
            );
        }
    }
}

fn write_summary(path: &Path, report: &BatchReport) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["source", "status", "output", "pages", "bytes", "error"])?;

    for outcome in &report.converted {
        let source = outcome.source.to_string_lossy();
        let output = outcome.output.to_string_lossy();
        let pages = outcome.pages.to_string();
        let bytes = outcome.bytes_written.to_string();
        wtr.write_record([
            &*source,
            "converted",
            &*output,
            pages.as_str(),
            bytes.as_str(),
            "",
        ])?;
    }

    for failure in &report.failed {
        let source = failure.source.to_string_lossy();
        let status = format!("{}_failed", failure.stage);
        wtr.write_record([
            &*source,
            status.as_str(),
            "",
            "",
            "",
            failure.message.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
