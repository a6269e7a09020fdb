//! Batch command - extract fields from many OCR text files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use rcpt_core::{HeuristicReceiptParser, ParseReport, RcptConfig, ReceiptParser, ScanResponse};

use super::load_config;
use super::output::{format_response, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    report: Option<ParseReport>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Expand glob pattern
    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file() && config.input.accepts(p))
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = HeuristicReceiptParser::from_config(&config.extraction);
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let outcome = process_file(&path, &parser, &config);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match outcome {
            Ok(report) => results.push(FileResult {
                path,
                report: Some(report),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if !args.continue_on_error {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    progress.abandon();
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
                warn!("Failed to process {}: {}", path.display(), error_msg);
                results.push(FileResult {
                    path,
                    report: None,
                    error: Some(error_msg),
                    processing_time_ms,
                });
            }
        }

        progress.inc(1);
    }

    progress.finish_and_clear();

    if let Some(ref output_dir) = args.output_dir {
        for result in &results {
            if let Some(report) = &result.report {
                write_output(output_dir, &result.path, report, args.format)?;
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<&FileResult> = results.iter().filter(|r| r.error.is_some()).collect();
    let needs_review = results
        .iter()
        .filter_map(|r| r.report.as_ref())
        .filter(|r| !r.warnings.is_empty())
        .count();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed, {} need review",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red(),
        style(needs_review).yellow()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_file(
    path: &Path,
    parser: &HeuristicReceiptParser,
    config: &RcptConfig,
) -> anyhow::Result<ParseReport> {
    let text = fs::read_to_string(path)?;
    config.input.check_size(&text)?;
    Ok(parser.parse(&text))
}

fn write_output(
    output_dir: &Path,
    input: &Path,
    report: &ParseReport,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let output_name = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("receipt");
    let output_path = output_dir.join(format!("{}.{}", output_name, format.extension()));

    let response = ScanResponse::from(report.result.clone());
    fs::write(&output_path, format_response(&response, format)?)?;
    debug!("Wrote output to {}", output_path.display());

    Ok(())
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "product_name",
        "purchase_date",
        "brand",
        "product_strategy",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let time_ms = result.processing_time_ms.to_string();

        if let Some(report) = &result.report {
            let strategy = report
                .product_strategy
                .map(|s| s.as_str())
                .unwrap_or("fallback");
            let status = if report.warnings.is_empty() {
                "success"
            } else {
                "review"
            };
            wtr.write_record([
                filename,
                status,
                &report.result.product_name,
                &report.result.purchase_date,
                &report.result.brand,
                strategy,
                &time_ms,
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                &time_ms,
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
