//! Scan command - extract fields from a single receipt's OCR text.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use rcpt_core::{HeuristicReceiptParser, ReceiptParser, ScanResponse};

use super::load_config;
use super::output::{format_response, OutputFormat};

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// OCR text file, or "-" to read from stdin
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show which heuristic picked the product name
    #[arg(long)]
    show_strategy: bool,

    /// List fields that fell back to defaults
    #[arg(long)]
    show_warnings: bool,
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let text = read_input(&args.input)?;
    config.input.check_size(&text)?;

    info!("Scanning {} ({} bytes)", args.input, text.len());

    let parser = HeuristicReceiptParser::from_config(&config.extraction);
    let report = parser.parse(&text);

    let output = format_response(&ScanResponse::from(report.result), args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_strategy {
        let strategy = report
            .product_strategy
            .map(|s| s.to_string())
            .unwrap_or_else(|| "fallback".to_string());
        eprintln!("{} Product name strategy: {}", style("ℹ").blue(), strategy);
    }

    if args.show_warnings && !report.warnings.is_empty() {
        eprintln!("{}", style("Please review:").yellow());
        for warning in &report.warnings {
            eprintln!("  - {}", warning);
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    let path = PathBuf::from(input);
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    Ok(fs::read_to_string(&path)?)
}
