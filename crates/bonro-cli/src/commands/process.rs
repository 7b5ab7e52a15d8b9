//! Process command - extract line items from a single receipt photograph.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use bonro_core::ReceiptPipeline;

use super::output::{format_scan, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Receipt image (PNG, JPEG, TIFF, ...)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Echo the recognized text to stderr
    #[arg(long)]
    print_text: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::config::load(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.set_message("Recognizing receipt...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let pipeline = ReceiptPipeline::from_config(&config);
    let input = args.input.clone();
    let result = tokio::task::spawn_blocking(move || pipeline.process(&input)).await?;

    pb.finish_and_clear();
    let scan = result?;

    if args.print_text {
        eprintln!("{}", style("Recognized text:").bold());
        eprintln!("{}", scan.raw_text);
    }

    if scan.items.is_empty() {
        eprintln!("{} No line items found", style("⚠").yellow());
    }

    let output = format_scan(&scan, args.format, &config.export)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
