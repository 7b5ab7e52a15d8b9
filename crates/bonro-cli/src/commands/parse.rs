//! Parse command - extract line items from already recognized text.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use bonro_core::{ReceiptPipeline, StaticTextRecognizer};

use super::output::{format_scan, OutputFormat};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Text file with recognized receipt text, or `-` for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::config::load(config_path)?;
    let from_stdin = args.input.as_os_str() == "-";

    let text = if from_stdin {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        if !args.input.exists() {
            anyhow::bail!("Input file not found: {}", args.input.display());
        }
        fs::read_to_string(&args.input)?
    };

    let recognizer =
        StaticTextRecognizer::new(String::new()).with_language(config.recognition.language.clone());
    let mut scan = ReceiptPipeline::new(recognizer, &config.preprocessing).scan_text(text);
    if !from_stdin {
        scan.metadata.source = Some(args.input.clone());
    }

    info!("Parsed {} items", scan.items.len());

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

    Ok(())
}
