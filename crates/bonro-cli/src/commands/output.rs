//! Output formats shared by the process, parse and batch commands.

use std::path::Path;

use bonro_core::models::config::ExportConfig;
use bonro_core::models::receipt::{LineItem, ReceiptScan};

const CSV_COLUMNS: [&str; 4] = ["product", "quantity", "unit_price", "vat_code"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Item table, one row per line item
    Csv,
    /// Full scan as JSON
    Json,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn format_scan(
    scan: &ReceiptScan,
    format: OutputFormat,
    export: &ExportConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Csv => format_csv(&scan.items, export.include_index),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(scan)?)),
        OutputFormat::Text => Ok(format_text(scan)),
    }
}

/// Item table in data-frame layout: an unnamed leading column holds the
/// zero-based row index.
pub fn format_csv(items: &[LineItem], include_index: bool) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    if include_index {
        let mut header = vec![""];
        header.extend(CSV_COLUMNS);
        wtr.write_record(&header)?;
    } else {
        wtr.write_record(CSV_COLUMNS)?;
    }

    for (index, item) in items.iter().enumerate() {
        let fields = [
            item.product.as_str(),
            item.quantity.as_str(),
            item.unit_price.as_str(),
            item.vat_code.as_str(),
        ];

        if include_index {
            let index = index.to_string();
            let mut row = vec![index.as_str()];
            row.extend(fields);
            wtr.write_record(&row)?;
        } else {
            wtr.write_record(fields)?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_text(scan: &ReceiptScan) -> String {
    let mut output = String::new();

    if let Some(source) = &scan.metadata.source {
        output.push_str(&format!("Receipt: {}\n", source.display()));
    }
    if let Some(number) = &scan.summary.receipt_number {
        output.push_str(&format!("Number: {}\n", number));
    }
    if let Some(date) = scan.summary.date {
        output.push_str(&format!("Date: {}\n", date));
    }
    output.push('\n');

    output.push_str(&format!("Items ({}):\n", scan.items.len()));
    for item in &scan.items {
        let product = if item.product.is_empty() { "?" } else { item.product.as_str() };
        output.push_str(&format!("  {} x {}  {}", item.quantity, item.unit_price, product));
        if !item.vat_code.is_empty() {
            output.push_str(&format!("  [{}]", item.vat_code));
        }
        output.push('\n');
    }

    if scan.summary.total.is_some() || scan.summary.vat.is_some() {
        output.push('\n');
    }
    if let Some(total) = scan.summary.total {
        output.push_str(&format!("Total: {}\n", total));
    }
    if let Some(vat) = scan.summary.vat {
        output.push_str(&format!("VAT:   {}\n", vat));
    }

    output
}

/// Per-image output file name, e.g. `df_IMG_0042.csv`.
pub fn output_file_name(source: &Path, prefix: &str, format: OutputFormat) -> String {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("receipt");

    format!("{}{}.{}", prefix, stem, format.extension())
}
