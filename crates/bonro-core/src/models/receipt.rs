//! Receipt data models.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One itemized line recovered from a receipt.
///
/// Quantity and unit price stay textual: the decimal precision printed on
/// the receipt is ambiguous after recognition and is not guessed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name, possibly empty when no name line was available.
    pub product: String,

    /// Unit count, `"1"` when the line carries no explicit quantity.
    pub quantity: String,

    /// Normalized unit price, never empty.
    pub unit_price: String,

    /// Single-letter VAT category, or empty.
    pub vat_code: String,
}

impl LineItem {
    pub fn new(
        product: impl Into<String>,
        quantity: impl Into<String>,
        unit_price: impl Into<String>,
        vat_code: impl Into<String>,
    ) -> Self {
        Self {
            product: product.into(),
            quantity: quantity.into(),
            unit_price: unit_price.into(),
            vat_code: vat_code.into(),
        }
    }
}

/// Receipt-level fields found outside the itemized lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptSummary {
    /// Amount printed next to the TOTAL label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,

    /// Amount printed next to the TVA label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat: Option<Decimal>,

    /// Receipt date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    /// Receipt or document number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_number: Option<String>,
}

impl ReceiptSummary {
    pub fn is_empty(&self) -> bool {
        self.total.is_none()
            && self.vat.is_none()
            && self.date.is_none()
            && self.receipt_number.is_none()
    }
}

/// Everything extracted from a single receipt photograph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptScan {
    /// Line items in receipt order.
    pub items: Vec<LineItem>,

    /// Receipt-level fields.
    #[serde(default, skip_serializing_if = "ReceiptSummary::is_empty")]
    pub summary: ReceiptSummary,

    /// Text as returned by the recognition engine.
    pub raw_text: String,

    /// Processing metadata.
    pub metadata: ScanMetadata,
}

/// Metadata about a processing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanMetadata {
    /// Image the scan was produced from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,

    /// Recognition language used.
    pub language: String,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// When processing finished.
    pub processed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_serializes_flat_string_fields() {
        let item = LineItem::new("Paine alba", "1", "4.50", "");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["product"], "Paine alba");
        assert_eq!(json["quantity"], "1");
        assert_eq!(json["unit_price"], "4.50");
        assert_eq!(json["vat_code"], "");
    }

    #[test]
    fn test_empty_summary() {
        assert!(ReceiptSummary::default().is_empty());
        let summary = ReceiptSummary {
            receipt_number: Some("0042".to_string()),
            ..Default::default()
        };
        assert!(!summary.is_empty());
    }
}
