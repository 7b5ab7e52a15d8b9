//! Line-item parser for recognized receipt text.
//!
//! Receipts print items in two shapes. A multi-unit purchase takes two lines,
//! the quantity line first and the product name below it:
//!
//! ```text
//! 2 BUC x 3,49 A
//! LAPTE ZUZU 1.5L
//! ```
//!
//! A single unit is printed on one line with the price at the end:
//!
//! ```text
//! Paine alba 4.50
//! ```
//!
//! The quantity shape is tried first: it needs an explicit `BUC x` marker and
//! is less likely to fire on noise.

use tracing::{debug, trace};

use crate::models::receipt::LineItem;

use super::rules::patterns::{INLINE_ITEM, QUANTIFIED_ITEM};
use super::rules::{clean_name, clean_price};

/// Outcome of matching a single receipt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch {
    /// Nothing item-like on the line.
    NoMatch,
    /// `<qty> BUC x <price>`; the product name is on the following line.
    Quantified { quantity: String, price: String },
    /// `<name> <price>`; a single unit.
    Inline { name: String, price: String },
}

/// Match the explicit-quantity shape anywhere in an already comma-normalized line.
pub fn match_quantified(line: &str) -> Option<LineMatch> {
    let caps = QUANTIFIED_ITEM.captures(line)?;
    Some(LineMatch::Quantified {
        quantity: caps["qty"].to_string(),
        price: caps["price"].to_string(),
    })
}

/// Match the bare trailing-price shape over a whole, already comma-normalized line.
pub fn match_inline(line: &str) -> Option<LineMatch> {
    let caps = INLINE_ITEM.captures(line)?;
    Some(LineMatch::Inline {
        name: caps["name"].to_string(),
        price: caps["price"].to_string(),
    })
}

/// Classify a trimmed line. Commas are turned into dots across the whole line first.
pub fn classify_line(line: &str) -> LineMatch {
    let normalized = line.replace(',', ".");
    match_quantified(&normalized)
        .or_else(|| match_inline(&normalized))
        .unwrap_or(LineMatch::NoMatch)
}

/// Parser turning recognized receipt text into line items.
///
/// Stateless; one instance can be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReceiptParser;

impl ReceiptParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse line items in receipt order. Lines that match nothing are skipped.
    pub fn parse(&self, text: &str) -> Vec<LineItem> {
        let lines: Vec<&str> = text.lines().collect();
        let mut items = Vec::new();
        let mut cursor = 0;

        while cursor < lines.len() {
            let line = lines[cursor].trim();
            if line.is_empty() {
                cursor += 1;
                continue;
            }

            match classify_line(line) {
                LineMatch::Quantified { quantity, price } => {
                    let product = lines
                        .get(cursor + 1)
                        .map(|next| next.trim())
                        .filter(|next| !next.is_empty())
                        .map(clean_name)
                        .unwrap_or_default();
                    // The VAT code only ever comes from the price token itself.
                    let (unit_price, vat_code) = clean_price(&price);
                    let quantity = quantity.replace(['.', ','], "");

                    trace!(line = cursor, %product, %quantity, %unit_price, "quantified item");
                    items.push(LineItem::new(product, quantity, unit_price, vat_code));
                    // The name line is consumed even when it was missing or blank.
                    cursor += 2;
                }
                LineMatch::Inline { name, price } => {
                    let product = clean_name(&name);
                    let (unit_price, vat_code) = clean_price(&price);

                    trace!(line = cursor, %product, %unit_price, "inline item");
                    items.push(LineItem::new(product, "1", unit_price, vat_code));
                    cursor += 1;
                }
                LineMatch::NoMatch => cursor += 1,
            }
        }

        debug!("Parsed {} items from {} lines", items.len(), lines.len());
        items
    }
}
