//! Receipt-level fields: total, VAT amount, date and receipt number.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::receipt::ReceiptSummary;

use super::patterns::{DATE, RECEIPT_NUMBER, TOTAL, VAT_TOTAL};
use super::price::normalize_decimal;

const DATE_FORMATS: [&str; 6] = ["%d.%m.%Y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%y", "%d/%m/%y", "%d-%m-%y"];

/// Extract receipt-level fields. The first occurrence of each label wins.
pub fn extract_summary(text: &str) -> ReceiptSummary {
    ReceiptSummary {
        total: TOTAL.captures(text).and_then(|caps| parse_amount(&caps[1])),
        vat: VAT_TOTAL.captures(text).and_then(|caps| parse_amount(&caps[1])),
        date: DATE.captures(text).and_then(|caps| parse_date(&caps[1])),
        receipt_number: RECEIPT_NUMBER.captures(text).map(|caps| caps[1].to_string()),
    }
}

/// Parse an amount written with either separator, e.g. `23,45` or `1.234,50`.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let normalized = normalize_decimal(&s.replace(',', "."));
    Decimal::from_str(normalized.trim_end_matches('.')).ok()
}

/// Parse a day-first date such as `17.10.2026` or `17/10/26`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    // Two-digit years would otherwise parse as year 26 AD under `%Y`.
    let four_digit_year = s.chars().rev().take_while(|c| c.is_ascii_digit()).count() >= 4;

    DATE_FORMATS
        .iter()
        .filter(|fmt| fmt.ends_with('Y') == four_digit_year)
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}
