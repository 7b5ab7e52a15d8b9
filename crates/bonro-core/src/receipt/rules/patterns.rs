//! Common regex patterns for Romanian receipt extraction.
//!
//! `B O D I l` show up in several classes: they are the glyphs recognition
//! most often returns in place of `8 0 0 1 1` on thermal-printer receipts.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Line items

    /// `<qty> BUC x <price>[<letter>]`, e.g. `2 BUC x 10.50 A`. Searched, not anchored.
    pub static ref QUANTIFIED_ITEM: Regex = Regex::new(
        r"(?i)(?P<qty>\d{1,4}[.,]?\d*)\s*BUC\.?\s*[x×]\s*(?P<price>[0-9.,BODIl]+)\s*(?:[a-z]\b)?"
    ).unwrap();

    /// `<name> <price>[<letter>]` covering the whole line, e.g. `Paine alba 4.50`.
    pub static ref INLINE_ITEM: Regex = Regex::new(
        r"(?i)^(?P<name>.+?)\s+(?P<price>[0-9]{1,3}[.,][0-9]{2,3})\s*[A-Za-z]?$"
    ).unwrap();

    /// Trailing number/letter shape of a cleaned price token.
    pub static ref PRICE_SHAPE: Regex = Regex::new(
        r"^(?P<value>[0-9.]+)(?P<code>[A-Z]?)$"
    ).unwrap();

    // Product names

    /// Category code in front of a name: `A `, `SS `, `"XE `.
    pub static ref NAME_LEADING_CODE: Regex = Regex::new(
        r"^[^a-zA-Z0-9]*[A-Z]{1,3}\s+"
    ).unwrap();

    /// Price or unit fragment left at the end of a name: ` 3.49 A`, ` 1.5L`.
    pub static ref NAME_TRAILING_PRICE: Regex = Regex::new(
        r"[0-9.,BODIl]+\s*[A-Za-z]?\s*$"
    ).unwrap();

    // Receipt summary

    pub static ref TOTAL: Regex = Regex::new(
        r"(?:TOTAL(?:A)?|PTOTAL)[^\d]{0,10}([\d.,]+)"
    ).unwrap();

    pub static ref VAT_TOTAL: Regex = Regex::new(
        r"TVA[^\d]{0,10}([\d.,]+)"
    ).unwrap();

    pub static ref DATE: Regex = Regex::new(
        r"(\d{1,2}[./-]\d{1,2}[./-]\d{2,4})"
    ).unwrap();

    pub static ref RECEIPT_NUMBER: Regex = Regex::new(
        r"NR[^\w]?(\w+)"
    ).unwrap();
}
