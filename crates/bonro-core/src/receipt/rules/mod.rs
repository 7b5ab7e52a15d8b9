//! Rule-based field cleaners for Romanian receipts.

pub mod name;
pub mod patterns;
pub mod price;
pub mod summary;

pub use name::clean_name;
pub use price::{clean_price, normalize_decimal, substitute_confusions, OCR_CONFUSIONS};
pub use summary::{extract_summary, parse_amount, parse_date};
