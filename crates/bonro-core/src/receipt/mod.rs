//! Receipt text extraction module.

mod parser;
pub mod rules;

pub use parser::{classify_line, match_inline, match_quantified, LineMatch, ReceiptParser};
pub use rules::extract_summary;
