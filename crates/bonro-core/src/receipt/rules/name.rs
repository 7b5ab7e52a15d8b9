//! Product name cleanup.

use super::patterns::{NAME_LEADING_CODE, NAME_TRAILING_PRICE};

/// Strip a leading category code and a trailing price fragment from a name line.
pub fn clean_name(line: &str) -> String {
    let name = NAME_LEADING_CODE.replace(line, "");
    let name = NAME_TRAILING_PRICE.replace(&name, "");
    name.trim().to_string()
}
