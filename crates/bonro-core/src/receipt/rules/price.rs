//! Price token repair.

use super::patterns::PRICE_SHAPE;

/// Glyph substitutions applied to price tokens, in order.
///
/// The token is uppercased first, so the lowercase `b` rule never fires in
/// `clean_price`. It is kept so the table stays usable on its own; whether
/// `b` should read as `6` rather than `8` still needs confirming on real
/// receipt samples.
pub const OCR_CONFUSIONS: [(char, char); 6] = [
    ('B', '8'),
    ('b', '6'),
    ('O', '0'),
    ('D', '0'),
    ('I', '1'),
    ('L', '1'),
];

/// Replace glyphs commonly misread for digits.
pub fn substitute_confusions(token: &str) -> String {
    token
        .chars()
        .map(|c| {
            OCR_CONFUSIONS
                .iter()
                .find(|(from, _)| *from == c)
                .map_or(c, |(_, to)| *to)
        })
        .collect()
}

/// Keep only the last `.` as the decimal point: `1.234.56` becomes `1234.56`.
///
/// Strings with at most one dot are returned unchanged. No decimal point is
/// ever inserted.
pub fn normalize_decimal(value: &str) -> String {
    match value.rsplit_once('.') {
        Some((head, last)) if head.contains('.') => format!("{}.{}", head.replace('.', ""), last),
        _ => value.to_string(),
    }
}

/// Clean a recognized price token into `(value, vat_code)`.
///
/// Tokens that do not end up as digits and dots followed by at most one
/// letter come back cleaned but otherwise untouched, with an empty code.
pub fn clean_price(token: &str) -> (String, String) {
    let cleaned: String = substitute_confusions(&token.to_uppercase())
        .replace(',', ".")
        .replace(' ', "");

    match PRICE_SHAPE.captures(&cleaned) {
        Some(caps) => (normalize_decimal(&caps["value"]), caps["code"].to_string()),
        None => (cleaned, String::new()),
    }
}
