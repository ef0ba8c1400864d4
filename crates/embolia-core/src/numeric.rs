//! Lenient parsing of numeric form entries.
//!
//! Vital signs and lab values arrive as the raw text of a form field. An
//! empty or unparseable entry means "not yet entered" and every caller
//! treats it as a criterion that is not met.

/// Parse the longest decimal prefix of `raw`.
///
/// Leading whitespace is skipped, a leading sign is accepted and `,` is read
/// as a decimal separator. Returns `None` when no digit is found.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let mut prefix = String::with_capacity(text.len());
    let mut seen_digit = false;
    let mut seen_separator = false;

    for (i, c) in text.chars().enumerate() {
        match c {
            '+' | '-' if i == 0 => prefix.push(c),
            '0'..='9' => {
                seen_digit = true;
                prefix.push(c);
            }
            '.' | ',' if !seen_separator => {
                seen_separator = true;
                prefix.push('.');
            }
            _ => break,
        }
    }

    if !seen_digit {
        return None;
    }
    // A trailing separator ("12.") is still a valid number once dropped.
    prefix.trim_end_matches('.').parse().ok()
}

/// Parse the integer part of the leading number in `raw`.
pub fn parse_integer(raw: &str) -> Option<i64> {
    let value = parse_decimal(raw)?;
    Some(value.trunc() as i64)
}

/// Parse a non-negative integer, e.g. an age in years.
pub fn parse_count(raw: &str) -> Option<u32> {
    parse_integer(raw).and_then(|v| u32::try_from(v).ok())
}
