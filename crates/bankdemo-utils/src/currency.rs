//! Currency string parsing and formatting
//!
//! Amounts travel through the application as signed currency strings
//! (e.g. "$23.57", "-$726.81"). These helpers convert between that form
//! and plain numbers.

/// Parse a currency-formatted string into a number.
///
/// Tolerates a currency symbol, thousands separators and surrounding
/// whitespace. Returns `None` when no leading numeric value remains after
/// stripping the decoration.
pub fn parse_amount(value: &str) -> Option<f64> {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    // Accept only a plain signed decimal at the start of what is left.
    let mut end = 0;
    let bytes = cleaned.as_bytes();
    if bytes.first() == Some(&b'-') {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            end = frac_end;
        }
    }

    cleaned[..end].parse::<f64>().ok()
}

/// Format a number as a currency string (e.g. `14.95`, `-123.45`).
///
/// Truncates at the half-cent boundary and always shows two decimal
/// places. Non-finite values format as `0.00`.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "0.00".to_string();
    }
    let minus = if value < 0.0 { "-" } else { "" };
    let cents = ((value.abs() + 0.005) * 100.0).floor() as i64;
    format!("{}{}.{:02}", minus, cents / 100, cents % 100)
}
