//! Numeric coercion for table and text tokens.
//!
//! Source documents format numbers with `,` thousands separators; the coop
//! receipts also use `.` as a grouping mark ("12.500" is twelve and a half
//! thousand). Helpers return None on anything unparseable so callers decide
//! whether to drop the row or fall back to a default.

/// Parse a float after stripping `,` thousands separators.
pub fn to_float(s: &str) -> Option<f64> {
    let cleaned = s.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Parse an integer-valued token, tolerating a float rendering ("10.0").
pub fn to_int(s: &str) -> Option<i64> {
    let cleaned = s.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    if let Ok(v) = cleaned.parse::<i64>() {
        return Some(v);
    }
    cleaned.parse::<f64>().ok().map(|v| v as i64)
}

/// Parse a grouped amount where both `.` and `,` are thousands marks
/// ("12.500" and "12,500" are both 12500).
pub fn grouped_digits(s: &str) -> Option<f64> {
    let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
