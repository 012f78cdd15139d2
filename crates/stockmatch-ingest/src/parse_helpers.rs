//! Numeric cell parsing shared by the usage and dead-stock extractors.
//!
//! Export cells carry thousands separators (`"1,234"`) and occasionally a
//! trailing unit (`"12錠"`), so parsing reads the longest leading decimal
//! number and ignores what follows.

/// Parses a quantity or price cell.
///
/// Commas are removed and surrounding whitespace trimmed before reading a
/// leading decimal of the form `[+-]digits[.digits][(e|E)[+-]digits]`.
/// Returns `None` when no digits are found.
#[must_use]
pub(crate) fn parse_quantity(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|&c| c != ',').collect();
    let end = leading_number_len(cleaned.trim().as_bytes())?;
    cleaned.trim()[..end].parse::<f64>().ok()
}

/// Returns the byte length of the decimal literal at the start of `bytes`,
/// or `None` if it does not start with one.
fn leading_number_len(bytes: &[u8]) -> Option<usize> {
    let len = bytes.len();
    let mut i = 0;

    if i < len && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < len && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > frac_start || digits > 0 {
            digits += j - frac_start;
            i = j;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if i < len && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < len && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    Some(i)
}
