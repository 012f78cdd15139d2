//! Product-name canonicalization for cross-store equality.

/// First and last codepoints of the full-width ASCII variants block
/// (`！` through `～`).
const FULLWIDTH_FIRST: u32 = 0xFF01;
const FULLWIDTH_LAST: u32 = 0xFF5E;
/// Distance from a full-width variant down to its ASCII counterpart.
const FULLWIDTH_OFFSET: u32 = 0xFEE0;

/// Maps a raw product name to its comparison key.
///
/// Steps, in order:
/// 1. Fold full-width ASCII variants (`Ａ`, `１`, `（`) to half-width.
/// 2. Remove every whitespace character, including the ideographic space
///    U+3000.
/// 3. Lower-case.
///
/// The result is an equality key only and is never displayed.
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    let folded: String = raw
        .chars()
        .map(fold_fullwidth)
        .filter(|c| !c.is_whitespace())
        .collect();
    folded.to_lowercase()
}

fn fold_fullwidth(c: char) -> char {
    let code = u32::from(c);
    if (FULLWIDTH_FIRST..=FULLWIDTH_LAST).contains(&code) {
        char::from_u32(code - FULLWIDTH_OFFSET).unwrap_or(c)
    } else {
        c
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
