//! Delimited-text parsing into ragged rows of string cells.
//!
//! No header is assumed here and rows keep their own widths; callers must
//! bound-check every index, which [`cell`] does for them.

use csv::ReaderBuilder;

/// Rows of string cells in source order. Rows are not padded or truncated to
/// a common width.
pub type Table = Vec<Vec<String>>;

/// Parses `text` into rows, honouring RFC 4180 quoting. Blank lines are
/// dropped rather than emitted as empty rows.
///
/// # Errors
///
/// Returns the underlying [`csv::Error`] if the reader cannot advance
/// (e.g. an I/O error on the in-memory buffer).
pub fn parse_table(text: &str, delimiter: u8) -> Result<Table, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if is_blank_record(&record) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

fn is_blank_record(record: &csv::StringRecord) -> bool {
    match record.len() {
        0 => true,
        1 => record.get(0).is_some_and(str::is_empty),
        _ => false,
    }
}

/// Returns the cell at `idx`, or `None` when the row is too short.
#[must_use]
pub fn cell(row: &[String], idx: usize) -> Option<&str> {
    row.get(idx).map(String::as_str)
}
