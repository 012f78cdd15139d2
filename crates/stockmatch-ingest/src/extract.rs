//! Store record extraction from parsed export tables.
//!
//! Both report families follow the same shape: locate the header row by
//! label text, resolve column indices from that row, then stream every row
//! below it. Label variants come from [`stockmatch_core::ExtractionRules`];
//! nothing here hard-codes header text.
//!
//! Rows are ragged, so every index goes through [`cell`].

use stockmatch_core::{DeadstockRecord, DeadstockRules, UsageRecord, UsageRules};

use crate::error::ExtractError;
use crate::normalize::normalize_name;
use crate::parse_helpers::parse_quantity;
use crate::table::cell;

fn contains_any(value: &str, labels: &[String]) -> bool {
    labels.iter().any(|l| value.contains(l.as_str()))
}

fn equals_any(value: &str, labels: &[String]) -> bool {
    labels.iter().any(|l| value == l)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Name cell of `row` when present and non-blank.
fn name_cell(row: &[String], column: usize) -> Option<&str> {
    cell(row, column).filter(|v| !is_blank(v))
}

// ---------------------------------------------------------------------------
// Usage report
// ---------------------------------------------------------------------------

/// Column indices resolved from a usage report's header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageColumns {
    pub name: usize,
    pub usage: usize,
}

/// Looks for the store's display name in the first `store_scan_rows` rows.
///
/// The first cell containing a store label is taken as the key; the cell to
/// its right, trimmed, is the name. A label whose neighbour is missing or
/// blank does not end the scan.
#[must_use]
pub fn discover_store_name(table: &[Vec<String>], rules: &UsageRules) -> Option<String> {
    table
        .iter()
        .take(rules.store_scan_rows)
        .find_map(|row| {
            let idx = row.iter().position(|c| contains_any(c, &rules.store_labels))?;
            cell(row, idx + 1)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        })
}

/// Index of the first row holding both a product-name label and a usage
/// marker (a header marker, a quantity label, or an exact marker).
#[must_use]
pub fn find_usage_header(table: &[Vec<String>], rules: &UsageRules) -> Option<usize> {
    table.iter().position(|row| {
        let has_name = row.iter().any(|c| contains_any(c, &rules.name_labels));
        let has_marker = row.iter().any(|c| {
            contains_any(c, &rules.header_markers)
                || contains_any(c, &rules.quantity_labels)
                || equals_any(c, &rules.header_exact_markers)
        });
        has_name && has_marker
    })
}

/// Resolves the name and usage columns of a usage header row. The usage
/// column falls back to [`UsageRules::fallback_column`] when no quantity
/// label is present.
#[must_use]
pub fn resolve_usage_columns(header: &[String], rules: &UsageRules) -> Option<UsageColumns> {
    let name = header
        .iter()
        .position(|c| contains_any(c, &rules.name_labels))?;
    let usage = header
        .iter()
        .position(|c| contains_any(c, &rules.quantity_labels))
        .unwrap_or(rules.fallback_column);
    Some(UsageColumns { name, usage })
}

/// Reads a row's usage quantity.
///
/// The resolved column wins unless it reads zero or is unparseable. In that
/// case, and only when the resolved column is not already the fallback
/// column, a strictly positive value in the fallback column is used. A zero
/// in the fallback column never replaces the primary reading.
fn resolve_usage_quantity(row: &[String], columns: UsageColumns, fallback_column: usize) -> f64 {
    let primary = cell(row, columns.usage)
        .and_then(parse_quantity)
        .unwrap_or(0.0);
    if primary.abs() > 0.0 || columns.usage == fallback_column {
        return primary;
    }
    cell(row, fallback_column)
        .and_then(parse_quantity)
        .filter(|v| *v > 0.0)
        .unwrap_or(primary)
}

/// Extracts usage records from a usage report table.
///
/// # Errors
///
/// Returns [`ExtractError::HeaderNotFound`] when no row satisfies
/// [`find_usage_header`].
pub fn extract_usage(
    table: &[Vec<String>],
    rules: &UsageRules,
) -> Result<Vec<UsageRecord>, ExtractError> {
    let header_idx = find_usage_header(table, rules).ok_or(ExtractError::HeaderNotFound)?;
    let columns = resolve_usage_columns(&table[header_idx], rules)
        .ok_or(ExtractError::MissingNameColumn { row: header_idx })?;

    tracing::trace!(
        header_row = header_idx,
        name_column = columns.name,
        usage_column = columns.usage,
        "resolved usage report columns"
    );

    let records = table[header_idx + 1..]
        .iter()
        .filter_map(|row| {
            let name = name_cell(row, columns.name)?;
            Some(UsageRecord {
                name: name.to_string(),
                normalized_name: normalize_name(name),
                usage: resolve_usage_quantity(row, columns, rules.fallback_column),
            })
        })
        .collect();

    Ok(records)
}

// ---------------------------------------------------------------------------
// Dead-stock report
// ---------------------------------------------------------------------------

/// Column indices resolved from a dead-stock header row. `None` marks a
/// column whose label is absent; reads against it yield the field default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadstockColumns {
    pub name: usize,
    pub stock: Option<usize>,
    pub expiry: Option<usize>,
    pub price: Option<usize>,
}

/// Index of the first row whose first cell is exactly a
/// [`DeadstockRules::header_first_cell`] label.
#[must_use]
pub fn find_deadstock_header(table: &[Vec<String>], rules: &DeadstockRules) -> Option<usize> {
    table.iter().position(|row| {
        cell(row, 0).is_some_and(|first| equals_any(first, &rules.header_first_cell))
    })
}

#[must_use]
pub fn resolve_deadstock_columns(
    header: &[String],
    rules: &DeadstockRules,
) -> Option<DeadstockColumns> {
    let exact = |labels: &[String]| header.iter().position(|c| equals_any(c, labels));
    Some(DeadstockColumns {
        name: exact(rules.name_labels.as_slice())?,
        stock: exact(rules.stock_labels.as_slice()),
        expiry: exact(rules.expiry_labels.as_slice()),
        price: exact(rules.price_labels.as_slice()),
    })
}

fn read_decimal(row: &[String], column: Option<usize>) -> f64 {
    column
        .and_then(|c| cell(row, c))
        .and_then(parse_quantity)
        .unwrap_or(0.0)
}

/// Extracts dead-stock records from a dead-stock report table.
///
/// # Errors
///
/// Returns [`ExtractError::HeaderNotFound`] when no header row is found and
/// [`ExtractError::MissingNameColumn`] when the header lacks a name column.
pub fn extract_deadstock(
    table: &[Vec<String>],
    rules: &DeadstockRules,
) -> Result<Vec<DeadstockRecord>, ExtractError> {
    let header_idx = find_deadstock_header(table, rules).ok_or(ExtractError::HeaderNotFound)?;
    let columns = resolve_deadstock_columns(&table[header_idx], rules)
        .ok_or(ExtractError::MissingNameColumn { row: header_idx })?;

    let records = table[header_idx + 1..]
        .iter()
        .filter_map(|row| {
            let name = name_cell(row, columns.name)?;
            Some(DeadstockRecord {
                name: name.to_string(),
                normalized_name: normalize_name(name),
                stock: read_decimal(row, columns.stock),
                expiry: columns
                    .expiry
                    .and_then(|c| cell(row, c))
                    .unwrap_or_default()
                    .to_string(),
                price: read_decimal(row, columns.price),
            })
        })
        .collect();

    Ok(records)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
