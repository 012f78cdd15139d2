//! Console and file output helpers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use stockmatch_engine::{ReportTable, StoreSummary};

use crate::ReportFormat;

/// Formats a yen amount rounded to the nearest yen with thousands
/// separators, e.g. `¥1,234,567`.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn format_yen(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{sign}¥{grouped}")
}

/// Prints one block per store summary.
pub(crate) fn print_summaries(summaries: &[StoreSummary]) {
    for s in summaries {
        println!("{}", s.store);
        println!("  不動品総額:   {}", format_yen(s.total_value));
        println!("  移動可能金額: {}", format_yen(s.relocatable_value));
        println!("  不動品数:     {} 品目", s.item_count);
    }
}

/// Writes `report` to `path` in `format`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub(crate) fn write_report(
    report: &ReportTable,
    path: &Path,
    format: ReportFormat,
) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create report file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    match format {
        ReportFormat::Csv => report
            .write_csv(&mut writer)
            .with_context(|| format!("failed to write CSV report {}", path.display()))?,
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, report)
                .with_context(|| format!("failed to write JSON report {}", path.display()))?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}
