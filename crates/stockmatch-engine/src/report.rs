//! Tabular relocation report: one row per match result, one usage column per
//! store.

use std::io;

use serde::Serialize;
use stockmatch_core::{MatchResult, StoreEntry, UsageCell};

const FIXED_HEADERS: [&str; 6] = ["提供店舗", "薬品名", "在庫数", "使用期限", "薬価", "在庫金額"];

/// A single report cell. Serializes as a bare string or number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportCell {
    Text(String),
    Number(f64),
}

impl ReportCell {
    fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
        }
    }
}

impl From<&UsageCell> for ReportCell {
    fn from(cell: &UsageCell) -> Self {
        match cell {
            UsageCell::Quantity(q) => Self::Number(*q),
            UsageCell::Own | UsageCell::Unknown => Self::Text(cell.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<ReportCell>>,
}

impl ReportTable {
    /// Writes the header row followed by every data row as CSV.
    ///
    /// # Errors
    ///
    /// Returns [`csv::Error`] if writing to `writer` fails.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(&self.headers)?;
        for row in &self.rows {
            out.write_record(row.iter().map(ReportCell::render))?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Builds the report for `matches`. Usage columns follow `stores` order and
/// are headed `"{store} (使用量)"`.
#[must_use]
pub fn build_report(stores: &[StoreEntry], matches: &[MatchResult]) -> ReportTable {
    let headers = FIXED_HEADERS
        .iter()
        .map(|h| (*h).to_string())
        .chain(stores.iter().map(|s| format!("{} (使用量)", s.name)))
        .collect();

    let rows = matches
        .iter()
        .map(|m| {
            let mut row = vec![
                ReportCell::Text(m.provider_store.clone()),
                ReportCell::Text(m.item_name.clone()),
                ReportCell::Number(m.stock),
                ReportCell::Text(m.expiry.clone()),
                ReportCell::Number(m.price),
                ReportCell::Number(m.value()),
            ];
            // A store missing from the result's map renders as an empty cell.
            row.extend(stores.iter().map(|s| {
                m.usage_for(&s.name)
                    .map_or_else(|| ReportCell::Text(String::new()), ReportCell::from)
            }));
            row
        })
        .collect();

    ReportTable { headers, rows }
}

#[cfg(test)]
mod tests {
    use stockmatch_core::{Presence, StoreUsage};

    use super::*;

    fn entry(name: &str) -> StoreEntry {
        StoreEntry {
            name: name.to_string(),
            deadstock: None,
            usage: None,
            presence: Presence::default(),
        }
    }

    fn sample() -> (Vec<StoreEntry>, Vec<MatchResult>) {
        let stores = vec![entry("A"), entry("B"), entry("C")];
        let matches = vec![MatchResult {
            provider_store: "A".to_string(),
            item_name: "アスピリン".to_string(),
            stock: 10.0,
            expiry: "2026/03".to_string(),
            price: 100.0,
            usage_by_store: vec![
                StoreUsage {
                    store: "A".to_string(),
                    cell: UsageCell::Own,
                },
                StoreUsage {
                    store: "B".to_string(),
                    cell: UsageCell::Quantity(5.0),
                },
                StoreUsage {
                    store: "C".to_string(),
                    cell: UsageCell::Unknown,
                },
            ],
        }];
        (stores, matches)
    }

    #[test]
    fn headers_list_fixed_columns_then_stores() {
        let (stores, matches) = sample();
        let report = build_report(&stores, &matches);
        assert_eq!(
            report.headers,
            vec![
                "提供店舗",
                "薬品名",
                "在庫数",
                "使用期限",
                "薬価",
                "在庫金額",
                "A (使用量)",
                "B (使用量)",
                "C (使用量)",
            ]
        );
    }

    #[test]
    fn csv_renders_usage_markers() {
        let (stores, matches) = sample();
        let mut buf = Vec::new();
        build_report(&stores, &matches).write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "A,アスピリン,10,2026/03,100,1000,-,5,?");
    }

    #[test]
    fn json_keeps_numbers_numeric() {
        let (stores, matches) = sample();
        let json = serde_json::to_value(build_report(&stores, &matches)).unwrap();
        assert_eq!(json["rows"][0][5], serde_json::json!(1000.0));
        assert_eq!(json["rows"][0][6], serde_json::json!("-"));
        assert_eq!(json["rows"][0][7], serde_json::json!(5.0));
    }

    #[test]
    fn empty_match_list_still_has_headers() {
        let report = build_report(&[entry("A")], &[]);
        assert_eq!(report.headers.len(), 7);
        assert!(report.rows.is_empty());
    }
}
