use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One product's consumption quantity at one store over the export's
/// reporting window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Product name exactly as it appears in the source row.
    pub name: String,
    /// Comparison key derived from `name`; never displayed.
    pub normalized_name: String,
    /// Parsed quantity, `0.0` when the source cell is absent or unparseable.
    pub usage: f64,
}

/// One unsold product lot held by a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadstockRecord {
    pub name: String,
    pub normalized_name: String,
    pub stock: f64,
    /// Opaque display text copied from the export, e.g. `"2026/03/31"`.
    pub expiry: String,
    /// Unit price.
    pub price: f64,
}

impl DeadstockRecord {
    /// Monetary value of the lot (`stock * price`).
    #[must_use]
    pub fn value(&self) -> f64 {
        self.stock * self.price
    }
}

/// The two kinds of export a store folder can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileRole {
    Deadstock,
    Usage,
}

impl std::fmt::Display for FileRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileRole::Deadstock => write!(f, "deadstock"),
            FileRole::Usage => write!(f, "usage"),
        }
    }
}

/// Whether a file of each role was found in the store's folder, independent
/// of whether any records could be extracted from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presence {
    pub deadstock: bool,
    pub usage: bool,
}

/// Everything known about one store after an ingestion batch.
///
/// A `None` list means the role's data is absent for this store (file missing,
/// unreadable, or without a recognizable header). It is a handled state, not
/// an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreEntry {
    pub name: String,
    pub deadstock: Option<Vec<DeadstockRecord>>,
    pub usage: Option<Vec<UsageRecord>>,
    pub presence: Presence,
}

impl StoreEntry {
    #[must_use]
    pub fn deadstock_count(&self) -> usize {
        self.deadstock.as_ref().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn usage_count(&self) -> usize {
        self.usage.as_ref().map_or(0, Vec::len)
    }
}

/// Usage of a dead-stock item's product at one store.
///
/// Serializes as `"-"` for [`UsageCell::Own`], `"?"` for
/// [`UsageCell::Unknown`], and a bare number for [`UsageCell::Quantity`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UsageCell {
    /// The provider store itself; never a relocation target.
    Own,
    /// The store has no usage data ingested at all.
    Unknown,
    /// A resolved lookup; `0.0` when the product was not found.
    Quantity(f64),
}

impl UsageCell {
    /// Returns the quantity when this cell is a positive resolved lookup.
    #[must_use]
    pub fn positive_quantity(&self) -> Option<f64> {
        match *self {
            UsageCell::Quantity(q) if q > 0.0 => Some(q),
            _ => None,
        }
    }
}

impl std::fmt::Display for UsageCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UsageCell::Own => write!(f, "-"),
            UsageCell::Unknown => write!(f, "?"),
            UsageCell::Quantity(q) => write!(f, "{q}"),
        }
    }
}

impl Serialize for UsageCell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            UsageCell::Own => serializer.serialize_str("-"),
            UsageCell::Unknown => serializer.serialize_str("?"),
            UsageCell::Quantity(q) => serializer.serialize_f64(*q),
        }
    }
}

impl<'de> Deserialize<'de> for UsageCell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Marker(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(q) => Ok(UsageCell::Quantity(q)),
            Raw::Marker(m) if m == "-" => Ok(UsageCell::Own),
            Raw::Marker(m) if m == "?" => Ok(UsageCell::Unknown),
            Raw::Marker(m) => Err(serde::de::Error::custom(format!(
                "unknown usage marker {m:?}; expected \"-\", \"?\" or a number"
            ))),
        }
    }
}

/// One column of a [`MatchResult`]'s cross-store usage matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreUsage {
    pub store: String,
    pub cell: UsageCell,
}

/// Relocation candidates for one dead-stock record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub provider_store: String,
    pub item_name: String,
    pub stock: f64,
    pub expiry: String,
    pub price: f64,
    /// One entry per known store in registry order, the provider included.
    pub usage_by_store: Vec<StoreUsage>,
}

impl MatchResult {
    /// Looks up the usage cell recorded for `store`.
    #[must_use]
    pub fn usage_for(&self, store: &str) -> Option<&UsageCell> {
        self.usage_by_store
            .iter()
            .find(|u| u.store == store)
            .map(|u| &u.cell)
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.stock * self.price
    }

    /// Returns `true` if at least one store other than the provider shows a
    /// positive resolved usage for this item.
    #[must_use]
    pub fn has_relocation_target(&self) -> bool {
        self.usage_by_store
            .iter()
            .filter(|u| u.store != self.provider_store)
            .any(|u| u.cell.positive_quantity().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(cells: Vec<(&str, UsageCell)>) -> MatchResult {
        MatchResult {
            provider_store: "A".to_string(),
            item_name: "アスピリン".to_string(),
            stock: 10.0,
            expiry: String::new(),
            price: 100.0,
            usage_by_store: cells
                .into_iter()
                .map(|(store, cell)| StoreUsage {
                    store: store.to_string(),
                    cell,
                })
                .collect(),
        }
    }

    #[test]
    fn usage_cell_display_markers() {
        assert_eq!(UsageCell::Own.to_string(), "-");
        assert_eq!(UsageCell::Unknown.to_string(), "?");
        assert_eq!(UsageCell::Quantity(5.0).to_string(), "5");
        assert_eq!(UsageCell::Quantity(2.5).to_string(), "2.5");
    }

    #[test]
    fn usage_cell_serializes_markers_and_numbers() {
        let json = serde_json::to_string(&vec![
            UsageCell::Own,
            UsageCell::Unknown,
            UsageCell::Quantity(12.0),
        ])
        .unwrap();
        assert_eq!(json, r#"["-","?",12.0]"#);
    }

    #[test]
    fn usage_cell_deserializes_markers_and_numbers() {
        let cells: Vec<UsageCell> = serde_json::from_str(r#"["-","?",3]"#).unwrap();
        assert_eq!(
            cells,
            vec![UsageCell::Own, UsageCell::Unknown, UsageCell::Quantity(3.0)]
        );
    }

    #[test]
    fn usage_cell_rejects_unknown_marker() {
        let err = serde_json::from_str::<UsageCell>(r#""x""#).unwrap_err();
        assert!(err.to_string().contains("unknown usage marker"));
    }

    #[test]
    fn relocation_target_requires_positive_other_store() {
        let m = result_with(vec![
            ("A", UsageCell::Own),
            ("B", UsageCell::Quantity(0.0)),
            ("C", UsageCell::Unknown),
        ]);
        assert!(!m.has_relocation_target());

        let m = result_with(vec![("A", UsageCell::Own), ("B", UsageCell::Quantity(5.0))]);
        assert!(m.has_relocation_target());
    }

    #[test]
    fn relocation_target_ignores_provider_column() {
        // A malformed matrix with a quantity in the provider column still
        // does not count the provider as its own target.
        let m = result_with(vec![("A", UsageCell::Quantity(9.0)), ("B", UsageCell::Unknown)]);
        assert!(!m.has_relocation_target());
    }

    #[test]
    fn usage_for_finds_store_column() {
        let m = result_with(vec![("A", UsageCell::Own), ("B", UsageCell::Quantity(5.0))]);
        assert_eq!(m.usage_for("B"), Some(&UsageCell::Quantity(5.0)));
        assert_eq!(m.usage_for("Z"), None);
        assert!((m.value() - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn store_entry_counts_treat_none_as_zero() {
        let entry = StoreEntry {
            name: "Sano".to_string(),
            deadstock: None,
            usage: Some(vec![UsageRecord {
                name: "x".to_string(),
                normalized_name: "x".to_string(),
                usage: 1.0,
            }]),
            presence: Presence {
                deadstock: true,
                usage: true,
            },
        };
        assert_eq!(entry.deadstock_count(), 0);
        assert_eq!(entry.usage_count(), 1);
    }
}
