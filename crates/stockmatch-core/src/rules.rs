//! Label variants and positional fallbacks used to locate header rows and
//! columns in the store exports.
//!
//! The defaults describe the Japanese pharmacy exports the extractor was
//! built against. A YAML file can override any section; omitted fields keep
//! their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// Header discovery rules for the usage (consumption) report.
///
/// Label sets ending in `_labels` or `_markers` match when a cell *contains*
/// one of the variants; `header_exact_markers` must equal the cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageRules {
    /// Tokens marking the cell to the left of the store's display name.
    pub store_labels: Vec<String>,
    /// How many leading rows are scanned for a store label.
    pub store_scan_rows: usize,
    pub name_labels: Vec<String>,
    /// Tokens that, alongside a name label, identify the header row.
    pub header_markers: Vec<String>,
    pub header_exact_markers: Vec<String>,
    pub quantity_labels: Vec<String>,
    /// Column assumed to hold the usage quantity when no quantity label is
    /// found, and consulted when the labelled column reads zero.
    pub fallback_column: usize,
}

impl Default for UsageRules {
    fn default() -> Self {
        Self {
            store_labels: labels(&["店舗"]),
            store_scan_rows: 5,
            name_labels: labels(&["薬品名", "商品名"]),
            header_markers: labels(&["処方数量", "使用量", "レセ電コード"]),
            header_exact_markers: labels(&["No."]),
            quantity_labels: labels(&["処方数量", "使用量", "総使用量"]),
            fallback_column: 20,
        }
    }
}

/// Header discovery rules for the dead-stock report. All matches are exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeadstockRules {
    /// Accepted spellings of the first header cell.
    pub header_first_cell: Vec<String>,
    pub name_labels: Vec<String>,
    pub stock_labels: Vec<String>,
    pub expiry_labels: Vec<String>,
    pub price_labels: Vec<String>,
}

impl Default for DeadstockRules {
    fn default() -> Self {
        Self {
            header_first_cell: labels(&["No.", "No"]),
            name_labels: labels(&["薬品名"]),
            stock_labels: labels(&["在庫数量", "在庫数"]),
            expiry_labels: labels(&["使用期限"]),
            price_labels: labels(&["薬価"]),
        }
    }
}

/// File-name patterns that assign a role to a file inside a store folder.
/// Matching is a case-insensitive substring test on the file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleRules {
    pub deadstock_file_pattern: String,
    pub usage_file_pattern: String,
}

impl Default for RoleRules {
    fn default() -> Self {
        Self {
            deadstock_file_pattern: "hudoaddlist".to_string(),
            usage_file_pattern: "zaikokin".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionRules {
    pub usage: UsageRules,
    pub deadstock: DeadstockRules,
    pub roles: RoleRules,
}

impl ExtractionRules {
    /// Checks that every label set the extractors rely on is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required: [(&str, &[String]); 5] = [
            ("usage.name_labels", self.usage.name_labels.as_slice()),
            ("usage.quantity_labels", self.usage.quantity_labels.as_slice()),
            ("usage.store_labels", self.usage.store_labels.as_slice()),
            ("deadstock.header_first_cell", self.deadstock.header_first_cell.as_slice()),
            ("deadstock.name_labels", self.deadstock.name_labels.as_slice()),
        ];

        for (field, set) in required {
            if set.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{field} must list at least one label"
                )));
            }
            if set.iter().any(|l| l.trim().is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "{field} contains a blank label"
                )));
            }
        }

        if self.usage.store_scan_rows == 0 {
            return Err(ConfigError::Validation(
                "usage.store_scan_rows must be greater than 0".to_string(),
            ));
        }

        for (field, pattern) in [
            ("roles.deadstock_file_pattern", &self.roles.deadstock_file_pattern),
            ("roles.usage_file_pattern", &self.roles.usage_file_pattern),
        ] {
            if pattern.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{field} must be non-empty")));
            }
        }

        if self.roles.deadstock_file_pattern.to_lowercase()
            == self.roles.usage_file_pattern.to_lowercase()
        {
            return Err(ConfigError::Validation(
                "roles.deadstock_file_pattern and roles.usage_file_pattern must differ"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

/// Parse and validate extraction rules from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_rules(content: &str) -> Result<ExtractionRules, ConfigError> {
    let rules: ExtractionRules = serde_yaml::from_str(content)?;
    rules.validate()?;
    Ok(rules)
}

/// Load and validate extraction rules from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_rules(path: &Path) -> Result<ExtractionRules, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RulesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_rules(&content)
}

#[cfg(test)]
#[path = "rules_test.rs"]
mod tests;
