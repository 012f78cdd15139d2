use std::path::PathBuf;

/// Process-level settings read from the environment.
///
/// Extraction label sets live in [`crate::ExtractionRules`]; this struct only
/// points at an optional rules file and carries knobs that apply across all
/// ingestion batches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_level: String,
    pub rules_path: Option<PathBuf>,
    pub max_concurrent_folders: usize,
    /// WHATWG label of the encoding assumed when detection is inconclusive.
    pub fallback_encoding: String,
    pub csv_delimiter: u8,
    /// Overrides [`crate::UsageRules::fallback_column`] when set.
    pub usage_fallback_column: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            rules_path: None,
            max_concurrent_folders: 4,
            fallback_encoding: "Shift_JIS".to_string(),
            csv_delimiter: b',',
            usage_fallback_column: None,
        }
    }
}
