use encoding_rs::{Encoding, SHIFT_JIS};
use stockmatch_core::{AppConfig, ExtractionRules};

use crate::decode::resolve_encoding;
use crate::error::IngestError;

/// Everything an ingestion batch needs besides the files themselves.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub rules: ExtractionRules,
    pub fallback_encoding: &'static Encoding,
    pub delimiter: u8,
    /// Upper bound on folders extracted at the same time.
    pub max_concurrent_folders: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            rules: ExtractionRules::default(),
            fallback_encoding: SHIFT_JIS,
            delimiter: b',',
            max_concurrent_folders: 4,
        }
    }
}

impl IngestOptions {
    /// Builds options from the process config and already-resolved rules.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::UnknownEncoding`] if the configured fallback
    /// encoding label is not recognized.
    pub fn from_app_config(
        config: &AppConfig,
        rules: ExtractionRules,
    ) -> Result<Self, IngestError> {
        Ok(Self {
            rules,
            fallback_encoding: resolve_encoding(&config.fallback_encoding)?,
            delimiter: config.csv_delimiter,
            max_concurrent_folders: config.max_concurrent_folders.max(1),
        })
    }
}
