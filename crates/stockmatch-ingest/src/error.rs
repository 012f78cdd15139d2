use stockmatch_core::FileRole;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// The file's bytes could not be read. Fatal for that file only.
    #[error("failed to read {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown encoding label \"{0}\"")]
    UnknownEncoding(String),

    #[error("failed to parse table in {path}: {source}")]
    Table {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("{role} extraction failed for {path}: {source}")]
    Extraction {
        path: String,
        role: FileRole,
        #[source]
        source: ExtractError,
    },
}

/// Why a parsed table produced no records for its role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("no header row matched the configured labels")]
    HeaderNotFound,

    #[error("header row {row} has no product-name column")]
    MissingNameColumn { row: usize },
}
