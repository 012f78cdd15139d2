//! Ingestion of per-store export folders: decoding, CSV parsing, record
//! extraction and the store registry the matching engine reads from.

pub mod batch;
pub mod decode;
pub mod error;
pub mod extract;
pub mod folder;
pub mod normalize;
pub mod options;
pub(crate) mod parse_helpers;
pub mod registry;
pub mod table;

pub use batch::{group_by_folder, FolderBatch};
pub use decode::{decode_bytes, resolve_encoding, DecodedText, FileBody, SourceFile};
pub use error::{ExtractError, IngestError};
pub use extract::{
    discover_store_name, extract_deadstock, extract_usage, find_deadstock_header,
    find_usage_header,
};
pub use folder::extract_folder;
pub use normalize::normalize_name;
pub use options::IngestOptions;
pub use registry::{FolderOutcome, IngestSummary, StoreRegistry, Upsert};
pub use table::{parse_table, Table};
