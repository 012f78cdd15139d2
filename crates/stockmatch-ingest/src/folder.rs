//! Per-folder extraction: read, decode, parse, and extract both role files
//! of one store folder into a [`StoreEntry`].
//!
//! Failures are contained to the file they occur in. An unreadable or
//! unparseable file leaves its role list as `None` and is logged; it never
//! fails the folder or its siblings.

use stockmatch_core::{FileRole, Presence, StoreEntry};

use crate::batch::FolderBatch;
use crate::decode::{decode_file, SourceFile};
use crate::error::{ExtractError, IngestError};
use crate::extract::{discover_store_name, extract_deadstock, extract_usage};
use crate::options::IngestOptions;
use crate::table::{parse_table, Table};

/// Reads, decodes and parses one file into a table.
async fn load_table(file: &SourceFile, options: &IngestOptions) -> Result<Table, IngestError> {
    let text = decode_file(file, options.fallback_encoding).await?;
    parse_table(&text, options.delimiter).map_err(|source| IngestError::Table {
        path: file.relative_path.clone(),
        source,
    })
}

async fn load_optional(
    file: Option<&SourceFile>,
    options: &IngestOptions,
) -> Option<Result<Table, IngestError>> {
    match file {
        Some(f) => Some(load_table(f, options).await),
        None => None,
    }
}

fn log_failure(folder: &str, err: &IngestError) {
    match err {
        IngestError::Extraction {
            source: ExtractError::HeaderNotFound,
            ..
        } => tracing::debug!(folder, error = %err, "no records extracted"),
        _ => tracing::warn!(folder, error = %err, "treating file as absent"),
    }
}

/// Turns a parsed table into a role's record list, logging the reason when
/// there is none.
fn records_or_none<T>(
    folder: &str,
    file: &SourceFile,
    role: FileRole,
    extracted: Result<Vec<T>, ExtractError>,
) -> Option<Vec<T>> {
    match extracted {
        Ok(records) => Some(records),
        Err(source) => {
            log_failure(
                folder,
                &IngestError::Extraction {
                    path: file.relative_path.clone(),
                    role,
                    source,
                },
            );
            None
        }
    }
}

/// Extracts one store folder.
///
/// Returns `None` when the folder contains neither a dead-stock nor a usage
/// file. The store name is taken from the usage file when it names one,
/// otherwise from the folder. Both role files are read concurrently and the
/// entry is only returned once both have resolved.
pub async fn extract_folder(batch: &FolderBatch, options: &IngestOptions) -> Option<StoreEntry> {
    let roles = &options.rules.roles;
    let deadstock_file = batch.role_file(FileRole::Deadstock, roles);
    let usage_file = batch.role_file(FileRole::Usage, roles);

    if deadstock_file.is_none() && usage_file.is_none() {
        tracing::debug!(folder = %batch.folder, "skipping folder without store exports");
        return None;
    }

    let (deadstock_table, usage_table) = futures::join!(
        load_optional(deadstock_file, options),
        load_optional(usage_file, options)
    );

    let folder = batch.folder.as_str();
    let mut name = batch.folder.clone();

    let usage = match (usage_file, usage_table) {
        (Some(file), Some(Ok(table))) => {
            if let Some(discovered) = discover_store_name(&table, &options.rules.usage) {
                tracing::debug!(folder, store = %discovered, "store name found in usage report");
                name = discovered;
            }
            records_or_none(
                folder,
                file,
                FileRole::Usage,
                extract_usage(&table, &options.rules.usage),
            )
        }
        (_, Some(Err(err))) => {
            log_failure(folder, &err);
            None
        }
        _ => None,
    };

    let deadstock = match (deadstock_file, deadstock_table) {
        (Some(file), Some(Ok(table))) => records_or_none(
            folder,
            file,
            FileRole::Deadstock,
            extract_deadstock(&table, &options.rules.deadstock),
        ),
        (_, Some(Err(err))) => {
            log_failure(folder, &err);
            None
        }
        _ => None,
    };

    Some(StoreEntry {
        name,
        deadstock,
        usage,
        presence: Presence {
            deadstock: deadstock_file.is_some(),
            usage: usage_file.is_some(),
        },
    })
}
