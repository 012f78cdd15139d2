//! `stores`: list what ingestion found per store.

use std::path::{Path, PathBuf};

use stockmatch_core::{AppConfig, StoreEntry};

use crate::ingest::{build_options, ingest_roots};

fn role_status(present: bool, records: Option<usize>) -> String {
    match (present, records) {
        (false, _) => "missing".to_string(),
        (true, None) => "no records".to_string(),
        (true, Some(n)) => format!("{n} rows"),
    }
}

fn store_line(entry: &StoreEntry) -> String {
    format!(
        "{:<24}{:<16}{}",
        entry.name,
        role_status(
            entry.presence.deadstock,
            entry.deadstock.as_ref().map(Vec::len)
        ),
        role_status(entry.presence.usage, entry.usage.as_ref().map(Vec::len)),
    )
}

/// Ingests `roots` and prints one line per resulting store.
///
/// # Errors
///
/// Returns an error if configuration is invalid or a root cannot be walked.
pub(crate) async fn run_stores(
    config: &AppConfig,
    roots: &[PathBuf],
    rules: Option<&Path>,
) -> anyhow::Result<()> {
    let options = build_options(config, rules)?;
    let (registry, summaries) = ingest_roots(roots, &options).await?;

    if registry.is_empty() {
        println!("no store folders found");
        return Ok(());
    }

    println!("{:<24}{:<16}USAGE", "STORE", "DEADSTOCK");
    for entry in registry.entries() {
        println!("{}", store_line(entry));
    }

    let skipped: usize = summaries.iter().map(|s| s.skipped.len()).sum();
    if skipped > 0 {
        println!("{skipped} folder(s) without store exports skipped");
    }
    Ok(())
}
