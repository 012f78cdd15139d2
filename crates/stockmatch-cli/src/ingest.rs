//! Shared setup for commands that ingest upload roots.

use std::path::{Path, PathBuf};

use anyhow::Context;
use stockmatch_core::AppConfig;
use stockmatch_ingest::{IngestOptions, IngestSummary, StoreRegistry};

use crate::walk::collect_root;

/// Resolves rules and ingestion options from the process config.
///
/// # Errors
///
/// Returns an error if the rules file is unreadable or invalid, or the
/// fallback encoding is unknown.
pub(crate) fn build_options(
    config: &AppConfig,
    rules_override: Option<&Path>,
) -> anyhow::Result<IngestOptions> {
    let rules = stockmatch_core::resolve_rules(config, rules_override)
        .context("failed to load extraction rules")?;
    let options = IngestOptions::from_app_config(config, rules)?;
    Ok(options)
}

/// Ingests each root as its own batch, in order, into a fresh registry.
///
/// # Errors
///
/// Returns an error if a root cannot be walked. Unreadable or malformed
/// files inside a root are logged and do not fail the run.
pub(crate) async fn ingest_roots(
    roots: &[PathBuf],
    options: &IngestOptions,
) -> anyhow::Result<(StoreRegistry, Vec<IngestSummary>)> {
    let mut registry = StoreRegistry::new();
    let mut summaries = Vec::with_capacity(roots.len());

    for root in roots {
        let files = collect_root(root)?;
        let summary = registry.ingest(files, options).await;
        for folder in &summary.skipped {
            tracing::info!(root = %root.display(), folder = %folder, "no store exports in folder");
        }
        summaries.push(summary);
    }

    tracing::info!(stores = registry.len(), batches = roots.len(), "ingestion complete");
    Ok((registry, summaries))
}
