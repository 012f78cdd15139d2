//! `analyze`: ingest, match and summarize.

use std::path::{Path, PathBuf};

use stockmatch_core::AppConfig;
use stockmatch_engine::{build_report, match_stores, summarize};

use crate::ingest::{build_options, ingest_roots};
use crate::output::{print_summaries, write_report};
use crate::ReportFormat;

/// Runs the full pipeline over `roots` and prints per-store totals.
///
/// # Errors
///
/// Returns an error if configuration is invalid, a root cannot be walked, or
/// the report cannot be written.
pub(crate) async fn run_analyze(
    config: &AppConfig,
    roots: &[PathBuf],
    rules: Option<&Path>,
    output: Option<&Path>,
    format: ReportFormat,
) -> anyhow::Result<()> {
    let options = build_options(config, rules)?;
    let (registry, _) = ingest_roots(roots, &options).await?;

    if registry.is_empty() {
        println!("no store folders found; expected HudoAddList / ZaikoKin exports");
        return Ok(());
    }

    let matches = match_stores(registry.entries());
    print_summaries(&summarize(registry.entries(), &matches));

    if let Some(path) = output {
        let report = build_report(registry.entries(), &matches);
        write_report(&report, path, format)?;
        println!("wrote {} rows to {}", report.rows.len(), path.display());
    }

    Ok(())
}
