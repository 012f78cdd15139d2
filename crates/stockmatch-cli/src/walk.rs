//! Turning on-disk upload roots into [`SourceFile`] batches.

use std::path::{Component, Path};

use anyhow::{bail, Context};
use stockmatch_ingest::SourceFile;
use walkdir::WalkDir;

/// Slash-joined path of `path` below `base`.
fn relative_string(path: &Path, base: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Collects every regular file under `root` as an on-disk [`SourceFile`].
///
/// Relative paths start at the root folder's own name, so uploading
/// `stores/sano` yields `sano/ZaikoKin.csv`. A root that is a single file
/// yields just the file name. Entries are sorted by file name within each
/// directory.
///
/// # Errors
///
/// Returns an error if `root` does not exist or a directory cannot be read.
pub(crate) fn collect_root(root: &Path) -> anyhow::Result<Vec<SourceFile>> {
    if !root.exists() {
        bail!("upload root does not exist: {}", root.display());
    }
    let root = root
        .canonicalize()
        .with_context(|| format!("failed to resolve upload root {}", root.display()))?;
    let base = root.parent().unwrap_or(&root).to_path_buf();

    let mut files = Vec::new();
    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = relative_string(entry.path(), &base);
        files.push(SourceFile::on_disk(relative, entry.path()));
    }

    tracing::debug!(root = %root.display(), files = files.len(), "collected upload root");
    Ok(files)
}
