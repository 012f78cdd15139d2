//! The store registry: every store known to the current session, keyed by
//! resolved store name.
//!
//! The registry is owned by its caller and mutated only through `&mut self`,
//! so there is exactly one writer. Concurrency lives in the extraction stage:
//! folders are extracted in parallel, then their entries are upserted one at
//! a time in folder order.

use std::collections::HashMap;
use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use stockmatch_core::StoreEntry;

use crate::batch::{group_by_folder, FolderBatch};
use crate::decode::SourceFile;
use crate::folder::extract_folder;
use crate::options::IngestOptions;

/// Result of an [`StoreRegistry::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    /// An entry with the same name existed and was replaced wholesale.
    Replaced,
}

/// What one folder contributed to an ingestion batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderOutcome {
    pub folder: String,
    /// Resolved store name the folder was upserted under.
    pub store: String,
    /// Record counts; `None` when the role's data is absent.
    pub deadstock: Option<usize>,
    pub usage: Option<usize>,
    pub upsert: Upsert,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Folders that produced a store entry, in folder order.
    pub folders: Vec<FolderOutcome>,
    /// Folders that contained neither role file.
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreRegistry {
    entries: Vec<StoreEntry>,
    index: HashMap<String, usize>,
}

impl StoreRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `entry`, or replaces the entry with the same name in place.
    /// A replaced entry keeps its original position in iteration order.
    pub fn upsert(&mut self, entry: StoreEntry) -> Upsert {
        if let Some(&idx) = self.index.get(&entry.name) {
            self.entries[idx] = entry;
            Upsert::Replaced
        } else {
            self.index.insert(entry.name.clone(), self.entries.len());
            self.entries.push(entry);
            Upsert::Inserted
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StoreEntry> {
        self.index.get(name).map(|&idx| &self.entries[idx])
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[StoreEntry] {
        &self.entries
    }

    pub fn store_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clears every entry.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Ingests a flat upload, grouping files into folders by the penultimate
    /// segment of their relative path.
    pub async fn ingest(
        &mut self,
        files: Vec<SourceFile>,
        options: &IngestOptions,
    ) -> IngestSummary {
        let batches = group_by_folder(files);
        self.ingest_batches(&batches, options).await
    }

    /// Ingests `files` as a single folder named `folder_name`, regardless of
    /// their relative paths.
    pub async fn ingest_folder(
        &mut self,
        folder_name: &str,
        files: Vec<SourceFile>,
        options: &IngestOptions,
    ) -> IngestSummary {
        let batch = FolderBatch {
            folder: folder_name.to_string(),
            files,
        };
        self.ingest_batches(std::slice::from_ref(&batch), options).await
    }

    async fn ingest_batches(
        &mut self,
        batches: &[FolderBatch],
        options: &IngestOptions,
    ) -> IngestSummary {
        let max_concurrent = options.max_concurrent_folders.max(1);

        // `buffered` yields in input order, so upserts below apply in folder
        // order no matter which extraction finishes first.
        let extracted: Vec<(&FolderBatch, Option<StoreEntry>)> = stream::iter(batches)
            .map(|batch| async move { (batch, extract_folder(batch, options).await) })
            .buffered(max_concurrent)
            .collect()
            .await;

        let mut summary = IngestSummary::default();
        let mut seen_this_batch: HashSet<String> = HashSet::new();

        for (batch, entry) in extracted {
            let Some(entry) = entry else {
                summary.skipped.push(batch.folder.clone());
                continue;
            };

            if !seen_this_batch.insert(entry.name.clone()) {
                tracing::warn!(
                    folder = %batch.folder,
                    store = %entry.name,
                    "store name already produced by another folder in this batch; overwriting"
                );
            }

            let folder = batch.folder.clone();
            let store = entry.name.clone();
            let deadstock = entry.deadstock.as_ref().map(Vec::len);
            let usage = entry.usage.as_ref().map(Vec::len);

            let upsert = self.upsert(entry);
            tracing::info!(
                folder = %folder,
                store = %store,
                deadstock = ?deadstock,
                usage = ?usage,
                replaced = upsert == Upsert::Replaced,
                "store ingested"
            );
            summary.folders.push(FolderOutcome {
                folder,
                store,
                deadstock,
                usage,
                upsert,
            });
        }

        summary
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
