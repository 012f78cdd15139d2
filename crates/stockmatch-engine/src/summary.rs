//! Per-store monetary summaries of a match run.

use serde::{Deserialize, Serialize};
use stockmatch_core::{MatchResult, StoreEntry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSummary {
    pub store: String,
    /// Dead-stock items the store offers.
    pub item_count: usize,
    /// Σ stock × price over the store's items.
    pub total_value: f64,
    /// The part of `total_value` that some other store actively uses.
    pub relocatable_value: f64,
}

/// Summarizes `matches` for every store in `stores`, in registry order.
/// Stores that offer nothing still appear, with zero totals.
#[must_use]
pub fn summarize(stores: &[StoreEntry], matches: &[MatchResult]) -> Vec<StoreSummary> {
    stores
        .iter()
        .map(|store| {
            let offered = || matches.iter().filter(|m| m.provider_store == store.name);
            StoreSummary {
                store: store.name.clone(),
                item_count: offered().count(),
                total_value: offered().map(MatchResult::value).sum(),
                relocatable_value: offered()
                    .filter(|m| m.has_relocation_target())
                    .map(MatchResult::value)
                    .sum(),
            }
        })
        .collect()
}
