//! Dead-stock to usage matching across every known store.

use stockmatch_core::{DeadstockRecord, MatchResult, StoreEntry, StoreUsage, UsageCell};

/// Usage cell of `target` for one dead-stock record offered by `provider`.
fn usage_cell(provider: &str, target: &StoreEntry, record: &DeadstockRecord) -> UsageCell {
    if target.name == provider {
        return UsageCell::Own;
    }
    match &target.usage {
        None => UsageCell::Unknown,
        Some(usage) => UsageCell::Quantity(
            usage
                .iter()
                .find(|u| u.normalized_name == record.normalized_name)
                .map_or(0.0, |u| u.usage),
        ),
    }
}

/// Builds one [`MatchResult`] per named dead-stock record of every store.
///
/// Results are ordered by provider store (in `stores` order), then by source
/// row. Each result carries one usage cell per store in `stores`, the
/// provider included as [`UsageCell::Own`]. A store whose usage list is
/// absent shows [`UsageCell::Unknown`]; a store with a list but no record of
/// the same normalized name shows `Quantity(0)`.
#[must_use]
pub fn match_stores(stores: &[StoreEntry]) -> Vec<MatchResult> {
    let results: Vec<MatchResult> = stores
        .iter()
        .filter_map(|provider| {
            provider
                .deadstock
                .as_ref()
                .map(|records| (provider.name.as_str(), records))
        })
        .flat_map(|(provider, records)| {
            records
                .iter()
                .filter(|r| !r.name.trim().is_empty())
                .map(move |record| MatchResult {
                    provider_store: provider.to_string(),
                    item_name: record.name.clone(),
                    stock: record.stock,
                    expiry: record.expiry.clone(),
                    price: record.price,
                    usage_by_store: stores
                        .iter()
                        .map(|target| StoreUsage {
                            store: target.name.clone(),
                            cell: usage_cell(provider, target, record),
                        })
                        .collect(),
                })
        })
        .collect();

    tracing::debug!(
        stores = stores.len(),
        results = results.len(),
        "matched dead stock across stores"
    );
    results
}
