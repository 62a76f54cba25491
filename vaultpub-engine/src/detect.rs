//! Change detection against the sync cache.

use crate::cache::SyncCache;
use vaultpub_types::LocalEntry;

/// Returns the entries that need uploading: those whose cached
/// modification time differs from the current one, including entries
/// never synced. Comparison is exact, no tolerance window. Output order
/// follows input order so fan-out results correlate by position.
pub fn pending_entries<'a, I>(entries: I, cache: &SyncCache) -> Vec<&'a LocalEntry>
where
    I: IntoIterator<Item = &'a LocalEntry>,
{
    entries
        .into_iter()
        .filter(|entry| cache.get(&entry.path) != Some(entry.modified_at))
        .collect()
}
