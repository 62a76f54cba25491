//! Reconciliation — remote garbage collection.
//!
//! Runs after all uploads so records written this pass are never taken
//! for stale. Deletion decisions compare against the local entry set
//! enumerated this pass, never against the sync cache.

use crate::cache::{CacheStore, SyncCache};
use crate::error::EngineResult;
use futures::future::join_all;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use vaultpub_remote::{BlobStore, RecordStore};
use vaultpub_types::BlobId;

/// What a reconciliation pass removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Stale records deleted from the record store.
    pub records_deleted: u64,
    /// Orphaned blobs deleted from the blob store.
    pub blobs_deleted: usize,
}

/// Deletes remote records whose path has no local counterpart, prunes
/// the sync cache for them, then deletes blobs no remaining record
/// references.
///
/// Record deletion is a single batch: if it fails the cache is left
/// untouched and the same paths are retried next pass. Blob deletions
/// are independent; one failure is logged and the rest proceed, and a
/// blob already absent counts as deleted.
pub async fn reconcile<R, B, C>(
    records: &R,
    blobs: &B,
    cache_store: &C,
    cache: &mut SyncCache,
    local_paths: &HashSet<String>,
) -> EngineResult<ReconcileOutcome>
where
    R: RecordStore + ?Sized,
    B: BlobStore + ?Sized,
    C: CacheStore + ?Sized,
{
    let record_refs = records.fetch_record_refs().await?;
    let all_blob_ids = records.fetch_blob_ids().await?;

    debug!(
        "Reconciling: {} local paths, {} remote records, {} blobs",
        local_paths.len(),
        record_refs.len(),
        all_blob_ids.len()
    );

    let stale_paths: Vec<String> = record_refs
        .iter()
        .filter(|r| !local_paths.contains(&r.path))
        .map(|r| r.path.clone())
        .collect();

    let mut records_deleted = 0;
    if stale_paths.is_empty() {
        debug!("No stale records");
    } else {
        records_deleted = records.delete_records(&stale_paths).await?;
        for path in &stale_paths {
            cache.remove(path);
        }
        cache_store.save(cache)?;
        info!("Deleted {} stale records", records_deleted);
    }

    // Blob references of the records that survived the delete above.
    let stale: HashSet<&str> = stale_paths.iter().map(String::as_str).collect();
    let referenced: HashSet<&BlobId> = record_refs
        .iter()
        .filter(|r| !stale.contains(r.path.as_str()))
        .filter_map(|r| r.blob_id.as_ref())
        .collect();

    let orphans: Vec<&BlobId> = all_blob_ids
        .iter()
        .filter(|id| !referenced.contains(id))
        .collect();

    let deletions = orphans.iter().map(|id| async move {
        match blobs.delete(id).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to delete orphan blob {id}: {e}");
                false
            }
        }
    });
    let blobs_deleted = join_all(deletions).await.into_iter().filter(|ok| *ok).count();

    if !orphans.is_empty() {
        info!("Deleted {}/{} orphan blobs", blobs_deleted, orphans.len());
    }

    Ok(ReconcileOutcome {
        records_deleted,
        blobs_deleted,
    })
}
