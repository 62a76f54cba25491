//! Record writer — batch upsert plus cache advancement.

use crate::cache::{CacheStore, SyncCache};
use crate::error::EngineResult;
use tracing::{debug, info};
use vaultpub_remote::RecordStore;
use vaultpub_types::RemoteRecord;

/// A record ready to write, paired with the modification time to store
/// in the sync cache once the write is acknowledged.
#[derive(Debug, Clone)]
pub struct PendingRecord {
    pub record: RemoteRecord,
    pub modified_at: i64,
}

/// Upserts `batch` into the record store and advances the sync cache.
///
/// An empty batch performs no network call. The cache is advanced and
/// persisted (as one unit) only after the store acknowledges the upsert;
/// on failure the cache is untouched and the whole batch is retried on
/// the next pass, which is safe because upserts are idempotent.
pub async fn write_records<R, C>(
    records: &R,
    cache_store: &C,
    cache: &mut SyncCache,
    batch: &[PendingRecord],
) -> EngineResult<u64>
where
    R: RecordStore + ?Sized,
    C: CacheStore + ?Sized,
{
    if batch.is_empty() {
        debug!("No records to write");
        return Ok(0);
    }

    let objects: Vec<RemoteRecord> = batch.iter().map(|p| p.record.clone()).collect();
    let affected = records.upsert_records(&objects).await?;

    for pending in batch {
        cache.set(pending.record.path.clone(), pending.modified_at);
    }
    cache_store.save(cache)?;

    info!("Wrote {} records ({} affected rows)", batch.len(), affected);
    Ok(affected)
}
