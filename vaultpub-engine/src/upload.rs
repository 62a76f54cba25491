//! Binary upload pipeline.
//!
//! Uploads pending binary entries to the blob store, all entries
//! in flight concurrently. Failures are per item: an entry with no
//! resolvable content type, an unreadable file or a rejected upload is
//! logged and skipped, and never affects the other entries.

use futures::future::join_all;
use tracing::{info, warn};
use vaultpub_remote::BlobStore;
use vaultpub_source::{content_type_for, SourceTree};
use vaultpub_types::{BlobId, LocalEntry};

/// Uploads each entry's bytes to the blob store.
///
/// The result is aligned with `entries` by index: `Some(blob_id)` for a
/// successful upload, `None` for a skipped entry. Callers must filter
/// the `None`s before building records.
pub async fn upload_pending<S, B>(
    source: &S,
    blobs: &B,
    entries: &[&LocalEntry],
) -> Vec<Option<BlobId>>
where
    S: SourceTree + ?Sized,
    B: BlobStore + ?Sized,
{
    if entries.is_empty() {
        return Vec::new();
    }

    info!("Uploading {} binary entries", entries.len());

    let uploads = entries.iter().map(|entry| async move {
        let Some(content_type) = content_type_for(&entry.extension) else {
            warn!(
                "Skipping {}: no content type for extension {:?}",
                entry.path, entry.extension
            );
            return None;
        };

        let bytes = match source.read_bytes(&entry.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Skipping {}: {e}", entry.path);
                return None;
            }
        };

        match blobs.upload(&entry.name, content_type, &bytes).await {
            Ok(blob_id) => Some(blob_id),
            Err(e) => {
                warn!("Skipping {}: upload rejected: {e}", entry.path);
                None
            }
        }
    });

    let results = join_all(uploads).await;

    let uploaded = results.iter().filter(|r| r.is_some()).count();
    info!("Uploaded {}/{} binary entries", uploaded, entries.len());

    results
}
