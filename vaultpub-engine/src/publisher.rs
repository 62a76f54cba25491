//! Publish orchestration.
//!
//! Wires the phases together: enumerate, detect, upload, write,
//! reconcile. Phases are barriers, each completing before the next
//! starts, and a pass holds `&mut self`, so two passes can never
//! overlap on one engine.

use crate::cache::{CacheStore, SyncCache};
use crate::detect::pending_entries;
use crate::error::EngineResult;
use crate::reconcile::{reconcile, ReconcileOutcome};
use crate::upload::upload_pending;
use crate::writer::{write_records, PendingRecord};
use std::collections::{HashMap, HashSet};
use tracing::info;
use vaultpub_remote::{BlobStore, RecordStore};
use vaultpub_source::{embedded_attachment_names, SourceTree};
use vaultpub_types::{EntryKind, LocalEntry, RemoteRecord};

/// What one publish pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishSummary {
    /// Text records upserted.
    pub text_records_written: usize,
    /// Binary records upserted (uploads that succeeded end to end).
    pub binary_records_written: usize,
    /// Binary entries skipped by per-item failures.
    pub uploads_skipped: usize,
    /// Stale records deleted by reconciliation.
    pub records_deleted: u64,
    /// Orphan blobs deleted by reconciliation.
    pub blobs_deleted: usize,
}

/// The publish engine.
///
/// Holds the source tree, the two remote stores and the sync cache with
/// its persistence boundary. Constructed with [`Publisher::initialize`],
/// driven with [`Publisher::publish`].
pub struct Publisher<S, R, B, C> {
    source: S,
    records: R,
    blobs: B,
    cache_store: C,
    cache: SyncCache,
}

impl<S, R, B, C> Publisher<S, R, B, C>
where
    S: SourceTree,
    R: RecordStore,
    B: BlobStore,
    C: CacheStore,
{
    /// Creates the engine, loading the persisted sync cache.
    ///
    /// Validation of the remote configuration happens when the store
    /// clients are constructed, before they reach this function.
    pub fn initialize(source: S, records: R, blobs: B, cache_store: C) -> EngineResult<Self> {
        let cache = cache_store.load()?;
        Ok(Self {
            source,
            records,
            blobs,
            cache_store,
            cache,
        })
    }

    /// Returns the current sync cache.
    #[must_use]
    pub fn cache(&self) -> &SyncCache {
        &self.cache
    }

    /// Runs one full publish pass.
    pub async fn publish(&mut self) -> EngineResult<PublishSummary> {
        let entries = self.source.list_entries().await?;

        // Split the enumeration: publishable documents on one side, an
        // attachment pool keyed by name on the other (last one wins on
        // duplicate names).
        let mut documents: Vec<&LocalEntry> = Vec::new();
        let mut attachment_pool: HashMap<&str, &LocalEntry> = HashMap::new();
        for entry in &entries {
            match &entry.kind {
                EntryKind::Text { .. } => documents.push(entry),
                EntryKind::Binary => {
                    attachment_pool.insert(entry.name.as_str(), entry);
                }
            }
        }

        // Attachments are publishable iff a publishable document embeds
        // them, in document order, first reference wins.
        let mut attachments: Vec<&LocalEntry> = Vec::new();
        let mut seen_paths: HashSet<&str> = HashSet::new();
        for document in &documents {
            let Some(content) = document.content() else {
                continue;
            };
            for name in embedded_attachment_names(content) {
                if let Some(attachment) = attachment_pool.get(name.as_str()) {
                    if seen_paths.insert(attachment.path.as_str()) {
                        attachments.push(attachment);
                    }
                }
            }
        }

        info!(
            "Publishing: {} documents, {} referenced attachments",
            documents.len(),
            attachments.len()
        );

        // Phase: text records.
        let pending_documents = pending_entries(documents.iter().copied(), &self.cache);
        let mut text_batch = Vec::with_capacity(pending_documents.len());
        for entry in &pending_documents {
            if let EntryKind::Text { content } = &entry.kind {
                text_batch.push(PendingRecord {
                    record: RemoteRecord::text(entry, content.clone())?,
                    modified_at: entry.modified_at,
                });
            }
        }
        write_records(&self.records, &self.cache_store, &mut self.cache, &text_batch).await?;

        // Phase: binary uploads, then their records.
        let pending_attachments = pending_entries(attachments.iter().copied(), &self.cache);
        let blob_ids = upload_pending(&self.source, &self.blobs, &pending_attachments).await;

        let mut binary_batch = Vec::new();
        for (entry, blob_id) in pending_attachments.iter().zip(&blob_ids) {
            if let Some(blob_id) = blob_id {
                binary_batch.push(PendingRecord {
                    record: RemoteRecord::binary(entry, blob_id.clone())?,
                    modified_at: entry.modified_at,
                });
            }
        }
        write_records(&self.records, &self.cache_store, &mut self.cache, &binary_batch).await?;

        // Phase: reconciliation, after every upload of this pass.
        let local_paths: HashSet<String> = documents
            .iter()
            .chain(attachments.iter())
            .map(|entry| entry.path.clone())
            .collect();
        let outcome: ReconcileOutcome = reconcile(
            &self.records,
            &self.blobs,
            &self.cache_store,
            &mut self.cache,
            &local_paths,
        )
        .await?;

        let summary = PublishSummary {
            text_records_written: text_batch.len(),
            binary_records_written: binary_batch.len(),
            uploads_skipped: pending_attachments.len() - binary_batch.len(),
            records_deleted: outcome.records_deleted,
            blobs_deleted: outcome.blobs_deleted,
        };

        info!(
            "Publish complete: {} text, {} binary, {} skipped, {} records and {} blobs removed",
            summary.text_records_written,
            summary.binary_records_written,
            summary.uploads_skipped,
            summary.records_deleted,
            summary.blobs_deleted
        );

        Ok(summary)
    }
}
