//! Publish engine for vaultpub.
//!
//! One `publish` pass pushes the publishable subset of a local vault to
//! the remote record and blob stores and removes whatever the vault no
//! longer backs:
//!
//! 1. **Enumerate** — the source tree lists publishable documents and the
//!    attachments they embed.
//! 2. **Detect** — entries whose modification time differs from the sync
//!    cache need uploading; everything else is already current remotely.
//! 3. **Upload** — binary entries go to the blob store first, one
//!    concurrent upload per entry, failures isolated per item.
//! 4. **Write** — records are batch-upserted by path; the sync cache
//!    advances only after the store acknowledges the write.
//! 5. **Reconcile** — remote records without a local counterpart are
//!    deleted, then blobs no remaining record references.
//!
//! Phases are barriers: each completes fully before the next starts, and
//! per-entry results correlate back to their inputs by position. The sync
//! cache is the only mutable state and is passed explicitly through the
//! phases, so the engine can be exercised with injected cache contents.

pub mod cache;
pub mod detect;
mod error;
pub mod publisher;
pub mod reconcile;
pub mod upload;
pub mod writer;

pub use cache::{CacheStore, CacheStoreError, SyncCache};
pub use error::{EngineError, EngineResult};
pub use publisher::{PublishSummary, Publisher};
pub use reconcile::ReconcileOutcome;
pub use writer::PendingRecord;
