//! Source tree abstraction trait.

use crate::error::SourceResult;
use async_trait::async_trait;
use vaultpub_types::LocalEntry;

/// Abstract source of publishable entries.
///
/// One enumeration pass produces every candidate under the configured
/// root: text entries (already filtered to those marked publishable,
/// carrying full content) and binary entries (no content; bytes are
/// fetched with [`read_bytes`](SourceTree::read_bytes) only when an
/// upload is needed).
#[async_trait]
pub trait SourceTree: Send + Sync {
    /// Lists all entries under the configured root.
    ///
    /// Enumeration order is not significant to correctness but must be
    /// stable within one pass.
    async fn list_entries(&self) -> SourceResult<Vec<LocalEntry>>;

    /// Reads the full text content of an entry by its path.
    async fn read_text(&self, path: &str) -> SourceResult<String>;

    /// Reads the raw bytes of an entry by its path.
    async fn read_bytes(&self, path: &str) -> SourceResult<Vec<u8>>;
}
