//! Error types for the publish engine.

use thiserror::Error;
use vaultpub_remote::RemoteError;
use vaultpub_source::SourceError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that abort a publish pass.
///
/// Per-item failures (unknown content type, rejected upload, one blob
/// delete) are not represented here; they are logged and skipped.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Enumerating or reading the source tree failed.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// A batch call against a remote store failed.
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    /// Loading or persisting the sync cache failed.
    #[error(transparent)]
    Cache(#[from] crate::cache::CacheStoreError),

    /// A record could not be built from an entry.
    #[error("record error: {0}")]
    Record(#[from] vaultpub_types::Error),
}
