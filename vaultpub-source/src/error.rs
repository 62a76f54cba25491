//! Error types for source tree operations.

use thiserror::Error;

/// Result type for source tree operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors that can occur while enumerating or reading local entries.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Listing a directory failed.
    #[error("failed to list {path}: {source}")]
    List {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading an entry failed.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
