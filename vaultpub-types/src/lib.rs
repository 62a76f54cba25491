//! Core type definitions for vaultpub.
//!
//! This crate defines the plain data types shared by every other crate:
//! - Local entries (one document or attachment candidate for publication)
//! - Remote records (the persisted representation of an entry)
//! - Blob identifiers assigned by the remote blob store
//!
//! Everything that talks to the filesystem or the network lives in the
//! `vaultpub-source` and `vaultpub-remote` crates, not here.

mod entry;
mod record;

pub use entry::{EntryKind, LocalEntry};
pub use record::{rfc3339_millis, BlobId, RemoteRecord};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("timestamp out of range: {0} ms")]
    TimestampOutOfRange(i64),
}
