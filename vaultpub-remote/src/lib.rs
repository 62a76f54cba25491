//! Remote store clients for vaultpub.
//!
//! Two external boundaries, each behind a trait so the engine can be
//! exercised without a network:
//! - [`RecordStore`] — the record table, reached through a GraphQL admin
//!   endpoint: query paths and blob references, batch upsert by path,
//!   batch delete by path.
//! - [`BlobStore`] — the binary blob store: multipart upload returning an
//!   opaque id, delete by id.
//!
//! Both authenticate with a static administrative secret.

mod blobs;
mod error;
mod records;

pub use blobs::{BlobStore, BlobStoreConfig, HttpBlobStore};
pub use error::{RemoteError, RemoteResult};
pub use records::{GraphqlRecordStore, RecordStore, RecordStoreConfig, RemoteRecordRef};
