//! Remote record and blob identifier types.
//!
//! `RemoteRecord` is the wire representation upserted into the record
//! store, keyed by `path`. Timestamps are rendered as RFC 3339 strings
//! with millisecond precision.

use crate::{Error, LocalEntry, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier assigned by the remote blob store.
///
/// The store owns the format; clients never parse or synthesize one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobId(String);

impl BlobId {
    /// Wraps a store-assigned identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BlobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The persisted remote representation of a local entry, keyed by `path`.
///
/// Exactly one of `content` (text entries) or `blob_id` (binary entries)
/// is set. Field names match the remote table columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRecord {
    pub basename: String,
    pub extension: String,
    pub name: String,
    pub path: String,
    pub size: u64,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "fileId", skip_serializing_if = "Option::is_none")]
    pub blob_id: Option<BlobId>,
}

impl RemoteRecord {
    /// Builds the record for a text entry with its inline content.
    pub fn text(entry: &LocalEntry, content: String) -> Result<Self> {
        let mut record = Self::from_entry(entry)?;
        record.content = Some(content);
        Ok(record)
    }

    /// Builds the record for a binary entry referencing an uploaded blob.
    pub fn binary(entry: &LocalEntry, blob_id: BlobId) -> Result<Self> {
        let mut record = Self::from_entry(entry)?;
        record.blob_id = Some(blob_id);
        Ok(record)
    }

    fn from_entry(entry: &LocalEntry) -> Result<Self> {
        Ok(Self {
            basename: entry.basename.clone(),
            extension: entry.extension.clone(),
            name: entry.name.clone(),
            path: entry.path.clone(),
            size: entry.size,
            created_at: rfc3339_millis(entry.created_at)?,
            updated_at: rfc3339_millis(entry.modified_at)?,
            content: None,
            blob_id: None,
        })
    }
}

/// Renders a millisecond Unix timestamp as an RFC 3339 string with
/// millisecond precision, e.g. `2024-01-01T00:00:00.000Z`.
pub fn rfc3339_millis(ms: i64) -> Result<String> {
    let dt: DateTime<Utc> =
        DateTime::from_timestamp_millis(ms).ok_or(Error::TimestampOutOfRange(ms))?;
    Ok(dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}
