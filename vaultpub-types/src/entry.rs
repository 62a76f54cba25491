//! Local entry types.
//!
//! A `LocalEntry` is one candidate for publication, recomputed on every
//! pass from the source tree. The `path` is the unique key correlating an
//! entry with its remote record and its sync-cache slot.

use serde::{Deserialize, Serialize};

/// What an entry carries.
///
/// Text entries hold their full content inline; binary entries carry no
/// content, their bytes are fetched from the source tree only when an
/// upload is actually needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// A text document with its full content.
    Text {
        /// Full document content.
        content: String,
    },
    /// A binary attachment. Content is read lazily at upload time.
    Binary,
}

/// One local document or attachment candidate for publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalEntry {
    /// Path relative to the source root, with `/` separators.
    /// Unique within one enumeration pass.
    pub path: String,
    /// File name including the extension.
    pub name: String,
    /// File name without the extension.
    pub basename: String,
    /// Extension without the leading dot, empty if none.
    pub extension: String,
    /// Size in bytes.
    pub size: u64,
    /// Creation time, milliseconds since the Unix epoch.
    pub created_at: i64,
    /// Modification time, milliseconds since the Unix epoch.
    /// Compared for exact equality against the sync cache.
    pub modified_at: i64,
    /// Text or binary.
    pub kind: EntryKind,
}

impl LocalEntry {
    /// Returns true for text entries.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self.kind, EntryKind::Text { .. })
    }

    /// Returns the inline content of a text entry, if any.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::Text { content } => Some(content),
            EntryKind::Binary => None,
        }
    }
}
