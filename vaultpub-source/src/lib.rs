//! Source tree enumeration for vaultpub.
//!
//! Provides the boundary between the publish engine and local storage:
//! - [`SourceTree`] — the capability to list entries and read their content
//! - [`FsSourceTree`] — the filesystem implementation over a vault directory
//! - embed-link scanning to discover which attachments a document references
//! - the extension → content-type table used by the binary upload pipeline

mod content_type;
mod error;
mod fs;
mod links;
mod tree;

pub use content_type::content_type_for;
pub use error::{SourceError, SourceResult};
pub use fs::FsSourceTree;
pub use links::embedded_attachment_names;
pub use tree::SourceTree;
