//! Filesystem implementation of [`SourceTree`].

use crate::error::{SourceError, SourceResult};
use crate::tree::SourceTree;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs;
use tracing::{debug, warn};
use vaultpub_types::{EntryKind, LocalEntry};

/// Front matter fields the publisher cares about.
#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    #[serde(default)]
    publish: bool,
}

/// A vault directory on the local filesystem.
///
/// Markdown files are text entries and are included only when their YAML
/// front matter sets `publish: true`; every other file is a binary entry.
/// Dot-prefixed files and directories are skipped.
pub struct FsSourceTree {
    root: PathBuf,
}

impl FsSourceTree {
    /// Creates a source tree rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the configured root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn absolute(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    async fn entry_for(&self, absolute: &Path, relative: String) -> SourceResult<Option<LocalEntry>> {
        let metadata = fs::metadata(absolute).await.map_err(|source| SourceError::Read {
            path: relative.clone(),
            source,
        })?;

        let name = absolute
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = absolute
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        let basename = absolute
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let modified_at = system_time_ms(metadata.modified().ok()).unwrap_or(0);
        let created_at = system_time_ms(metadata.created().ok()).unwrap_or(modified_at);

        let kind = if extension.eq_ignore_ascii_case("md") {
            let content = fs::read_to_string(absolute).await.map_err(|source| {
                SourceError::Read {
                    path: relative.clone(),
                    source,
                }
            })?;
            if !is_publishable(&relative, &content) {
                return Ok(None);
            }
            EntryKind::Text { content }
        } else {
            EntryKind::Binary
        };

        Ok(Some(LocalEntry {
            path: relative,
            name,
            basename,
            extension,
            size: metadata.len(),
            created_at,
            modified_at,
            kind,
        }))
    }
}

#[async_trait]
impl SourceTree for FsSourceTree {
    async fn list_entries(&self) -> SourceResult<Vec<LocalEntry>> {
        let mut entries = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let dir_display = relative_path(&self.root, &dir);
            let mut reader = fs::read_dir(&dir).await.map_err(|source| SourceError::List {
                path: dir_display.clone(),
                source,
            })?;

            let mut children = Vec::new();
            while let Some(child) = reader.next_entry().await.map_err(|source| SourceError::List {
                path: dir_display.clone(),
                source,
            })? {
                let file_type = child.file_type().await.map_err(|source| SourceError::List {
                    path: dir_display.clone(),
                    source,
                })?;
                children.push((child.path(), file_type.is_dir()));
            }
            // Stable enumeration order regardless of the directory layout.
            children.sort();

            for (child, is_dir) in children {
                let file_name = child
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                if file_name.starts_with('.') {
                    continue;
                }

                if is_dir {
                    pending.push(child);
                    continue;
                }

                let relative = relative_path(&self.root, &child);
                if let Some(entry) = self.entry_for(&child, relative).await? {
                    entries.push(entry);
                }
            }
        }

        debug!("Enumerated {} entries under {}", entries.len(), self.root.display());
        Ok(entries)
    }

    async fn read_text(&self, path: &str) -> SourceResult<String> {
        fs::read_to_string(self.absolute(path))
            .await
            .map_err(|source| SourceError::Read {
                path: path.to_string(),
                source,
            })
    }

    async fn read_bytes(&self, path: &str) -> SourceResult<Vec<u8>> {
        fs::read(self.absolute(path))
            .await
            .map_err(|source| SourceError::Read {
                path: path.to_string(),
                source,
            })
    }
}

fn system_time_ms(time: Option<SystemTime>) -> Option<i64> {
    time.and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_millis() as i64)
}

fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Extracts the YAML front matter block, if the document starts with one.
fn front_matter(content: &str) -> Option<&str> {
    let rest = content.strip_prefix("---")?;
    let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;
    let end = rest.find("\n---")?;
    Some(&rest[..end])
}

fn is_publishable(path: &str, content: &str) -> bool {
    let Some(yaml) = front_matter(content) else {
        return false;
    };
    if yaml.trim().is_empty() {
        return false;
    }
    match serde_yaml::from_str::<FrontMatter>(yaml) {
        Ok(front) => front.publish,
        Err(e) => {
            warn!("Skipping {path}: unparseable front matter: {e}");
            false
        }
    }
}
