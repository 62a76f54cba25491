//! Sync cache — which entries are already current remotely.
//!
//! Maps entry path to the modification time last written to the remote
//! store. A path is present iff a remote record was successfully written
//! for it and that write has not been invalidated by deletion. The cache
//! is a conservative lower bound on remote state: losing an advancement
//! (crash between remote write and persistence) costs a redundant
//! re-upload, never data.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Persisted path → last-synced modification time mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncCache {
    #[serde(default)]
    entries: HashMap<String, i64>,
}

impl SyncCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last-synced modification time for a path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<i64> {
        self.entries.get(path).copied()
    }

    /// Records that `path` was synced at `modified_at`.
    pub fn set(&mut self, path: impl Into<String>, modified_at: i64) {
        self.entries.insert(path.into(), modified_at);
    }

    /// Forgets a path, typically after its remote record was deleted.
    pub fn remove(&mut self, path: &str) {
        self.entries.remove(path);
    }

    /// Drops every entry. The next pass re-uploads everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of tracked paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no path is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over tracked paths.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Errors from the cache persistence boundary.
#[derive(Debug, Error)]
pub enum CacheStoreError {
    #[error("failed to load sync cache: {0}")]
    Load(String),

    #[error("failed to save sync cache: {0}")]
    Save(String),
}

/// Persistence boundary for the sync cache.
///
/// The cache lives inside a larger settings blob owned by the host; the
/// engine only loads it once at initialization and saves it after each
/// phase that mutates it. An absent cache loads as empty.
pub trait CacheStore: Send + Sync {
    /// Loads the persisted cache, empty when none exists yet.
    fn load(&self) -> Result<SyncCache, CacheStoreError>;

    /// Persists the cache as one unit.
    fn save(&self, cache: &SyncCache) -> Result<(), CacheStoreError>;
}
