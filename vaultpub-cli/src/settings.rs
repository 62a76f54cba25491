//! Settings persistence.
//!
//! One JSON blob holds the remote configuration and the sync cache. An
//! absent file loads as defaults and an absent cache as empty, so the
//! first publish after a fresh install simply uploads everything.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use vaultpub_engine::{CacheStore, CacheStoreError, SyncCache};

/// Persisted application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root of the local vault to publish.
    pub vault_dir: PathBuf,
    /// GraphQL endpoint of the record store.
    pub endpoint: String,
    /// Base URL of the blob store API.
    pub blob_base_url: String,
    /// Administrative secret for both stores.
    pub admin_secret: String,
    /// Webhook POSTed by the `deploy` command.
    pub deploy_hook: String,
    /// Directory copied by the `export` command.
    pub public_dir: PathBuf,
    /// Destination of the `export` command.
    pub export_dir: PathBuf,
    /// Sync cache, advanced by the publish engine.
    pub cache: SyncCache,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_dir: PathBuf::from("."),
            endpoint: String::new(),
            blob_base_url: String::new(),
            admin_secret: String::new(),
            deploy_hook: String::new(),
            public_dir: PathBuf::from("Public"),
            export_dir: PathBuf::new(),
            cache: SyncCache::new(),
        }
    }
}

impl Settings {
    /// Default settings file location.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vaultpub")
            .join("settings.json")
    }

    /// Loads settings from `path`, defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse settings file {}", path.display()))
    }

    /// Saves settings to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create settings directory {}", parent.display())
            })?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
            .with_context(|| format!("failed to write settings file {}", path.display()))
    }
}

/// Cache persistence over the settings blob: every save rewrites the
/// blob with the new cache, leaving the other settings untouched.
pub struct JsonCacheStore {
    path: PathBuf,
}

impl JsonCacheStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CacheStore for JsonCacheStore {
    fn load(&self) -> Result<SyncCache, CacheStoreError> {
        let settings =
            Settings::load(&self.path).map_err(|e| CacheStoreError::Load(e.to_string()))?;
        Ok(settings.cache)
    }

    fn save(&self, cache: &SyncCache) -> Result<(), CacheStoreError> {
        let mut settings =
            Settings::load(&self.path).map_err(|e| CacheStoreError::Save(e.to_string()))?;
        settings.cache = cache.clone();
        settings
            .save(&self.path)
            .map_err(|e| CacheStoreError::Save(e.to_string()))
    }
}
