use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use vaultpub_cli::settings::{JsonCacheStore, Settings};
use vaultpub_engine::{CacheStore, SyncCache};

// ── Settings blob ───────────────────────────────────────────────

#[test]
fn absent_file_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load(&dir.path().join("missing.json")).unwrap();

    assert!(settings.endpoint.is_empty());
    assert!(settings.cache.is_empty());
}

#[test]
fn save_and_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let mut settings = Settings {
        vault_dir: PathBuf::from("/vault"),
        endpoint: "http://localhost/v1/graphql".to_string(),
        admin_secret: "secret".to_string(),
        ..Default::default()
    };
    settings.cache.set("a.md", 100);
    settings.save(&path).unwrap();

    let restored = Settings::load(&path).unwrap();
    assert_eq!(restored.endpoint, "http://localhost/v1/graphql");
    assert_eq!(restored.vault_dir, PathBuf::from("/vault"));
    assert_eq!(restored.cache.get("a.md"), Some(100));
}

#[test]
fn blob_without_cache_field_loads_empty_cache() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{ "endpoint": "http://localhost" }"#).unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.endpoint, "http://localhost");
    assert!(settings.cache.is_empty());
}

#[test]
fn malformed_blob_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(Settings::load(&path).is_err());
}

// ── Cache store over the blob ───────────────────────────────────

#[test]
fn cache_store_loads_empty_when_blob_is_absent() {
    let dir = TempDir::new().unwrap();
    let store = JsonCacheStore::new(dir.path().join("settings.json"));

    assert!(store.load().unwrap().is_empty());
}

#[test]
fn cache_store_saves_without_touching_other_settings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");

    let settings = Settings {
        endpoint: "http://localhost/v1/graphql".to_string(),
        ..Default::default()
    };
    settings.save(&path).unwrap();

    let store = JsonCacheStore::new(path.clone());
    let mut cache = SyncCache::new();
    cache.set("a.md", 100);
    store.save(&cache).unwrap();

    assert_eq!(store.load().unwrap().get("a.md"), Some(100));
    let reloaded = Settings::load(&path).unwrap();
    assert_eq!(reloaded.endpoint, "http://localhost/v1/graphql");
    assert_eq!(reloaded.cache.get("a.md"), Some(100));
}
