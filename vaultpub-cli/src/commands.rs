//! Command implementations.

use crate::settings::{JsonCacheStore, Settings};
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use std::time::Duration;
use vaultpub_engine::Publisher;
use vaultpub_remote::{
    BlobStoreConfig, GraphqlRecordStore, HttpBlobStore, RecordStoreConfig,
};
use vaultpub_source::FsSourceTree;

/// Runs one publish pass against the configured remote stores.
pub async fn publish(settings_path: &Path, settings: &Settings) -> Result<()> {
    let source = FsSourceTree::new(&settings.vault_dir);
    let records = GraphqlRecordStore::new(RecordStoreConfig {
        endpoint: settings.endpoint.clone(),
        admin_secret: settings.admin_secret.clone(),
    })?;
    let blobs = HttpBlobStore::new(BlobStoreConfig {
        base_url: settings.blob_base_url.clone(),
        admin_secret: settings.admin_secret.clone(),
    })?;
    let cache_store = JsonCacheStore::new(settings_path.to_path_buf());

    let mut publisher = Publisher::initialize(source, records, blobs, cache_store)?;
    let summary = publisher.publish().await?;

    println!("Published.");
    println!("  {} text records written", summary.text_records_written);
    println!("  {} binary records written", summary.binary_records_written);
    if summary.uploads_skipped > 0 {
        println!("  {} uploads skipped (see log)", summary.uploads_skipped);
    }
    println!("  {} stale records removed", summary.records_deleted);
    println!("  {} orphan blobs removed", summary.blobs_deleted);

    Ok(())
}

/// POSTs to the configured deploy webhook.
pub async fn deploy(settings: &Settings) -> Result<()> {
    if settings.deploy_hook.is_empty() {
        bail!("deploy hook URL is not configured");
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()
        .context("failed to create HTTP client")?;

    let response = client
        .post(&settings.deploy_hook)
        .send()
        .await
        .context("deploy hook request failed")?;

    let status = response.status();
    if !status.is_success() {
        bail!("deploy hook returned {status}");
    }

    println!("Deploy triggered ({status})");
    Ok(())
}

/// Copies the public directory into the export directory.
pub fn export(settings: &Settings) -> Result<()> {
    if settings.export_dir.as_os_str().is_empty() {
        bail!("export directory is not configured");
    }
    let source = settings.vault_dir.join(&settings.public_dir);
    if !source.is_dir() {
        bail!("public directory {} does not exist", source.display());
    }

    let copied = copy_dir_recursive(&source, &settings.export_dir)?;
    println!(
        "Exported {} files to {}",
        copied,
        settings.export_dir.display()
    );
    Ok(())
}

fn copy_dir_recursive(source: &Path, destination: &Path) -> Result<usize> {
    fs::create_dir_all(destination)
        .with_context(|| format!("failed to create {}", destination.display()))?;

    let mut copied = 0;
    for entry in fs::read_dir(source).with_context(|| format!("failed to list {}", source.display()))? {
        let entry = entry?;
        let target = destination.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copied += copy_dir_recursive(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("failed to copy {}", entry.path().display()))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Empties the sync cache so the next publish re-uploads everything.
pub fn clear_cache(settings_path: &Path) -> Result<()> {
    let mut settings = Settings::load(settings_path)?;
    settings.cache.clear();
    settings.save(settings_path)?;
    println!("Sync cache cleared");
    Ok(())
}

/// Prints the effective settings, secret elided.
pub fn show_config(settings_path: &Path, settings: &Settings) -> Result<()> {
    println!("Settings file: {}", settings_path.display());
    println!();
    println!("vault_dir:     {}", settings.vault_dir.display());
    println!("endpoint:      {}", display_or_unset(&settings.endpoint));
    println!("blob_base_url: {}", display_or_unset(&settings.blob_base_url));
    println!("admin_secret:  {}", elide(&settings.admin_secret));
    println!("deploy_hook:   {}", display_or_unset(&settings.deploy_hook));
    println!("public_dir:    {}", settings.public_dir.display());
    println!("export_dir:    {}", settings.export_dir.display());
    println!();
    println!("cached entries: {}", settings.cache.len());
    Ok(())
}

fn display_or_unset(value: &str) -> &str {
    if value.is_empty() { "(not set)" } else { value }
}

fn elide(secret: &str) -> String {
    if secret.is_empty() {
        "(not set)".to_string()
    } else {
        format!("{}...", &secret[..secret.len().min(4)])
    }
}
