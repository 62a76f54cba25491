//! Blob store client.
//!
//! Uploads binary content as a multipart form (bytes + content type +
//! file name) and receives an opaque id back. Deletes are by id; a 404
//! means the blob is already gone and is not an error.

use crate::error::{RemoteError, RemoteResult};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};
use vaultpub_types::BlobId;

/// Blob store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlobStoreConfig {
    /// Base URL of the blob store API.
    pub base_url: String,
    /// Static administrative secret sent with every request.
    pub admin_secret: String,
}

/// Abstract blob store interface.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Uploads `content` under `name`, returning the store-assigned id.
    async fn upload(&self, name: &str, content_type: &str, content: &[u8])
        -> RemoteResult<BlobId>;

    /// Deletes a blob by id. Deleting an absent blob succeeds.
    async fn delete(&self, id: &BlobId) -> RemoteResult<()>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    id: BlobId,
}

/// HTTP implementation of [`BlobStore`].
pub struct HttpBlobStore {
    config: BlobStoreConfig,
    client: Client,
}

impl HttpBlobStore {
    /// Creates a blob store client.
    ///
    /// Fails with [`RemoteError::InvalidConfig`] when the base URL or the
    /// admin secret is empty.
    pub fn new(config: BlobStoreConfig) -> RemoteResult<Self> {
        if config.base_url.is_empty() {
            return Err(RemoteError::InvalidConfig(
                "blob store base URL is not set".to_string(),
            ));
        }
        if config.admin_secret.is_empty() {
            return Err(RemoteError::InvalidConfig(
                "admin secret is not set".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to create HTTP client");

        Ok(Self { config, client })
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn upload(
        &self,
        name: &str,
        content_type: &str,
        content: &[u8],
    ) -> RemoteResult<BlobId> {
        debug!("Uploading blob: {} ({} bytes)", name, content.len());

        let part = Part::bytes(content.to_vec())
            .file_name(name.to_string())
            .mime_str(content_type)
            .map_err(|e| RemoteError::Api(format!("invalid content type {content_type}: {e}")))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/v1/files", self.config.base_url))
            .header("x-hasura-admin-secret", &self.config.admin_secret)
            .multipart(form)
            .send()
            .await
            .map_err(|e| RemoteError::Network(format!("blob upload failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Api(format!(
                "blob store rejected {name}: {status}: {body}"
            )));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::Network(format!("failed to parse upload response: {e}")))?;

        info!("Uploaded blob: {} (id: {})", name, uploaded.id);
        Ok(uploaded.id)
    }

    async fn delete(&self, id: &BlobId) -> RemoteResult<()> {
        debug!("Deleting blob: {}", id);

        let response = self
            .client
            .delete(format!("{}/v1/files/{}", self.config.base_url, id))
            .header("x-hasura-admin-secret", &self.config.admin_secret)
            .send()
            .await
            .map_err(|e| RemoteError::Network(format!("blob delete failed: {e}")))?;

        if !response.status().is_success() && response.status().as_u16() != 404 {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Api(format!(
                "blob delete failed: {status}: {body}"
            )));
        }

        Ok(())
    }
}
