//! Record store client.
//!
//! Talks to the record table through a GraphQL admin endpoint. The upsert
//! conflicts on the path key and updates only `content`, `size` and
//! `updatedAt`; identity columns and `createdAt` keep their existing
//! values.

use crate::error::{RemoteError, RemoteResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::debug;
use vaultpub_types::{BlobId, RemoteRecord};

const RECORDS_QUERY: &str = "query Records { records { path fileId } }";

const BLOB_IDS_QUERY: &str = "query Blobs { blobs { id } }";

const UPSERT_RECORDS_MUTATION: &str = "\
mutation UpsertRecords($objects: [records_insert_input!]!) {
  insert_records(
    objects: $objects
    on_conflict: { constraint: records_pkey, update_columns: [content, size, updatedAt] }
  ) {
    affected_rows
  }
}";

const DELETE_RECORDS_MUTATION: &str = "\
mutation DeleteRecords($paths: [String!]) {
  delete_records(where: { path: { _in: $paths } }) {
    affected_rows
  }
}";

/// Record store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordStoreConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// Static administrative secret sent with every request.
    pub admin_secret: String,
}

/// A record's identity as seen by the reconciler: its path and, for
/// binary entries, the blob it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRecordRef {
    pub path: String,
    #[serde(rename = "fileId")]
    pub blob_id: Option<BlobId>,
}

/// Abstract record store interface.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetches every record's path and blob reference.
    async fn fetch_record_refs(&self) -> RemoteResult<Vec<RemoteRecordRef>>;

    /// Fetches every blob id known to the store.
    async fn fetch_blob_ids(&self) -> RemoteResult<Vec<BlobId>>;

    /// Upserts a batch of records keyed by path. Returns affected rows.
    async fn upsert_records(&self, records: &[RemoteRecord]) -> RemoteResult<u64>;

    /// Deletes the records whose path is in `paths`. Returns affected rows.
    async fn delete_records(&self, paths: &[String]) -> RemoteResult<u64>;
}

// GraphQL envelope and per-operation payloads.

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct RecordsData {
    records: Vec<RemoteRecordRef>,
}

#[derive(Debug, Deserialize)]
struct BlobsData {
    blobs: Vec<BlobRow>,
}

#[derive(Debug, Deserialize)]
struct BlobRow {
    id: BlobId,
}

#[derive(Debug, Deserialize)]
struct UpsertData {
    insert_records: AffectedRows,
}

#[derive(Debug, Deserialize)]
struct DeleteData {
    delete_records: AffectedRows,
}

#[derive(Debug, Deserialize)]
struct AffectedRows {
    affected_rows: u64,
}

/// GraphQL implementation of [`RecordStore`].
pub struct GraphqlRecordStore {
    config: RecordStoreConfig,
    client: Client,
}

impl GraphqlRecordStore {
    /// Creates a record store client.
    ///
    /// Fails with [`RemoteError::InvalidConfig`] when the endpoint or the
    /// admin secret is empty, so a misconfigured engine never issues
    /// requests that are certain to fail.
    pub fn new(config: RecordStoreConfig) -> RemoteResult<Self> {
        if config.endpoint.is_empty() {
            return Err(RemoteError::InvalidConfig(
                "record store endpoint is not set".to_string(),
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

    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> RemoteResult<T> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .header("x-hasura-admin-secret", &self.config.admin_secret)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| RemoteError::Network(format!("record store request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Api(format!(
                "record store returned {status}: {body}"
            )));
        }

        let envelope: GraphqlResponse<T> = response
            .json()
            .await
            .map_err(|e| RemoteError::Network(format!("failed to parse record store response: {e}")))?;

        if let Some(errors) = envelope.errors {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(RemoteError::Api(messages.join("; ")));
        }

        envelope
            .data
            .ok_or_else(|| RemoteError::Api("record store response had no data".to_string()))
    }
}

#[async_trait]
impl RecordStore for GraphqlRecordStore {
    async fn fetch_record_refs(&self) -> RemoteResult<Vec<RemoteRecordRef>> {
        debug!("Fetching remote record refs");
        let data: RecordsData = self.execute(RECORDS_QUERY, json!({})).await?;
        Ok(data.records)
    }

    async fn fetch_blob_ids(&self) -> RemoteResult<Vec<BlobId>> {
        debug!("Fetching remote blob ids");
        let data: BlobsData = self.execute(BLOB_IDS_QUERY, json!({})).await?;
        Ok(data.blobs.into_iter().map(|row| row.id).collect())
    }

    async fn upsert_records(&self, records: &[RemoteRecord]) -> RemoteResult<u64> {
        debug!("Upserting {} records", records.len());
        let objects = serde_json::to_value(records)?;
        let data: UpsertData = self
            .execute(UPSERT_RECORDS_MUTATION, json!({ "objects": objects }))
            .await?;
        Ok(data.insert_records.affected_rows)
    }

    async fn delete_records(&self, paths: &[String]) -> RemoteResult<u64> {
        debug!("Deleting {} records", paths.len());
        let data: DeleteData = self
            .execute(DELETE_RECORDS_MUTATION, json!({ "paths": paths }))
            .await?;
        Ok(data.delete_records.affected_rows)
    }
}
