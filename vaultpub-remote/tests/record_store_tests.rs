use serde_json::json;
use vaultpub_remote::{GraphqlRecordStore, RecordStore, RecordStoreConfig, RemoteError};
use vaultpub_types::{BlobId, EntryKind, LocalEntry, RemoteRecord};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> RecordStoreConfig {
    RecordStoreConfig {
        endpoint: format!("{}/v1/graphql", server.uri()),
        admin_secret: "secret".to_string(),
    }
}

fn record_fixture() -> RemoteRecord {
    let entry = LocalEntry {
        path: "a.md".to_string(),
        name: "a.md".to_string(),
        basename: "a".to_string(),
        extension: "md".to_string(),
        size: 3,
        created_at: 0,
        modified_at: 100,
        kind: EntryKind::Text {
            content: "hi".to_string(),
        },
    };
    RemoteRecord::text(&entry, "hi".to_string()).unwrap()
}

// ── Construction ────────────────────────────────────────────────

#[test]
fn empty_endpoint_is_invalid_config() {
    let result = GraphqlRecordStore::new(RecordStoreConfig {
        endpoint: String::new(),
        admin_secret: "secret".to_string(),
    });
    assert!(matches!(result, Err(RemoteError::InvalidConfig(_))));
}

#[test]
fn empty_secret_is_invalid_config() {
    let result = GraphqlRecordStore::new(RecordStoreConfig {
        endpoint: "http://localhost/v1/graphql".to_string(),
        admin_secret: String::new(),
    });
    assert!(matches!(result, Err(RemoteError::InvalidConfig(_))));
}

// ── Queries ─────────────────────────────────────────────────────

#[tokio::test]
async fn fetches_record_refs_with_admin_secret() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/graphql"))
        .and(header("x-hasura-admin-secret", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "records": [
                { "path": "a.md", "fileId": null },
                { "path": "img/b.png", "fileId": "blob-1" }
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = GraphqlRecordStore::new(config(&server)).unwrap();
    let refs = store.fetch_record_refs().await.unwrap();

    assert_eq!(refs.len(), 2);
    assert_eq!(refs[0].path, "a.md");
    assert_eq!(refs[0].blob_id, None);
    assert_eq!(refs[1].blob_id, Some(BlobId::new("blob-1")));
}

#[tokio::test]
async fn fetches_blob_ids() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "blobs": [ { "id": "blob-1" }, { "id": "blob-2" } ] }
        })))
        .mount(&server)
        .await;

    let store = GraphqlRecordStore::new(config(&server)).unwrap();
    let ids = store.fetch_blob_ids().await.unwrap();

    assert_eq!(ids, vec![BlobId::new("blob-1"), BlobId::new("blob-2")]);
}

// ── Upsert ──────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_sends_conflict_update_columns() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/graphql"))
        .and(body_string_contains("on_conflict"))
        .and(body_string_contains("update_columns: [content, size, updatedAt]"))
        .and(body_string_contains("\"a.md\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "insert_records": { "affected_rows": 1 } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = GraphqlRecordStore::new(config(&server)).unwrap();
    let affected = store.upsert_records(&[record_fixture()]).await.unwrap();

    assert_eq!(affected, 1);
}

// ── Delete ──────────────────────────────────────────────────────

#[tokio::test]
async fn delete_sends_paths_and_returns_affected_rows() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/graphql"))
        .and(body_string_contains("delete_records"))
        .and(body_string_contains("old.md"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "delete_records": { "affected_rows": 1 } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = GraphqlRecordStore::new(config(&server)).unwrap();
    let affected = store
        .delete_records(&["old.md".to_string()])
        .await
        .unwrap();

    assert_eq!(affected, 1);
}

// ── Failure shapes ──────────────────────────────────────────────

#[tokio::test]
async fn graphql_errors_surface_as_api_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [ { "message": "constraint violation" } ]
        })))
        .mount(&server)
        .await;

    let store = GraphqlRecordStore::new(config(&server)).unwrap();
    let err = store.fetch_record_refs().await.unwrap_err();

    match err {
        RemoteError::Api(message) => assert!(message.contains("constraint violation")),
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn http_error_status_surfaces_as_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/graphql"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let store = GraphqlRecordStore::new(config(&server)).unwrap();
    let err = store.fetch_blob_ids().await.unwrap_err();

    assert!(matches!(err, RemoteError::Api(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_error() {
    let store = GraphqlRecordStore::new(RecordStoreConfig {
        endpoint: "http://127.0.0.1:1/v1/graphql".to_string(),
        admin_secret: "secret".to_string(),
    })
    .unwrap();

    let err = store.fetch_record_refs().await.unwrap_err();
    assert!(matches!(err, RemoteError::Network(_)));
}
