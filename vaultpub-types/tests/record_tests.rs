use vaultpub_types::{rfc3339_millis, BlobId, EntryKind, LocalEntry, RemoteRecord};

fn text_entry() -> LocalEntry {
    LocalEntry {
        path: "notes/hello.md".to_string(),
        name: "hello.md".to_string(),
        basename: "hello".to_string(),
        extension: "md".to_string(),
        size: 42,
        created_at: 1_700_000_000_000,
        modified_at: 1_700_000_100_500,
        kind: EntryKind::Text {
            content: "# Hello".to_string(),
        },
    }
}

fn binary_entry() -> LocalEntry {
    LocalEntry {
        path: "img/photo.png".to_string(),
        name: "photo.png".to_string(),
        basename: "photo".to_string(),
        extension: "png".to_string(),
        size: 2048,
        created_at: 0,
        modified_at: 1_700_000_000_000,
        kind: EntryKind::Binary,
    }
}

// ── Entry helpers ───────────────────────────────────────────────

#[test]
fn text_entry_exposes_content() {
    let entry = text_entry();
    assert!(entry.is_text());
    assert_eq!(entry.content(), Some("# Hello"));
}

#[test]
fn binary_entry_has_no_content() {
    let entry = binary_entry();
    assert!(!entry.is_text());
    assert_eq!(entry.content(), None);
}

// ── Timestamp rendering ─────────────────────────────────────────

#[test]
fn rfc3339_millis_renders_like_iso() {
    assert_eq!(rfc3339_millis(0).unwrap(), "1970-01-01T00:00:00.000Z");
    assert_eq!(
        rfc3339_millis(1_700_000_100_500).unwrap(),
        "2023-11-14T22:15:00.500Z"
    );
}

#[test]
fn rfc3339_millis_rejects_out_of_range() {
    assert!(rfc3339_millis(i64::MAX).is_err());
}

// ── Record construction ─────────────────────────────────────────

#[test]
fn text_record_carries_content_and_no_blob() {
    let record = RemoteRecord::text(&text_entry(), "# Hello".to_string()).unwrap();
    assert_eq!(record.path, "notes/hello.md");
    assert_eq!(record.content.as_deref(), Some("# Hello"));
    assert!(record.blob_id.is_none());
    assert_eq!(record.created_at, "2023-11-14T22:13:20.000Z");
    assert_eq!(record.updated_at, "2023-11-14T22:15:00.500Z");
}

#[test]
fn binary_record_carries_blob_and_no_content() {
    let record = RemoteRecord::binary(&binary_entry(), BlobId::new("blob-1")).unwrap();
    assert_eq!(record.path, "img/photo.png");
    assert!(record.content.is_none());
    assert_eq!(record.blob_id, Some(BlobId::new("blob-1")));
}

// ── Wire format ─────────────────────────────────────────────────

#[test]
fn text_record_wire_fields() {
    let record = RemoteRecord::text(&text_entry(), "# Hello".to_string()).unwrap();
    let value = serde_json::to_value(&record).unwrap();
    let obj = value.as_object().unwrap();

    assert_eq!(obj["basename"], "hello");
    assert_eq!(obj["extension"], "md");
    assert_eq!(obj["name"], "hello.md");
    assert_eq!(obj["path"], "notes/hello.md");
    assert_eq!(obj["size"], 42);
    assert_eq!(obj["createdAt"], "2023-11-14T22:13:20.000Z");
    assert_eq!(obj["updatedAt"], "2023-11-14T22:15:00.500Z");
    assert_eq!(obj["content"], "# Hello");
    assert!(!obj.contains_key("fileId"));
}

#[test]
fn binary_record_wire_fields() {
    let record = RemoteRecord::binary(&binary_entry(), BlobId::new("blob-1")).unwrap();
    let value = serde_json::to_value(&record).unwrap();
    let obj = value.as_object().unwrap();

    assert_eq!(obj["fileId"], "blob-1");
    assert!(!obj.contains_key("content"));
}

#[test]
fn blob_id_is_transparent_in_serde() {
    let id: BlobId = serde_json::from_str("\"abc-123\"").unwrap();
    assert_eq!(id.as_str(), "abc-123");
    assert_eq!(id.to_string(), "abc-123");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc-123\"");
}
