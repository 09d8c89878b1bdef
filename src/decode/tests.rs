//! Tests for decoder module

use super::*;
use crate::error::Error;
use crate::record::RawRecord;
use serde_json::json;

// ============================================================================
// Shape Detection Tests
// ============================================================================

#[test]
fn test_decode_flat_records() {
    let body = json!({
        "records": [
            {"id": "a", "tiName": "alpha"},
            {"id": "b", "tiName": "beta"}
        ]
    })
    .to_string();

    let envelope = decode_envelope(&body).unwrap();
    assert_eq!(envelope.records.len(), 2);
    assert!(envelope.meta.is_none());
    assert_eq!(envelope.records[0].first(&["id"]).as_string(), "a");
    assert_eq!(envelope.records[1].first(&["tiName"]).as_string(), "beta");
}

#[test]
fn test_decode_nested_search_results() {
    let body = json!({
        "totalRows": 3,
        "pageNumber": 2,
        "pageSize": 2,
        "searchResults": {
            "items": [{"id": "c"}]
        }
    })
    .to_string();

    let envelope = decode_envelope(&body).unwrap();
    assert_eq!(envelope.records.len(), 1);
    assert_eq!(
        envelope.meta,
        Some(PageMeta {
            total_rows: 3,
            page_number: 2,
            page_size: 2,
        })
    );
}

#[test]
fn test_decode_nested_without_metadata() {
    let body = json!({"searchResults": {"items": []}}).to_string();

    let envelope = decode_envelope(&body).unwrap();
    assert!(envelope.records.is_empty());
    assert_eq!(envelope.meta, Some(PageMeta::default()));
}

#[test]
fn test_decode_nested_missing_items_is_empty_page() {
    let body = json!({"totalRows": 0, "searchResults": {}}).to_string();

    let envelope = decode_envelope(&body).unwrap();
    assert!(envelope.records.is_empty());
}

#[test]
fn test_decode_empty_flat_page() {
    let envelope = decode_envelope(r#"{"records": []}"#).unwrap();
    assert!(envelope.records.is_empty());
}

#[test]
fn test_decode_keeps_null_fields() {
    let body = json!({"records": [{"id": "n", "tiName": null, "tiRUs": 2}]}).to_string();

    let envelope = decode_envelope(&body).unwrap();
    let record = &envelope.records[0];
    assert!(record.get("tiName").unwrap().is_null());
    assert_eq!(record.first(&["tiRUs"]).as_i64(), 2);
}

// ============================================================================
// Null Handling Tests
// ============================================================================

#[test]
fn test_decode_null_records_is_empty_page() {
    let envelope = decode_envelope(r#"{"records": null}"#).unwrap();
    assert!(envelope.records.is_empty());
    assert!(envelope.meta.is_none());
}

#[test]
fn test_decode_null_items_is_empty_page() {
    let envelope = decode_envelope(r#"{"totalRows": 1, "searchResults": {"items": null}}"#).unwrap();
    assert!(envelope.records.is_empty());
    assert_eq!(envelope.meta.map(|m| m.total_rows), Some(1));
}

#[test]
fn test_decode_null_metadata_reads_as_zero() {
    let body = json!({
        "totalRows": null,
        "pageNumber": null,
        "pageSize": 2,
        "searchResults": {"items": [{"id": "a"}]}
    })
    .to_string();

    let envelope = decode_envelope(&body).unwrap();
    assert_eq!(envelope.records.len(), 1);
    assert_eq!(
        envelope.meta,
        Some(PageMeta {
            total_rows: 0,
            page_number: 0,
            page_size: 2,
        })
    );
}

#[test]
fn test_decode_null_record_becomes_empty_record() {
    let envelope = decode_envelope(r#"{"records": [{"id": "a"}, null]}"#).unwrap();
    assert_eq!(envelope.records.len(), 2);
    assert_eq!(envelope.records[0].first(&["id"]).as_string(), "a");
    assert_eq!(envelope.records[1], RawRecord::new());
}

// ============================================================================
// Failure Tests
// ============================================================================

#[test]
fn test_decode_invalid_json() {
    let err = decode_envelope("not json").unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[test]
fn test_decode_unrecognized_shape() {
    let err = decode_envelope(r#"{"data": []}"#).unwrap_err();
    assert!(err.to_string().contains("Unrecognized envelope shape"));
}

#[test]
fn test_decode_records_not_objects() {
    let err = decode_envelope(r#"{"records": [1, 2, 3]}"#).unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[test]
fn test_preview_truncates_on_char_boundary() {
    assert_eq!(preview("héllo", 2), "hé");
    assert_eq!(preview("abc", 10), "abc");
}
