//! Page envelope decoding
//!
//! The service wraps a page of records in one of two shapes depending on its
//! generation:
//!
//! ```text
//! flat:   { "records": [ {..}, .. ] }
//! nested: { "totalRows": n, "pageNumber": n, "pageSize": n,
//!           "searchResults": { "items": [ {..}, .. ] } }
//! ```
//!
//! Both are tried in that order; new shapes get a new [`WireEnvelope`]
//! variant and a matching arm in [`decode_envelope`].
//!
//! An explicit `null` reads as the field's default: a null list is an empty
//! page, null metadata is zero, and a null record is an empty [`RawRecord`]
//! that fails mapping on its own.

use crate::error::{Error, Result};
use crate::record::RawRecord;
use serde::{Deserialize, Deserializer};

/// Pagination metadata carried by the nested shape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Total rows matching the query across all pages
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_rows: u64,
    /// Page number the service answered for
    #[serde(default, deserialize_with = "null_as_default")]
    pub page_number: u32,
    /// Page size the service applied
    #[serde(default, deserialize_with = "null_as_default")]
    pub page_size: u32,
}

/// One decoded page: raw records plus whatever metadata the shape carried
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Envelope {
    /// Records in service order
    pub records: Vec<RawRecord>,
    /// Present only for the nested shape
    pub meta: Option<PageMeta>,
}

type WireRecords = Vec<Option<RawRecord>>;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResults {
    #[serde(default, deserialize_with = "null_as_default")]
    items: WireRecords,
}

// Keys stay required so that a body lacking both falls through to the error.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireEnvelope {
    Flat {
        #[serde(deserialize_with = "null_as_default")]
        records: WireRecords,
    },
    #[serde(rename_all = "camelCase")]
    Nested {
        #[serde(deserialize_with = "null_as_default")]
        search_results: SearchResults,
        #[serde(flatten)]
        meta: PageMeta,
    },
}

/// Decode a response body into an [`Envelope`], detecting its shape
pub fn decode_envelope(body: &str) -> Result<Envelope> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;

    let wire: WireEnvelope = serde_json::from_value(value).map_err(|_| {
        Error::decode(format!(
            "Unrecognized envelope shape, expected 'records' or 'searchResults.items': {}",
            preview(body, 200)
        ))
    })?;

    Ok(match wire {
        WireEnvelope::Flat { records } => Envelope {
            records: fill_nulls(records),
            meta: None,
        },
        WireEnvelope::Nested {
            search_results,
            meta,
        } => Envelope {
            records: fill_nulls(search_results.items),
            meta: Some(meta),
        },
    })
}

fn fill_nulls(records: WireRecords) -> Vec<RawRecord> {
    records.into_iter().map(Option::unwrap_or_default).collect()
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// First `max` characters of a body, for log and error messages
pub(crate) fn preview(body: &str, max: usize) -> &str {
    match body.char_indices().nth(max) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
