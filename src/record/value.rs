//! Wire values and coercion
//!
//! A raw record is an open bag of loosely-typed values keyed by vendor field
//! name. Each coercion below is total: a value that does not fit the target
//! type yields that type's default instead of an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// One untyped scalar as it arrived on the wire
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "Value")]
pub enum WireValue {
    /// JSON null or an absent key
    #[default]
    Null,
    /// JSON boolean
    Bool(bool),
    /// JSON number, kept in its original representation
    Number(serde_json::Number),
    /// JSON string
    Text(String),
    /// Array or object; only ever stringified
    Composite(Value),
}

impl From<Value> for WireValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::Text(s),
            other => Self::Composite(other),
        }
    }
}

impl From<&str> for WireValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Timestamp layouts tried in order; the first that parses wins
const NAIVE_UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const OFFSET_FORMAT: &str = "%Y-%m-%d %H:%M:%S%#z";
const DATE_FORMAT: &str = "%Y-%m-%d";

impl WireValue {
    /// True for null/absent
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Stringify any non-null value; null yields an empty string
    pub fn as_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Composite(v) => v.to_string(),
        }
    }

    /// Decimal value, or `0.0` when absent or unparsable
    pub fn as_f64(&self) -> f64 {
        let parsed = match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|f| f.is_finite()).unwrap_or(0.0)
    }

    /// Integer value, or `0` when absent or unparsable.
    ///
    /// A whole-valued JSON number such as `42.0` counts as an integer; a
    /// fractional one does not.
    pub fn as_i64(&self) -> i64 {
        match self {
            Self::Number(n) => n
                .as_i64()
                .or_else(|| {
                    n.as_f64()
                        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                        .map(|f| f as i64)
                })
                .unwrap_or(0),
            Self::Text(s) => s.trim().parse::<i64>().unwrap_or(0),
            _ => 0,
        }
    }

    /// True only for `"true"`, `"1"`, boolean true, or the number 1
    pub fn as_bool(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Text(s) => s == "true" || s == "1",
            Self::Number(n) => n.as_f64() == Some(1.0),
            _ => false,
        }
    }

    /// Timestamp in UTC, or `None` when no known layout matches
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Text(s) if !s.is_empty() => parse_timestamp(s),
            _ => None,
        }
    }

    /// Stringified value, `None` when empty
    pub fn as_non_empty(&self) -> Option<String> {
        Some(self.as_string()).filter(|s| !s.is_empty())
    }
}

/// Parse the timestamp layouts the service is known to emit
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_str(raw, OFFSET_FORMAT) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, NAIVE_UTC_FORMAT) {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// One record as returned by the service: wire field name to untyped value
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    fields: HashMap<String, WireValue>,
}

impl RawRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<WireValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Look up a single wire name
    pub fn get(&self, key: &str) -> Option<&WireValue> {
        self.fields.get(key)
    }

    /// First non-null value among equivalent wire names
    pub fn first(&self, aliases: &[&str]) -> &WireValue {
        static NULL: WireValue = WireValue::Null;
        aliases
            .iter()
            .filter_map(|key| self.fields.get(*key))
            .find(|value| !value.is_null())
            .unwrap_or(&NULL)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<serde_json::Map<String, Value>> for RawRecord {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        Self {
            fields: map.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<WireValue>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
