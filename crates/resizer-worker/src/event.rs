//! Storage-write notification models.
//!
//! Accepts the S3 event notification envelope:
//!
//! ```json
//! {"Records": [{"s3": {"bucket": {"name": "src"}, "object": {"key": "uploads/1-a.png"}}}]}
//! ```
//!
//! as well as flat records of the form `{"bucket": "src", "key": "uploads/1-a.png"}`.
//! Records are kept as raw JSON until the worker reaches them, so a malformed
//! record fails on its own instead of rejecting the whole batch.

use resizer_core::AppError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<serde_json::Value>,
}

impl StorageEvent {
    /// Build an event from already-encoded `(bucket, key)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let records = pairs
            .into_iter()
            .map(|(bucket, key)| {
                serde_json::json!({
                    "s3": { "bucket": { "name": bucket }, "object": { "key": key } }
                })
            })
            .collect();
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Object {
    /// URL-encoded as delivered by the provider.
    pub key: String,
    #[serde(default)]
    pub size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EventRecord {
    S3 { s3: S3Entity },
    Flat { bucket: String, key: String },
}

impl EventRecord {
    pub fn parse(value: &serde_json::Value) -> Result<Self, AppError> {
        serde_json::from_value(value.clone()).map_err(|_| {
            AppError::Validation("Record does not name a bucket and object key".to_string())
        })
    }

    pub fn notification(&self) -> StorageNotification {
        match self {
            EventRecord::S3 { s3 } => StorageNotification {
                size: s3.object.size,
                ..StorageNotification::from_raw(&s3.bucket.name, &s3.object.key)
            },
            EventRecord::Flat { bucket, key } => StorageNotification::from_raw(bucket, key),
        }
    }
}

/// A single object-created notification with its key decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageNotification {
    pub bucket: String,
    pub key: String,
    /// Object size as reported by the provider, when the record carries it.
    pub size: Option<u64>,
}

impl StorageNotification {
    pub fn from_raw(bucket: &str, raw_key: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            key: decode_event_key(raw_key),
            size: None,
        }
    }
}

/// Reverse the key encoding used in storage events: `+` is a space, then
/// percent-escapes. Invalid UTF-8 sequences are replaced, not rejected.
pub fn decode_event_key(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}
