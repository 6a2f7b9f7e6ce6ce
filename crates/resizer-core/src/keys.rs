//! Object key naming contract.
//!
//! The issuer hands the client a download URL for an object that does not exist
//! yet. The worker later writes that object. The two never talk to each other, so
//! the output key must be a pure function of the source key, computed here and
//! only here.

use chrono::Utc;
use uuid::Uuid;

use crate::constants::{OUTPUT_PREFIX, SOURCE_PREFIX};

/// Map a source key to the key the worker publishes the resized image under.
///
/// The prefix wraps the key verbatim, so `uploads/1-a.png` becomes
/// `resized/uploads/1-a.png`.
pub fn derive_output_key(source_key: &str) -> String {
    format!("{}{}", OUTPUT_PREFIX, source_key)
}

/// `{timestamp}-{uuid}` upload identifier.
pub fn unique_id(timestamp_secs: i64, id: Uuid) -> String {
    format!("{}-{}", timestamp_secs, id)
}

/// Lower-cased extension of the final path segment, including the leading dot.
///
/// Leading dots do not start an extension (`.bashrc` has none) and only the last
/// dot counts (`a.tar.GZ` gives `.gz`). Returns an empty string when there is no
/// extension.
pub fn file_extension(filename: &str) -> String {
    let name = filename.rsplit('/').next().unwrap_or(filename);
    let stem_start = name.len() - name.trim_start_matches('.').len();

    match name[stem_start..].rfind('.') {
        Some(dot) => name[stem_start + dot..].to_lowercase(),
        None => String::new(),
    }
}

pub fn source_key(unique_id: &str, extension: &str) -> String {
    format!("{}{}{}", SOURCE_PREFIX, unique_id, extension)
}

/// Source and predicted output key for a single upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKeys {
    pub source_key: String,
    pub destination_key: String,
}

impl ObjectKeys {
    /// Derive fresh keys for `filename` using the wall clock and a random UUIDv4.
    pub fn generate(filename: &str) -> Self {
        Self::from_parts(filename, Utc::now().timestamp(), Uuid::new_v4())
    }

    pub fn from_parts(filename: &str, timestamp_secs: i64, id: Uuid) -> Self {
        let source_key = source_key(&unique_id(timestamp_secs, id), &file_extension(filename));
        let destination_key = derive_output_key(&source_key);
        Self {
            source_key,
            destination_key,
        }
    }
}
