//! Which object store backs both buckets.
//!
//! Lives in core rather than in `resizer-storage` because `STORAGE_BACKEND` is
//! parsed together with the rest of the environment, before any client is built.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Object store selected by `STORAGE_BACKEND`.
///
/// `S3` signs real upload/download capabilities; `Local` maps buckets to
/// directories so the pipeline can run without a cloud account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    S3,
    Local,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s3" => Ok(StorageBackend::S3),
            "local" => Ok(StorageBackend::Local),
            _ => Err(anyhow::anyhow!(
                "Invalid STORAGE_BACKEND '{}': expected 's3' or 'local'",
                s
            )),
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::S3 => write!(f, "s3"),
            StorageBackend::Local => write!(f, "local"),
        }
    }
}
