//! The object-store seam shared by the issuer and the worker.
//!
//! The issuer only signs; the worker only moves bytes. Both go through [`Storage`].

use crate::StorageBackend;
use async_trait::async_trait;
use resizer_core::AppError;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Failures of a single storage call.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Presigning failed: {0}")]
    SigningFailed(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConfigError(msg) => AppError::Configuration(msg),
            other => AppError::Provider(other.to_string()),
        }
    }
}

/// Storage abstraction trait
///
/// Implemented by the S3 backend, the local filesystem backend and the in-memory
/// test double. Handlers hold an `Arc<dyn Storage>` built once per process.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Fetch an object into a local file, returning the number of bytes written.
    async fn download_to_path(&self, bucket: &str, key: &str, path: &Path) -> StorageResult<u64>;

    /// Store a local file as an object with the given content type.
    ///
    /// Writing an existing key overwrites it.
    async fn upload_from_path(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
        content_type: &str,
    ) -> StorageResult<()>;

    /// Fetch an object into memory.
    async fn download(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>>;

    /// Generate a presigned PUT URL for a direct upload.
    ///
    /// The signature binds `content_type`: the uploader must send exactly that
    /// `Content-Type` header or the provider rejects the write.
    async fn presigned_put_url(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Generate a presigned GET URL. The object does not need to exist yet.
    async fn presigned_get_url(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
