use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Local filesystem storage implementation
///
/// Objects live at `{base_path}/{bucket}/{key}`. Presigned URLs are plain links
/// under `base_url` carrying the expiry (and, for PUT, the content type) as query
/// parameters; nothing verifies them. Intended for development and tests.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory; each bucket is a subdirectory
    /// * `base_url` - Base URL for links (e.g., "http://localhost:4000/storage")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Convert bucket and key to a filesystem path with security validation
    ///
    /// Rejects components that could escape the base storage directory.
    fn object_path(&self, bucket: &str, key: &str) -> StorageResult<PathBuf> {
        if bucket.is_empty() || bucket.contains('/') || bucket.contains("..") {
            return Err(StorageError::InvalidKey(format!(
                "Invalid bucket name: {}",
                bucket
            )));
        }
        if key.is_empty() || key.starts_with('/') || key.split('/').any(|part| part == "..") {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(bucket).join(key))
    }

    /// Link to an object, with every path segment percent-encoded.
    fn generate_url(&self, bucket: &str, key: &str) -> String {
        let encoded_key = key
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(bucket),
            encoded_key
        )
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    fn not_found_or_io(err: std::io::Error, bucket: &str, key: &str) -> StorageError {
        if err.kind() == std::io::ErrorKind::NotFound {
            StorageError::NotFound(format!("{}/{}", bucket, key))
        } else {
            StorageError::IoError(err)
        }
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn download_to_path(&self, bucket: &str, key: &str, path: &Path) -> StorageResult<u64> {
        let source = self.object_path(bucket, key)?;
        let size = fs::copy(&source, path)
            .await
            .map_err(|e| Self::not_found_or_io(e, bucket, key))?;

        tracing::debug!(
            bucket = %bucket,
            key = %key,
            path = %path.display(),
            size_bytes = size,
            "Local download successful"
        );

        Ok(size)
    }

    async fn upload_from_path(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
        content_type: &str,
    ) -> StorageResult<()> {
        let target = self.object_path(bucket, key)?;
        self.ensure_parent_dir(&target).await?;

        let size = fs::copy(path, &target)
            .await
            .map_err(|e| StorageError::UploadFailed(format!("{}: {}", path.display(), e)))?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            content_type = %content_type,
            size_bytes = size,
            "Local upload successful"
        );

        Ok(())
    }

    async fn download(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        let path = self.object_path(bucket, key)?;
        fs::read(&path)
            .await
            .map_err(|e| Self::not_found_or_io(e, bucket, key))
    }

    async fn presigned_put_url(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        self.object_path(bucket, key)?;
        Ok(format!(
            "{}?X-Expires={}&X-Content-Type={}",
            self.generate_url(bucket, key),
            expires_in.as_secs(),
            urlencoding::encode(content_type)
        ))
    }

    async fn presigned_get_url(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        self.object_path(bucket, key)?;
        Ok(format!(
            "{}?X-Expires={}",
            self.generate_url(bucket, key),
            expires_in.as_secs()
        ))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
