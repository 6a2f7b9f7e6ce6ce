//! Mock Storage implementation for testing

use crate::{Storage, StorageBackend, StorageError, StorageResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// An object held by [`MockStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: Option<String>,
}

/// A presign call observed by [`MockStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignCall {
    pub method: &'static str,
    pub bucket: String,
    pub key: String,
    pub content_type: Option<String>,
    pub expires_in: Duration,
}

/// Mock storage implementation that stores objects in memory
#[derive(Default)]
pub struct MockStorage {
    objects: Mutex<HashMap<(String, String), StoredObject>>,
    presign_calls: Mutex<Vec<PresignCall>>,
    uploads: AtomicUsize,
    fail_signing: AtomicBool,
    fail_uploads: AtomicBool,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an object directly, as if a client had uploaded it.
    pub fn set_object(&self, bucket: &str, key: &str, data: Vec<u8>) {
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                data,
                content_type: None,
            },
        );
    }

    /// Get object (for test assertions)
    pub fn get_object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// Keys currently stored in `bucket`, sorted.
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .objects
            .lock()
            .unwrap()
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, k)| k.clone())
            .collect();
        keys.sort();
        keys
    }

    pub fn presign_calls(&self) -> Vec<PresignCall> {
        self.presign_calls.lock().unwrap().clone()
    }

    /// Number of successful `upload_from_path` calls.
    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    /// Make every presign call fail with `SigningFailed`.
    pub fn fail_signing(&self, fail: bool) {
        self.fail_signing.store(fail, Ordering::SeqCst);
    }

    /// Make every upload fail with `UploadFailed`.
    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    fn record_presign(
        &self,
        method: &'static str,
        bucket: &str,
        key: &str,
        content_type: Option<&str>,
        expires_in: Duration,
    ) -> StorageResult<String> {
        if self.fail_signing.load(Ordering::SeqCst) {
            return Err(StorageError::SigningFailed(
                "mock signer unavailable".to_string(),
            ));
        }
        self.presign_calls.lock().unwrap().push(PresignCall {
            method,
            bucket: bucket.to_string(),
            key: key.to_string(),
            content_type: content_type.map(String::from),
            expires_in,
        });
        Ok(format!(
            "https://{}.example.com/{}?method={}&expires={}",
            bucket,
            key,
            method,
            expires_in.as_secs()
        ))
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn download_to_path(&self, bucket: &str, key: &str, path: &Path) -> StorageResult<u64> {
        let data = self.download(bucket, key).await?;
        tokio::fs::write(path, &data).await?;
        Ok(data.len() as u64)
    }

    async fn upload_from_path(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
        content_type: &str,
    ) -> StorageResult<()> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed("mock upload rejected".to_string()));
        }
        let data = tokio::fs::read(path).await?;
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                data,
                content_type: Some(content_type.to_string()),
            },
        );
        self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn download(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        self.get_object(bucket, key)
            .map(|object| object.data)
            .ok_or_else(|| StorageError::NotFound(format!("{}/{}", bucket, key)))
    }

    async fn presigned_put_url(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        self.record_presign("PUT", bucket, key, Some(content_type), expires_in)
    }

    async fn presigned_get_url(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        self.record_presign("GET", bucket, key, None, expires_in)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
