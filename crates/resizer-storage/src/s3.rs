use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use std::path::Path;
use std::time::Duration;

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    client: Client,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `region` - AWS region; falls back to the SDK's default provider chain when `None`
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO). Path-style addressing is used when set.
    pub async fn new(region: Option<String>, endpoint_url: Option<String>) -> StorageResult<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        let shared_config = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared_config);
        if let Some(endpoint) = endpoint_url {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        let s3_config = builder.build();
        if s3_config.region().is_none() {
            return Err(StorageError::ConfigError(
                "S3_REGION or AWS_REGION not configured".to_string(),
            ));
        }

        Ok(S3Storage {
            client: Client::from_conf(s3_config),
        })
    }

    pub fn from_client(client: Client) -> Self {
        S3Storage { client }
    }

    fn presigning_config(expires_in: Duration) -> StorageResult<PresigningConfig> {
        PresigningConfig::expires_in(expires_in)
            .map_err(|e| StorageError::SigningFailed(format!("Invalid expiry: {}", e)))
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn download_to_path(&self, bucket: &str, key: &str, path: &Path) -> StorageResult<u64> {
        let data = self.download(bucket, key).await?;
        let size = data.len() as u64;
        tokio::fs::write(path, &data).await?;

        tracing::debug!(
            bucket = %bucket,
            key = %key,
            path = %path.display(),
            size_bytes = size,
            "Wrote S3 object to local file"
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
        let start = std::time::Instant::now();
        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| StorageError::UploadFailed(format!("Failed to read {}: {}", path.display(), e)))?;

        let result = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(body)
            .send()
            .await;

        result.map_err(|e| {
            let message = DisplayErrorContext(&e).to_string();
            tracing::error!(
                error = %message,
                bucket = %bucket,
                key = %key,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::UploadFailed(message)
        })?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            content_type = %content_type,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(())
    }

    async fn download(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        let start = std::time::Instant::now();

        let result = self.client.get_object().bucket(bucket).key(key).send().await;

        let output = result.map_err(|e| {
            if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                return StorageError::NotFound(format!("s3://{}/{}", bucket, key));
            }
            let message = DisplayErrorContext(&e).to_string();
            tracing::error!(
                error = %message,
                bucket = %bucket,
                key = %key,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 download failed"
            );
            StorageError::DownloadFailed(message)
        })?;

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?
            .into_bytes();

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = bytes.len() as u64,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 download successful"
        );

        Ok(bytes.to_vec())
    }

    async fn presigned_put_url(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        let presigned = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .presigned(Self::presigning_config(expires_in)?)
            .await
            .map_err(|e| StorageError::SigningFailed(DisplayErrorContext(&e).to_string()))?;

        tracing::debug!(
            bucket = %bucket,
            key = %key,
            expires_in_seconds = expires_in.as_secs(),
            "Generated presigned PUT URL"
        );

        Ok(presigned.uri().to_string())
    }

    async fn presigned_get_url(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        let presigned = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(Self::presigning_config(expires_in)?)
            .await
            .map_err(|e| StorageError::SigningFailed(DisplayErrorContext(&e).to_string()))?;

        tracing::debug!(
            bucket = %bucket,
            key = %key,
            expires_in_seconds = expires_in.as_secs(),
            "Generated presigned GET URL"
        );

        Ok(presigned.uri().to_string())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
