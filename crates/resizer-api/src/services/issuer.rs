//! Upload-URL issuance.
//!
//! Hands the client a short-lived write capability for a fresh source key and a
//! longer-lived read capability for the output key the worker will later write.
//! The output object does not exist yet when the read URL is signed.

use resizer_core::constants::{DOWNLOAD_URL_EXPIRY, UPLOAD_URL_EXPIRY};
use resizer_core::models::{UploadRequest, UploadUrlResponse};
use resizer_core::{AppError, IssuerConfig, ObjectKeys};
use resizer_storage::Storage;
use std::sync::Arc;

pub struct UploadUrlIssuer {
    storage: Arc<dyn Storage>,
    config: IssuerConfig,
}

impl UploadUrlIssuer {
    pub fn new(storage: Arc<dyn Storage>, config: IssuerConfig) -> Self {
        Self { storage, config }
    }

    /// Origin to echo in CORS headers, `*` when none is configured.
    pub fn cors_origin(&self) -> &str {
        self.config.cors_origin()
    }

    /// Fails with a configuration error unless all three issuer parameters are set.
    pub fn check_configured(&self) -> Result<(), AppError> {
        self.config.settings().map(|_| ())
    }

    /// Configuration is checked before the body is looked at, so a
    /// misconfigured deployment answers every request the same way.
    #[tracing::instrument(skip(self, body), fields(operation = "issue_upload_url"))]
    pub async fn issue(&self, body: &[u8]) -> Result<UploadUrlResponse, AppError> {
        let settings = self.config.settings()?;
        let request = UploadRequest::from_body(body)?.validate()?;

        let keys = ObjectKeys::generate(&request.filename);
        tracing::info!(
            filename = %request.filename,
            content_type = %request.content_type,
            source_key = %keys.source_key,
            destination_key = %keys.destination_key,
            "Issuing upload URL"
        );

        let upload_url = self
            .storage
            .presigned_put_url(
                settings.source_bucket,
                &keys.source_key,
                &request.content_type,
                UPLOAD_URL_EXPIRY,
            )
            .await?;

        let download_url = self
            .storage
            .presigned_get_url(
                settings.destination_bucket,
                &keys.destination_key,
                DOWNLOAD_URL_EXPIRY,
            )
            .await?;

        Ok(UploadUrlResponse {
            upload_url,
            download_url,
            destination_key: keys.destination_key,
        })
    }
}
