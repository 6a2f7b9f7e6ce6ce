//! Per-record resize pipeline.
//!
//! Record lifecycle: received, downloaded, decoded, resized or skipped, uploaded,
//! cleaned up. Any step may fail instead; the record is then logged and dropped,
//! its transient files are still removed, and the rest of the batch continues.

use std::sync::Arc;

use resizer_core::{derive_output_key, AppError, WorkerConfig};
use resizer_processing::{content_type_for_key, ImageResizer, ResizeOutcome, TransientFiles};
use resizer_storage::Storage;

use crate::event::{EventRecord, StorageEvent, StorageNotification};
use crate::outcome::{BatchOutcome, RecordReport, RecordStatus};

pub struct ResizeWorker {
    storage: Arc<dyn Storage>,
    config: WorkerConfig,
    resizer: ImageResizer,
}

impl ResizeWorker {
    pub fn new(storage: Arc<dyn Storage>, config: WorkerConfig) -> Self {
        let resizer = ImageResizer::new(config.max_dimension);
        Self {
            storage,
            config,
            resizer,
        }
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Process every record of a storage-event batch.
    ///
    /// Fails only when the destination bucket is not configured, before any
    /// record is touched. Per-record failures are reported in the outcome.
    #[tracing::instrument(skip(self, event), fields(records = event.len()))]
    pub async fn handle_event(&self, event: &StorageEvent) -> Result<BatchOutcome, AppError> {
        let destination_bucket = self.config.destination_bucket().inspect_err(|e| {
            tracing::error!(error = %e, "Destination bucket not configured");
        })?;

        tracing::info!(
            destination_bucket = %destination_bucket,
            max_dimension = self.resizer.max_dimension(),
            "Processing storage event batch"
        );

        let mut outcome = BatchOutcome::default();
        for raw in &event.records {
            let report = match EventRecord::parse(raw) {
                Ok(record) => {
                    self.process_record(record.notification(), destination_bucket)
                        .await
                }
                Err(e) => {
                    tracing::error!(error = %e, "Skipping unreadable record");
                    RecordReport {
                        key: None,
                        status: RecordStatus::Failed(e),
                    }
                }
            };
            outcome.records.push(report);
        }

        tracing::info!(
            succeeded = outcome.succeeded(),
            failed = outcome.failed(),
            "Storage event batch complete"
        );

        Ok(outcome)
    }

    async fn process_record(
        &self,
        notification: StorageNotification,
        destination_bucket: &str,
    ) -> RecordReport {
        let files = TransientFiles::new(&self.config.temp_dir, &notification.key);

        let result = self
            .run_pipeline(&notification, destination_bucket, &files)
            .await;
        files.cleanup().await;

        let status = result.unwrap_or_else(|e| {
            tracing::error!(
                error = %e,
                error_type = e.error_type(),
                bucket = %notification.bucket,
                key = %notification.key,
                "Error processing record"
            );
            RecordStatus::Failed(e)
        });

        RecordReport {
            key: Some(notification.key),
            status,
        }
    }

    #[tracing::instrument(
        skip(self, notification, files),
        fields(bucket = %notification.bucket, key = %notification.key)
    )]
    async fn run_pipeline(
        &self,
        notification: &StorageNotification,
        destination_bucket: &str,
        files: &TransientFiles,
    ) -> Result<RecordStatus, AppError> {
        let start = std::time::Instant::now();
        tokio::fs::create_dir_all(&self.config.temp_dir).await?;

        let size = self
            .storage
            .download_to_path(&notification.bucket, &notification.key, files.download_path())
            .await?;
        tracing::info!(
            size_bytes = size,
            reported_size_bytes = ?notification.size,
            path = %files.download_path().display(),
            "Downloaded source object"
        );

        let outcome = self
            .resizer
            .resize_file_blocking(
                files.download_path().to_path_buf(),
                files.resized_path().to_path_buf(),
            )
            .await?;

        let upload_path = if outcome.is_resized() {
            files.resized_path()
        } else {
            files.download_path()
        };
        let content_type = content_type_for_key(&notification.key);
        let destination_key = derive_output_key(&notification.key);

        self.storage
            .upload_from_path(destination_bucket, &destination_key, upload_path, content_type)
            .await?;

        tracing::info!(
            destination_bucket = %destination_bucket,
            destination_key = %destination_key,
            content_type = %content_type,
            resized = outcome.is_resized(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Published image"
        );

        Ok(match outcome {
            ResizeOutcome::Resized { original, resized } => RecordStatus::Resized {
                destination_key,
                original,
                resized,
            },
            ResizeOutcome::Skipped { .. } => RecordStatus::Copied { destination_key },
        })
    }
}
