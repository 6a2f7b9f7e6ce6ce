//! Per-record results collected for one storage-event batch.

use resizer_core::AppError;

#[derive(Debug)]
pub enum RecordStatus {
    /// Downsized copy published.
    Resized {
        destination_key: String,
        original: (u32, u32),
        resized: (u32, u32),
    },
    /// Within bounds; the original bytes were published unchanged.
    Copied { destination_key: String },
    /// Dropped after logging. Nothing was written to the destination.
    Failed(AppError),
}

#[derive(Debug)]
pub struct RecordReport {
    /// Decoded object key, or `None` if the record could not be read at all.
    pub key: Option<String>,
    pub status: RecordStatus,
}

impl RecordReport {
    pub fn is_success(&self) -> bool {
        !matches!(self.status, RecordStatus::Failed(_))
    }
}

/// Outcome of a whole batch. The batch itself always completes; failures live
/// in the individual reports.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub records: Vec<RecordReport>,
}

impl BatchOutcome {
    pub fn succeeded(&self) -> usize {
        self.records.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.records.len() - self.succeeded()
    }
}
