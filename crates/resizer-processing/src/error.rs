use resizer_core::AppError;
use thiserror::Error;

/// Image processing errors
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Processing task failed: {0}")]
    Task(String),
}

impl From<ProcessingError> for AppError {
    fn from(err: ProcessingError) -> Self {
        match err {
            ProcessingError::Io(e) => AppError::Internal(format!("IO error: {}", e)),
            ProcessingError::Task(msg) => AppError::Internal(msg),
            other => AppError::Codec(other.to_string()),
        }
    }
}
