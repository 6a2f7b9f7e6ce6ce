//! Error types module
//!
//! Every failure in the pipeline is expressed as an [`AppError`]. The issuer turns
//! it into an HTTP response through [`ErrorMetadata`]; the worker only logs it.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for per-record failures the worker drops
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "CONFIGURATION_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Required deployment parameters are missing. Blocks the whole invocation.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Client-correctable problem with the request.
    #[error("{0}")]
    Validation(String),

    /// Signing or storage I/O failure at the provider.
    #[error("Storage provider error: {0}")]
    Provider(String),

    /// Image decode or encode failure.
    #[error("Image codec error: {0}")]
    Codec(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short variant name used as a structured log field.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "configuration",
            AppError::Validation(_) => "validation",
            AppError::Provider(_) => "provider",
            AppError::Codec(_) => "codec",
            AppError::Internal(_) => "internal",
        }
    }

    /// Message detail without the variant prefix.
    pub fn detail(&self) -> &str {
        match self {
            AppError::Configuration(m)
            | AppError::Validation(m)
            | AppError::Provider(m)
            | AppError::Codec(m)
            | AppError::Internal(m) => m,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("Invalid JSON in request body: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::Validation(_) => 400,
            AppError::Configuration(_)
            | AppError::Provider(_)
            | AppError::Codec(_)
            | AppError::Internal(_) => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Provider(_) => "STORAGE_ERROR",
            AppError::Codec(_) => "IMAGE_PROCESSING_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Configuration(_) => "Server configuration error.".to_string(),
            AppError::Validation(msg) => msg.clone(),
            // The caller is a first-party client; keep the provider detail.
            other => format!("Failed to process request: {}", other.detail()),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::Validation(_) => LogLevel::Debug,
            AppError::Codec(_) => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}
