use std::time::Duration;

/// Largest width or height the worker will publish.
pub const MAX_DIMENSION: u32 = 256;

/// Lifetime of the write capability handed to the client.
pub const UPLOAD_URL_EXPIRY: Duration = Duration::from_secs(600);

/// Lifetime of the read capability for the resized output.
pub const DOWNLOAD_URL_EXPIRY: Duration = Duration::from_secs(3600);

/// Prefix of every object the client uploads.
pub const SOURCE_PREFIX: &str = "uploads/";

/// Prefix wrapped around the full source key to form the output key.
pub const OUTPUT_PREFIX: &str = "resized/";

pub const CORS_ALLOW_HEADERS: &str = "Content-Type";
pub const CORS_ALLOW_METHODS: &str = "POST,OPTIONS";

/// Status marker returned once a storage-event batch has been processed.
pub const BATCH_COMPLETE_STATUS: &str = "Image processing complete.";

/// Error body of the storage-event endpoint when the worker has no destination.
pub const DESTINATION_NOT_CONFIGURED: &str = "Destination bucket not configured";
