//! Resizer Storage Library
//!
//! This crate provides the storage abstraction used by both halves of the
//! pipeline: signing upload/download capabilities for the issuer, and moving
//! objects between storage and local disk for the worker.
//!
//! Every operation names its namespace (bucket) explicitly, because the worker
//! reads from whichever bucket the notification names and writes to a different one.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use resizer_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
