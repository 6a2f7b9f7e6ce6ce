//! Test helpers
//!
//! In-memory [`Storage`](crate::Storage) for unit and integration tests of the
//! issuer and worker, so they run without a storage provider.

pub mod mock_storage;

pub use mock_storage::*;
