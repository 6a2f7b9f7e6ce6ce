//! Resizer Core Library
//!
//! This crate provides the pieces shared by the upload-URL issuer and the resize
//! worker: the object key naming contract, request/response models, the unified
//! error type and environment configuration.
//!
//! # Key layout
//!
//! - **Source objects**: `uploads/{timestamp}-{uuid}{extension}`
//! - **Output objects**: `resized/{source_key}`
//!
//! Both components compute the output key through [`keys::derive_output_key`];
//! nothing else in the workspace may build it by hand.

pub mod config;
pub mod constants;
pub mod error;
pub mod keys;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{Component, Config, IssuerConfig, IssuerSettings, StorageConfig, WorkerConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use keys::{derive_output_key, ObjectKeys};
pub use storage_types::StorageBackend;
