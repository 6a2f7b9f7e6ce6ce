//! Resizer HTTP API
//!
//! Mounts the upload-URL issuer and the storage-event worker endpoint on one
//! axum router. Which of the two a process serves is chosen by
//! `RESIZER_COMPONENTS`; `/health` is always mounted.

pub mod cors;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::HttpAppError;
pub use state::AppState;
