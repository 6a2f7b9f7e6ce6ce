//! Resizer Processing Library
//!
//! Decode, conditionally downsize and re-encode a single image on local disk,
//! plus the helpers the worker needs around that step: content-type sniffing
//! from the object key and scoped transient files.

pub mod content_type;
pub mod error;
pub mod resize;
pub mod transient;

pub use content_type::content_type_for_key;
pub use error::ProcessingError;
pub use resize::{target_dimensions, ImageResizer, ResizeOutcome};
pub use transient::TransientFiles;
