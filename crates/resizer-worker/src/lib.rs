//! Resize worker
//!
//! Consumes storage-write notifications, downsizes each new image that exceeds
//! the maximum dimension and republishes it under the output key the issuer has
//! already promised to the client.

pub mod event;
pub mod outcome;
pub mod worker;

pub use event::{decode_event_key, EventRecord, StorageEvent, StorageNotification};
pub use outcome::{BatchOutcome, RecordReport, RecordStatus};
pub use worker::ResizeWorker;
