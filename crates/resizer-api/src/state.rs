use resizer_core::Config;
use resizer_storage::Storage;
use resizer_worker::ResizeWorker;
use std::sync::Arc;

use crate::services::UploadUrlIssuer;

/// Shared handler state. Both components are always constructed; the router
/// decides which of them are reachable.
pub struct AppState {
    pub issuer: UploadUrlIssuer,
    pub worker: ResizeWorker,
}

impl AppState {
    pub fn new(config: &Config, storage: Arc<dyn Storage>) -> Self {
        Self {
            issuer: UploadUrlIssuer::new(storage.clone(), config.issuer.clone()),
            worker: ResizeWorker::new(storage, config.worker.clone()),
        }
    }
}
