use crate::error::{error_response, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use resizer_core::constants::{BATCH_COMPLETE_STATUS, DESTINATION_NOT_CONFIGURED};
use resizer_worker::StorageEvent;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub status: &'static str,
    /// Records published to the destination.
    pub processed: usize,
    /// Records dropped after logging.
    pub failed: usize,
}

/// `POST /events/s3`
///
/// Individual record failures never fail the request; they are only counted.
#[tracing::instrument(skip(state, body), fields(operation = "handle_storage_event"))]
pub async fn handle_storage_event(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, HttpAppError> {
    if let Err(e) = state.worker.config().destination_bucket() {
        tracing::error!(error = %e, "Rejecting storage event");
        return Ok(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            DESTINATION_NOT_CONFIGURED,
        ));
    }

    let event: StorageEvent = serde_json::from_slice(&body)?;
    let outcome = state.worker.handle_event(&event).await?;

    Ok(Json(BatchResponse {
        status: BATCH_COMPLETE_STATUS,
        processed: outcome.succeeded(),
        failed: outcome.failed(),
    })
    .into_response())
}
