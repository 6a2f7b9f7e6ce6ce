//! CORS headers and the configuration check are applied around these handlers
//! by [`crate::cors::issuer_cors_middleware`].

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use std::sync::Arc;

/// `POST /upload-url`
///
/// The body is taken raw so that empty bodies and non-object JSON get the
/// issuer's own validation messages.
pub async fn create_upload_url(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, HttpAppError> {
    let urls = state.issuer.issue(&body).await?;
    Ok((StatusCode::OK, Json(urls)).into_response())
}

/// `OPTIONS /upload-url`
pub async fn upload_url_preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}
