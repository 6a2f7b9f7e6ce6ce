//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`; any [`AppError`] converts with `?`
//! and renders as `{"error": "..."}` with the status from [`ErrorMetadata`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use resizer_core::models::ErrorBody;
use resizer_core::{AppError, ErrorMetadata, LogLevel};

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from resizer-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<serde_json::Error> for HttpAppError {
    fn from(err: serde_json::Error) -> Self {
        HttpAppError(err.into())
    }
}

pub(crate) fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

/// Build an error response with an explicit client message.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        error_response(status, app_error.client_message())
    }
}
