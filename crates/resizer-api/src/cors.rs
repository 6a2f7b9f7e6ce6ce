//! CORS and configuration gate for the issuer route.
//!
//! The allowed origin is deployment configuration that may be missing, so the
//! headers are set per response instead of through a `CorsLayer`. The middleware
//! wraps the whole `/upload-url` method router, so body-limit rejections,
//! extractor rejections and 405s carry the headers as well.

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use resizer_core::constants::{CORS_ALLOW_HEADERS, CORS_ALLOW_METHODS};
use std::sync::Arc;

pub fn apply_cors_headers(headers: &mut HeaderMap, origin: &str) {
    let origin = HeaderValue::from_str(origin).unwrap_or_else(|_| {
        tracing::warn!(origin = %origin, "ALLOWED_ORIGIN is not a valid header value, using *");
        HeaderValue::from_static("*")
    });
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(CORS_ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(CORS_ALLOW_METHODS),
    );
}

/// An unconfigured issuer answers every request with the configuration error
/// before the body is read, whatever the method or body size.
pub async fn issuer_cors_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = match state.issuer.check_configured() {
        Ok(()) => next.run(request).await,
        Err(e) => HttpAppError(e).into_response(),
    };
    apply_cors_headers(response.headers_mut(), state.issuer.cors_origin());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_cors_headers() {
        let mut headers = HeaderMap::new();
        apply_cors_headers(&mut headers, "https://app.example");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "https://app.example");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST,OPTIONS");
    }

    #[test]
    fn test_invalid_origin_falls_back() {
        let mut headers = HeaderMap::new();
        apply_cors_headers(&mut headers, "bad\norigin");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
