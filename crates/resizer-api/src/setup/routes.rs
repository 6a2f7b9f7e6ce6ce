//! Route configuration and setup

use crate::cors::issuer_cors_middleware;
use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use resizer_core::{Component, Config};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Upper bound on request bodies; both endpoints only ever receive small JSON.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Setup all application routes
///
/// Body limits are applied per route so that the issuer's CORS middleware sits
/// outside the limit and also decorates 413 responses.
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router {
    let mut router = Router::new().route("/health", get(handlers::health::health_check));

    if config.serves(Component::Issuer) {
        router = router.route(
            "/upload-url",
            post(handlers::upload_url::create_upload_url)
                .options(handlers::upload_url::upload_url_preflight)
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    issuer_cors_middleware,
                )),
        );
    }

    if config.serves(Component::Worker) {
        router = router.route(
            "/events/s3",
            post(handlers::storage_events::handle_storage_event)
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)),
        );
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
