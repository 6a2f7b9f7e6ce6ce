mod helpers;

use axum::http::Method;
use helpers::*;
use resizer_api::setup::routes::MAX_BODY_BYTES;
use resizer_core::IssuerConfig;
use serde_json::{json, Value};

fn assert_cors(response: &axum_test::TestResponse, origin: &str) {
    assert_eq!(response.header("access-control-allow-origin"), origin);
    assert_eq!(response.header("access-control-allow-headers"), "Content-Type");
    assert_eq!(response.header("access-control-allow-methods"), "POST,OPTIONS");
}

#[tokio::test]
async fn test_upload_url_issued() {
    let app = setup_test_app();

    let response = app
        .server
        .post("/upload-url")
        .json(&json!({"filename": "cat.PNG", "contentType": "image/png"}))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_cors(&response, ALLOWED_ORIGIN);

    let body: Value = response.json();
    let destination_key = body["destinationKey"].as_str().unwrap();
    assert!(destination_key.starts_with("resized/uploads/"));
    assert!(destination_key.ends_with(".png"));
    assert!(body["uploadUrl"].as_str().unwrap().contains(SOURCE_BUCKET));
    assert!(body["downloadUrl"]
        .as_str()
        .unwrap()
        .contains(destination_key));

    let calls = app.storage.presign_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].bucket, SOURCE_BUCKET);
    assert_eq!(calls[0].content_type.as_deref(), Some("image/png"));
    assert_eq!(format!("resized/{}", calls[0].key), destination_key);
    assert_eq!(calls[1].bucket, DESTINATION_BUCKET);
}

#[tokio::test]
async fn test_each_request_gets_fresh_keys() {
    let app = setup_test_app();
    let body = json!({"filename": "a.jpg", "contentType": "image/jpeg"});

    let first: Value = app.server.post("/upload-url").json(&body).await.json();
    let second: Value = app.server.post("/upload-url").json(&body).await.json();

    assert_ne!(first["destinationKey"], second["destinationKey"]);
}

#[tokio::test]
async fn test_missing_fields_rejected() {
    let app = setup_test_app();

    for body in [
        json!({"filename": "cat.png"}),
        json!({"contentType": "image/png"}),
        json!({"filename": "", "contentType": "image/png"}),
        json!({}),
    ] {
        let response = app.server.post("/upload-url").json(&body).await;
        assert_eq!(response.status_code(), 400);
        assert_cors(&response, ALLOWED_ORIGIN);
        assert_eq!(
            response.json::<Value>(),
            json!({"error": "Missing 'filename' or 'contentType' in request body."})
        );
    }

    let response = app.server.post("/upload-url").await;
    assert_eq!(response.status_code(), 400);
    assert!(app.storage.presign_calls().is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = setup_test_app();

    let response = app.server.post("/upload-url").text("{not json").await;

    assert_eq!(response.status_code(), 400);
    assert_cors(&response, ALLOWED_ORIGIN);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));
}

#[tokio::test]
async fn test_missing_configuration_answers_every_request() {
    let app = setup_test_app_with(
        IssuerConfig {
            allowed_origin: None,
            ..configured_issuer()
        },
        Some(DESTINATION_BUCKET),
    );

    for request in [
        app.server
            .post("/upload-url")
            .json(&json!({"filename": "cat.png", "contentType": "image/png"})),
        app.server.post("/upload-url").text("garbage"),
        app.server
            .post("/upload-url")
            .text("x".repeat(MAX_BODY_BYTES * 2)),
        app.server.method(Method::OPTIONS, "/upload-url"),
    ] {
        let response = request.await;
        assert_eq!(response.status_code(), 500);
        assert_cors(&response, "*");
        assert_eq!(
            response.json::<Value>(),
            json!({"error": "Server configuration error."})
        );
    }
    assert!(app.storage.presign_calls().is_empty());
}

#[tokio::test]
async fn test_signing_failure_is_server_error() {
    let app = setup_test_app();
    app.storage.fail_signing(true);

    let response = app
        .server
        .post("/upload-url")
        .json(&json!({"filename": "cat.gif", "contentType": "image/gif"}))
        .await;

    assert_eq!(response.status_code(), 500);
    assert_cors(&response, ALLOWED_ORIGIN);
    let body: Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to process request: "));
}

#[tokio::test]
async fn test_preflight() {
    let app = setup_test_app();

    let response = app.server.method(Method::OPTIONS, "/upload-url").await;

    assert_eq!(response.status_code(), 204);
    assert_cors(&response, ALLOWED_ORIGIN);
}

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();

    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), json!({"status": "alive"}));
}

#[tokio::test]
async fn test_oversized_body_keeps_cors_headers() {
    let app = setup_test_app();

    let response = app
        .server
        .post("/upload-url")
        .text("x".repeat(MAX_BODY_BYTES * 2))
        .await;

    assert_eq!(response.status_code(), 413);
    assert_cors(&response, ALLOWED_ORIGIN);
    assert!(app.storage.presign_calls().is_empty());
}

#[tokio::test]
async fn test_unsupported_method_keeps_cors_headers() {
    let app = setup_test_app();

    let response = app.server.get("/upload-url").await;

    assert_eq!(response.status_code(), 405);
    assert_cors(&response, ALLOWED_ORIGIN);
}
