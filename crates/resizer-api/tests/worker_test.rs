mod helpers;

use helpers::*;
use image::{GenericImageView, ImageFormat};
use resizer_storage::LocalStorage;
use serde_json::{json, Value};
use std::sync::Arc;

#[tokio::test]
async fn test_upload_then_resize_round_trip() {
    let app = setup_test_app();

    let issued: Value = app
        .server
        .post("/upload-url")
        .json(&json!({"filename": "cat.PNG", "contentType": "image/png"}))
        .await
        .json();
    let destination_key = issued["destinationKey"].as_str().unwrap().to_string();

    // The client PUTs to the signed URL; simulate the resulting object.
    let source_key = app.storage.presign_calls()[0].key.clone();
    assert!(source_key.starts_with("uploads/") && source_key.ends_with(".png"));
    app.storage.set_object(
        SOURCE_BUCKET,
        &source_key,
        image_bytes(1024, 512, ImageFormat::Png),
    );

    let response = app
        .server
        .post("/events/s3")
        .json(&s3_event(SOURCE_BUCKET, &[&source_key]))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.json::<Value>(),
        json!({"status": "Image processing complete.", "processed": 1, "failed": 0})
    );

    let published = app
        .storage
        .get_object(DESTINATION_BUCKET, &destination_key)
        .unwrap();
    assert_eq!(published.content_type.as_deref(), Some("image/png"));
    let img = image::load_from_memory(&published.data).unwrap();
    assert_eq!(img.dimensions(), (256, 128));
}

#[tokio::test]
async fn test_failed_records_are_counted_not_surfaced() {
    let app = setup_test_app();
    app.storage.set_object(
        SOURCE_BUCKET,
        "uploads/small.jpg",
        image_bytes(64, 64, ImageFormat::Jpeg),
    );
    app.storage
        .set_object(SOURCE_BUCKET, "uploads/corrupt.png", b"\x89PNG garbage".to_vec());

    let response = app
        .server
        .post("/events/s3")
        .json(&s3_event(
            SOURCE_BUCKET,
            &["uploads/corrupt.png", "uploads/missing.gif", "uploads/small.jpg"],
        ))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["processed"], 1);
    assert_eq!(body["failed"], 2);
    assert_eq!(
        app.storage.keys(DESTINATION_BUCKET),
        vec!["resized/uploads/small.jpg".to_string()]
    );
}

#[tokio::test]
async fn test_missing_destination_is_server_error() {
    let app = setup_test_app_with(configured_issuer(), None);
    app.storage.set_object(
        SOURCE_BUCKET,
        "uploads/a.png",
        image_bytes(300, 300, ImageFormat::Png),
    );

    let response = app
        .server
        .post("/events/s3")
        .json(&s3_event(SOURCE_BUCKET, &["uploads/a.png"]))
        .await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(
        response.json::<Value>(),
        json!({"error": "Destination bucket not configured"})
    );
    assert_eq!(app.storage.upload_count(), 0);
}

#[tokio::test]
async fn test_unparsable_envelope_is_bad_request() {
    let app = setup_test_app();

    let response = app.server.post("/events/s3").text("Records: nope").await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_local_storage_round_trip() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("objects");
    let storage = LocalStorage::new(&root, "http://localhost:4000/files".to_string())
        .await
        .unwrap();
    let config = test_config(
        configured_issuer(),
        Some(DESTINATION_BUCKET),
        &temp.path().join("work"),
    );
    let server = server_for(&config, Arc::new(storage));

    let source = root.join(SOURCE_BUCKET).join("uploads/my photo.gif");
    std::fs::create_dir_all(source.parent().unwrap()).unwrap();
    std::fs::write(&source, image_bytes(128, 512, ImageFormat::Gif)).unwrap();

    let response = server
        .post("/events/s3")
        .json(&s3_event(SOURCE_BUCKET, &["uploads/my+photo.gif"]))
        .await;
    assert_eq!(response.status_code(), 200);

    let output = root
        .join(DESTINATION_BUCKET)
        .join("resized/uploads/my photo.gif");
    let img = image::open(&output).unwrap();
    assert_eq!(img.dimensions(), (64, 256));
    assert_eq!(
        std::fs::read_dir(temp.path().join("work")).unwrap().count(),
        0
    );
}
