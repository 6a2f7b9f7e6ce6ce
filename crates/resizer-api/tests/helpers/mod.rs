//! Test helpers: build AppState and router for integration tests.

#![allow(dead_code)]

use axum_test::TestServer;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use resizer_api::setup::routes;
use resizer_api::AppState;
use resizer_core::{
    Component, Config, IssuerConfig, StorageBackend, StorageConfig, WorkerConfig,
};
use resizer_storage::test_helpers::MockStorage;
use resizer_storage::Storage;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub const SOURCE_BUCKET: &str = "source-bucket";
pub const DESTINATION_BUCKET: &str = "destination-bucket";
pub const ALLOWED_ORIGIN: &str = "https://app.example.com";

/// Test application: server plus the storage it writes to.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<MockStorage>,
    pub _temp_dir: TempDir,
}

pub fn configured_issuer() -> IssuerConfig {
    IssuerConfig {
        source_bucket: Some(SOURCE_BUCKET.to_string()),
        destination_bucket: Some(DESTINATION_BUCKET.to_string()),
        allowed_origin: Some(ALLOWED_ORIGIN.to_string()),
    }
}

pub fn test_config(issuer: IssuerConfig, destination: Option<&str>, temp_dir: &Path) -> Config {
    Config {
        server_port: 0,
        environment: "test".to_string(),
        components: vec![Component::Issuer, Component::Worker],
        issuer,
        worker: WorkerConfig {
            destination_bucket: destination.map(String::from),
            temp_dir: temp_dir.to_path_buf(),
            ..WorkerConfig::default()
        },
        storage: StorageConfig {
            backend: StorageBackend::Local,
            region: None,
            endpoint: None,
            local_path: None,
            local_base_url: None,
        },
    }
}

pub fn server_for(config: &Config, storage: Arc<dyn Storage>) -> TestServer {
    let state = Arc::new(AppState::new(config, storage));
    TestServer::new(routes::setup_routes(config, state)).unwrap()
}

/// Fully configured app backed by [`MockStorage`].
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(configured_issuer(), Some(DESTINATION_BUCKET))
}

pub fn setup_test_app_with(issuer: IssuerConfig, destination: Option<&str>) -> TestApp {
    let temp_dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(MockStorage::new());
    let config = test_config(issuer, destination, temp_dir.path());
    let server = server_for(&config, storage.clone());
    TestApp {
        server,
        storage,
        _temp_dir: temp_dir,
    }
}

pub fn image_bytes(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba([30, 90, 160, 255]),
    ));
    let img = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
        _ => img,
    };
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), format).unwrap();
    buffer
}

pub fn s3_event(bucket: &str, keys: &[&str]) -> serde_json::Value {
    let records: Vec<serde_json::Value> = keys
        .iter()
        .map(|key| {
            serde_json::json!({
                "eventName": "ObjectCreated:Put",
                "s3": { "bucket": { "name": bucket }, "object": { "key": key } }
            })
        })
        .collect();
    serde_json::json!({ "Records": records })
}
