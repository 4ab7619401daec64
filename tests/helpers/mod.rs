#![allow(dead_code)]

use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use axum_test::{multipart::Part, TestServer};
use image_upload_service::{
    adapters::{
        router::{cors_layer, create_router},
        state::AppState,
    },
    application::{
        error::ApplicationError,
        services::{FileSink, StorageService},
    },
    domain::config::{server::ServerConfig, upload::UploadConfig},
    services::LocalDiskStorage,
};
use tempfile::TempDir;

pub const TEST_TOKEN: &str = "test-secret";

/// Test application with an isolated storage directory
pub struct TestApp {
    pub server: TestServer,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Names of the files currently in the storage directory, sorted.
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.upload_dir.path())
            .expect("Failed to read upload directory")
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

pub fn bearer() -> String {
    format!("Bearer {}", TEST_TOKEN)
}

/// A file part of `size` bytes with the given name and declared type.
pub fn image_part(file_name: &str, mime_type: &str, size: usize) -> Part {
    Part::bytes(vec![0xAB; size])
        .file_name(file_name)
        .mime_type(mime_type)
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

pub async fn setup_test_app_with(configure: impl FnOnce(&mut UploadConfig)) -> TestApp {
    let upload_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let storage = LocalDiskStorage::new(upload_dir.path())
        .await
        .expect("Failed to create local storage");

    let mut config = UploadConfig::new(TEST_TOKEN, upload_dir.path());
    configure(&mut config);

    build(config, Arc::new(storage), upload_dir)
}

/// App whose storage refuses every write.
pub async fn setup_failing_app() -> TestApp {
    let upload_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = UploadConfig::new(TEST_TOKEN, upload_dir.path());
    build(config, Arc::new(FailingStorage), upload_dir)
}

fn build(config: UploadConfig, storage: Arc<dyn StorageService>, upload_dir: TempDir) -> TestApp {
    let server_config = ServerConfig {
        port: 0,
        cors_allowed_origins: None,
    };
    let router = create_router(AppState::new(config, storage), cors_layer(&server_config));
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp { server, upload_dir }
}

struct FailingStorage;

#[async_trait]
impl StorageService for FailingStorage {
    async fn create(&self, filename: &str) -> Result<Box<dyn FileSink>, ApplicationError> {
        Err(ApplicationError::InternalError(format!(
            "read-only file system while creating {}",
            filename
        )))
    }

    async fn delete(&self, path: &Path) -> Result<(), ApplicationError> {
        Err(ApplicationError::InternalError(format!(
            "read-only file system while deleting {}",
            path.display()
        )))
    }
}
