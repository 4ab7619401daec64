use axum::extract::FromRef;
use std::sync::Arc;

use crate::{
    application::services::{StorageService, UploadService},
    domain::config::upload::UploadConfig,
};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub upload_config: Arc<UploadConfig>,
    pub upload_service: Arc<UploadService>,
}

impl AppState {
    pub fn new(upload_config: UploadConfig, storage: Arc<dyn StorageService>) -> Self {
        let upload_config = Arc::new(upload_config);
        let upload_service = Arc::new(UploadService::new(storage, upload_config.clone()));
        Self {
            upload_config,
            upload_service,
        }
    }
}
