pub mod storage_service;
pub mod upload_service;

pub use storage_service::{FileSink, StorageService};
pub use upload_service::UploadService;
