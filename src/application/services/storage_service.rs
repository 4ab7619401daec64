use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::application::error::ApplicationError;

/// Flat destination for accepted uploads.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Opens a new file named `filename` at the top level of the store,
    /// truncating any existing file of that name.
    async fn create(&self, filename: &str) -> Result<Box<dyn FileSink>, ApplicationError>;

    async fn delete(&self, path: &Path) -> Result<(), ApplicationError>;
}

/// Destination of one file being streamed into storage.
#[async_trait]
pub trait FileSink: Send {
    fn path(&self) -> &Path;

    async fn write(&mut self, chunk: &[u8]) -> Result<(), ApplicationError>;

    /// Flushes buffered bytes and returns the final location.
    async fn finish(&mut self) -> Result<PathBuf, ApplicationError>;
}
