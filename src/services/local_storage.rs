use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::{
    fs,
    io::{AsyncWriteExt, BufWriter},
};
use tracing::debug;

use super::error::StorageError;
use crate::application::{
    error::ApplicationError,
    services::{FileSink, StorageService},
};

/// Stores uploads as flat files under a single directory.
#[derive(Debug, Clone)]
pub struct LocalDiskStorage {
    root: PathBuf,
}

impl LocalDiskStorage {
    /// Creates `root` if needed and resolves it to an absolute path.
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();

        fs::create_dir_all(&root).await.map_err(|e| {
            StorageError::DirectoryError(format!("Failed to create {}: {}", root.display(), e))
        })?;

        let root = fs::canonicalize(&root).await.map_err(|e| {
            StorageError::DirectoryError(format!("Failed to resolve {}: {}", root.display(), e))
        })?;

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a generated filename to its location, refusing anything that
    /// is not a single plain path component.
    fn path_for(&self, filename: &str) -> Result<PathBuf, StorageError> {
        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(filename)),
            _ => Err(StorageError::InvalidFilename(filename.to_string())),
        }
    }
}

#[async_trait]
impl StorageService for LocalDiskStorage {
    async fn create(&self, filename: &str) -> Result<Box<dyn FileSink>, ApplicationError> {
        let path = self.path_for(filename)?;

        let file = fs::File::create(&path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create {}: {}", path.display(), e))
        })?;

        debug!("Opened {} for writing", path.display());

        Ok(Box::new(LocalFileSink {
            path,
            writer: BufWriter::new(file),
        }))
    }

    async fn delete(&self, path: &Path) -> Result<(), ApplicationError> {
        if !path.starts_with(&self.root) {
            return Err(StorageError::InvalidFilename(path.display().to_string()).into());
        }

        fs::remove_file(path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete {}: {}", path.display(), e))
        })?;

        debug!("Deleted {}", path.display());
        Ok(())
    }
}

struct LocalFileSink {
    path: PathBuf,
    writer: BufWriter<fs::File>,
}

#[async_trait]
impl FileSink for LocalFileSink {
    fn path(&self) -> &Path {
        &self.path
    }

    async fn write(&mut self, chunk: &[u8]) -> Result<(), ApplicationError> {
        self.writer.write_all(chunk).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write {}: {}", self.path.display(), e))
        })?;
        Ok(())
    }

    async fn finish(&mut self) -> Result<PathBuf, ApplicationError> {
        self.writer.flush().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to flush {}: {}", self.path.display(), e))
        })?;
        Ok(self.path.clone())
    }
}
