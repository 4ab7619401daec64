use thiserror::Error;

use crate::application::error::ApplicationError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Storage directory error: {0}")]
    DirectoryError(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),
}

impl From<StorageError> for ApplicationError {
    fn from(error: StorageError) -> Self {
        ApplicationError::InternalError(format!("Storage error: {}", error))
    }
}
