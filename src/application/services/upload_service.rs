use std::{
    path::{Path, PathBuf},
    pin::pin,
    sync::Arc,
};

use bytes::Bytes;
use chrono::Utc;
use futures_util::{Stream, StreamExt};
use rand::Rng;
use tracing::{error, info, warn};

use crate::{
    application::{
        error::ApplicationError,
        services::storage_service::{FileSink, StorageService},
    },
    domain::{
        config::upload::UploadConfig,
        models::{
            file::{FilePart, StoredFile, RANDOM_SUFFIX_BOUND},
            upload::UploadBatch,
        },
    },
};

/// Validation and persistence policy for file parts.
pub struct UploadService {
    storage: Arc<dyn StorageService>,
    config: Arc<UploadConfig>,
}

impl UploadService {
    pub fn new(storage: Arc<dyn StorageService>, config: Arc<UploadConfig>) -> Self {
        Self { storage, config }
    }

    pub fn begin(&self) -> UploadBatch {
        UploadBatch::new(&self.config.file_fields)
    }

    /// Checks the declared MIME type against the whitelist.
    pub fn validate(&self, part: &FilePart) -> Result<(), ApplicationError> {
        if !self.config.allowed_mime_types.contains(&part.mime_type) {
            return Err(ApplicationError::UnsupportedFileType(part.mime_type.clone()));
        }
        Ok(())
    }

    /// Streams `content` into a freshly named file. A part that outgrows the
    /// size cap, or whose stream fails, leaves nothing behind.
    pub async fn persist<S, E>(&self, part: FilePart, content: S) -> Result<StoredFile, ApplicationError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        ApplicationError: From<E>,
    {
        let random = rand::thread_rng().gen_range(0..RANDOM_SUFFIX_BOUND);
        let filename = part.storage_filename(Utc::now().timestamp_millis(), random);

        let mut sink = self.storage.create(&filename).await?;

        match Self::copy_limited(&mut *sink, content, self.config.max_file_size, &part.field).await {
            Ok((size, saved_path)) => {
                info!(
                    field = %part.field,
                    original = %part.original_name,
                    filename = %filename,
                    size_bytes = size,
                    "Stored upload"
                );
                Ok(StoredFile::new(part, filename, size, saved_path))
            }
            Err(e) => {
                let path = sink.path().to_path_buf();
                self.discard(&path).await;
                Err(e)
            }
        }
    }

    /// Handles a failed request. Files stored for earlier fields stay on
    /// disk unless rollback is enabled.
    pub async fn abort(&self, batch: UploadBatch) {
        let stored = batch.stored().count();
        if stored == 0 {
            return;
        }

        if !self.config.rollback_on_error {
            warn!(stored, "Upload request failed after storing files; leaving them in place");
            return;
        }

        for file in batch.stored() {
            self.discard(&file.saved_path).await;
        }
        info!(stored, "Rolled back files of failed upload request");
    }

    async fn copy_limited<S, E>(
        sink: &mut dyn FileSink,
        content: S,
        max_size: u64,
        field: &str,
    ) -> Result<(u64, PathBuf), ApplicationError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        ApplicationError: From<E>,
    {
        let mut content = pin!(content);
        let mut size: u64 = 0;

        while let Some(chunk) = content.next().await {
            let chunk = chunk?;
            size += chunk.len() as u64;
            if size > max_size {
                warn!(field, max_size, "File exceeds size limit");
                return Err(ApplicationError::FileTooLarge(field.to_string()));
            }
            sink.write(&chunk).await?;
        }

        let saved_path = sink.finish().await?;
        Ok((size, saved_path))
    }

    async fn discard(&self, path: &Path) {
        if let Err(e) = self.storage.delete(path).await {
            error!("Failed to remove {}: {}", path.display(), e);
        }
    }
}
