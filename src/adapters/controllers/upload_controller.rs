use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use tracing::{debug, info};

use crate::{
    adapters::dto::upload_dto::UploadResponse,
    application::{error::ApplicationError, services::UploadService},
    domain::models::{file::FilePart, upload::UploadBatch},
};

/// Content type assumed for file parts that do not declare one.
const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

pub struct UploadController;

impl UploadController {
    /// POST /upload
    pub async fn upload(
        State(upload_service): State<Arc<UploadService>>,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Json<UploadResponse>, ApplicationError> {
        let mut multipart = multipart?;
        let mut batch = upload_service.begin();

        if let Err(e) = Self::read_parts(&upload_service, &mut batch, &mut multipart).await {
            upload_service.abort(batch).await;
            return Err(e);
        }

        let result = batch.into_result();
        info!(
            files = result.files.iter().filter(|(_, f)| f.is_some()).count(),
            fields = result.fields.len(),
            "Upload accepted"
        );

        Ok(Json(UploadResponse::from(result)))
    }

    /// Consumes parts in arrival order. Stops at the first rejected part;
    /// whatever was stored before it is still recorded in `batch`.
    async fn read_parts(
        upload_service: &UploadService,
        batch: &mut UploadBatch,
        multipart: &mut Multipart,
    ) -> Result<(), ApplicationError> {
        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                debug!("Skipping multipart part without a name");
                continue;
            };

            let Some(original_name) = field.file_name().map(str::to_owned) else {
                let value = field.text().await?;
                batch.push_text(name, value);
                continue;
            };

            let Some(slot) = batch.slot(&name) else {
                debug!("Ignoring file part under unrecognised field '{}'", name);
                continue;
            };

            if batch.is_filled(slot) {
                return Err(ApplicationError::UnexpectedFile(name));
            }

            let mime_type = field.content_type().unwrap_or(FALLBACK_MIME_TYPE).to_owned();
            let part = FilePart::new(name, original_name, mime_type);
            upload_service.validate(&part)?;

            let stored = upload_service.persist(part, field).await?;
            batch.fill(slot, stored);
        }

        Ok(())
    }
}
