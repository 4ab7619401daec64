use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::models::{file::StoredFile, upload::UploadResult};

#[derive(Debug, Serialize)]
pub struct StoredFileResponse {
    pub field: String,
    #[serde(rename = "originalname")]
    pub original_name: String,
    pub filename: String,
    #[serde(rename = "mimetype")]
    pub mime_type: String,
    pub size: u64,
    #[serde(rename = "savedPath")]
    pub saved_path: String,
}

impl From<StoredFile> for StoredFileResponse {
    fn from(file: StoredFile) -> Self {
        Self {
            field: file.field,
            original_name: file.original_name,
            filename: file.filename,
            mime_type: file.mime_type,
            size: file.size,
            saved_path: file.saved_path.display().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    pub files: Vec<Option<StoredFileResponse>>,
    pub fields: Map<String, Value>,
}

impl From<UploadResult> for UploadResponse {
    fn from(result: UploadResult) -> Self {
        Self {
            message: "uploaded",
            files: result
                .files
                .into_iter()
                .map(|(_, file)| file.map(StoredFileResponse::from))
                .collect(),
            fields: result.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::json;

    use super::*;
    use crate::domain::models::file::FilePart;

    #[test]
    fn serializes_in_field_order_with_nulls() {
        let stored = StoredFile::new(
            FilePart::new("image2".into(), "cat.png".into(), "image/png".into()),
            "cat-1-2.png".into(),
            1024,
            PathBuf::from("/srv/uploads/cat-1-2.png"),
        );
        let mut fields = Map::new();
        fields.insert("caption".into(), json!("hello"));

        let result = UploadResult {
            files: vec![
                ("image1".into(), None),
                ("image2".into(), Some(stored)),
                ("image3".into(), None),
            ],
            fields,
        };

        let body = serde_json::to_value(UploadResponse::from(result)).unwrap();
        assert_eq!(
            body,
            json!({
                "message": "uploaded",
                "files": [
                    null,
                    {
                        "field": "image2",
                        "originalname": "cat.png",
                        "filename": "cat-1-2.png",
                        "mimetype": "image/png",
                        "size": 1024,
                        "savedPath": "/srv/uploads/cat-1-2.png"
                    },
                    null
                ],
                "fields": { "caption": "hello" }
            })
        );
    }
}
