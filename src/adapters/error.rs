use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::application::error::ApplicationError;

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let status = match self {
            ApplicationError::Unauthorized => {
                warn!("Unauthorized access attempt");
                StatusCode::UNAUTHORIZED
            }
            ApplicationError::InternalError(ref msg) => {
                error!("Internal server error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ref rejected => {
                warn!("Upload rejected: {}", rejected);
                StatusCode::BAD_REQUEST
            }
        };

        let body = match self.client_message() {
            Some(message) => json!({ "error": self.code(), "message": message }),
            None => json!({ "error": self.code() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<MultipartError> for ApplicationError {
    fn from(error: MultipartError) -> Self {
        if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApplicationError::RequestTooLarge(error.body_text())
        } else {
            ApplicationError::MalformedMultipart(error.body_text())
        }
    }
}

impl From<MultipartRejection> for ApplicationError {
    fn from(rejection: MultipartRejection) -> Self {
        ApplicationError::MalformedMultipart(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::Value;

    use super::*;

    async fn render(error: ApplicationError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn unauthorized_has_no_message() {
        let (status, body) = render(ApplicationError::Unauthorized).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Unauthorized" }));
    }

    #[tokio::test]
    async fn limit_errors_have_limit_codes() {
        let (status, body) = render(ApplicationError::FileTooLarge("image1".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "LIMIT_FILE_SIZE", "message": "File too large" }));

        let (status, body) = render(ApplicationError::UnexpectedFile("image1".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "error": "LIMIT_UNEXPECTED_FILE", "message": "Unexpected field" })
        );
    }

    #[tokio::test]
    async fn validation_and_parse_errors_are_bad_requests() {
        let (status, body) =
            render(ApplicationError::UnsupportedFileType("application/pdf".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "UNSUPPORTED_FILE_TYPE");
        assert_eq!(body["message"], "Unsupported file type");

        let (status, body) =
            render(ApplicationError::MalformedMultipart("missing boundary".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "MALFORMED_MULTIPART");
        assert_eq!(body["message"], "missing boundary");
    }

    #[tokio::test]
    async fn internal_errors_hide_details() {
        let (status, body) =
            render(ApplicationError::InternalError("disk on fire at /srv".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "UnknownError" }));
    }
}
