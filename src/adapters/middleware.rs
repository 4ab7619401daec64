use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::{application::error::ApplicationError, domain::config::upload::UploadConfig};

/// Middleware that requires the configured bearer credential in the
/// `Authorization` header. Runs before the body is touched.
pub async fn require_bearer_token(
    State(config): State<Arc<UploadConfig>>,
    headers: HeaderMap,
    request: Request<Body>,
    next: Next,
) -> Response {
    match headers.get(AUTHORIZATION).map(|v| v.to_str()) {
        Some(Ok(provided)) if provided == config.expected_authorization() => next.run(request).await,
        Some(Ok(_)) => {
            warn!("Invalid credential in Authorization header");
            ApplicationError::Unauthorized.into_response()
        }
        Some(Err(_)) => {
            warn!("Authorization header contains invalid characters");
            ApplicationError::Unauthorized.into_response()
        }
        None => {
            warn!("Authorization header is missing");
            ApplicationError::Unauthorized.into_response()
        }
    }
}
