use axum::{extract::DefaultBodyLimit, http::HeaderValue, middleware, routing::post, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::{
    adapters::{
        controllers::upload_controller::UploadController, middleware::require_bearer_token,
        state::AppState,
    },
    domain::config::server::ServerConfig,
};

pub fn cors_layer(server_config: &ServerConfig) -> CorsLayer {
    match &server_config.cors_allowed_origins {
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("Ignoring invalid CORS origin: {}", origin);
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => CorsLayer::permissive(),
    }
}

pub fn create_router(app_state: AppState, cors: CorsLayer) -> Router {
    let body_limit = app_state.upload_config.max_body_size();

    Router::new()
        .route("/upload", post(UploadController::upload))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_bearer_token,
        ))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
