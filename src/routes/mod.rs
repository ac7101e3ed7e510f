use axum::extract::DefaultBodyLimit;
use axum::{routing::get, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::{events, health_check};
use crate::state::AppState;

// Uploaded images are buffered fully in memory before the outbound call, so
// the request size is bounded explicitly.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/events",
            get(events::list_events).post(events::create_event),
        )
        .fallback_service(ServeDir::new("static"))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer())
        .layer(create_cors_layer())
        .with_state(state)
}
