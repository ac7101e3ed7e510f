use axum::http::StatusCode;
use axum::response::Response;
use serde::Serialize;

use crate::utils::response::with_message;

pub mod events;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "cbconnect-api",
    };

    with_message(StatusCode::OK, "Health check successful", payload)
}
