use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Success envelope: `{"message": ..., <flattened payload>}`.
#[derive(Serialize)]
pub struct ApiMessage<T>
where
    T: Serialize,
{
    pub message: String,
    #[serde(flatten)]
    pub data: T,
}

/// Client-error envelope: `{"message": ...}`.
#[derive(Serialize)]
pub struct ApiRejection {
    pub message: String,
}

/// Server-error envelope: `{"message": ..., "error": ...}`.
#[derive(Serialize)]
pub struct ApiFailure {
    pub message: String,
    pub error: String,
}

pub fn with_message<T>(status: StatusCode, message: impl Into<String>, data: T) -> Response
where
    T: Serialize,
{
    let body = ApiMessage {
        message: message.into(),
        data,
    };
    (status, Json(body)).into_response()
}

pub fn rejection(status: StatusCode, message: impl Into<String>) -> Response {
    let body = ApiRejection {
        message: message.into(),
    };
    (status, Json(body)).into_response()
}

pub fn failure(
    status: StatusCode,
    message: impl Into<String>,
    error: impl Into<String>,
) -> Response {
    let body = ApiFailure {
        message: message.into(),
        error: error.into(),
    };
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Payload {
        count: u32,
    }

    #[test]
    fn with_message_flattens_payload() {
        let body = ApiMessage {
            message: "ok".to_string(),
            data: Payload { count: 3 },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["message"], "ok");
        assert_eq!(value["count"], 3);
    }

    #[test]
    fn rejection_carries_only_message() {
        let value = serde_json::to_value(ApiRejection {
            message: "nope".to_string(),
        })
        .unwrap();
        assert_eq!(value.as_object().unwrap().len(), 1);
    }
}
