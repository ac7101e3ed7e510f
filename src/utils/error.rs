use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::services::uploader::UploadError;
use crate::utils::response::{failure, rejection};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Image file is required")]
    MissingImage,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    #[error("Database error")]
    Database(#[from] mongodb::error::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingImage => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Upload(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        match self {
            AppError::MissingImage => {
                error!(error = ?self, "Submission rejected: no image part");
            }
            AppError::Validation(msg) => {
                error!(error = ?self, message = %msg, "Validation error");
            }
            AppError::Upload(e) => {
                error!(error = ?e, "Media upload error");
            }
            AppError::Database(e) => {
                error!(error = ?e, "Database error");
            }
            AppError::Internal(msg) => {
                error!(error = ?self, message = %msg, "Internal error");
            }
        }
    }

    // Internal database details are logged, not sent to the client.
    fn public_detail(&self) -> String {
        match self {
            AppError::Database(_) => "A database error occurred".to_string(),
            other => other.to_string(),
        }
    }

    /// Convert into the endpoint error contract. Client errors answer with
    /// their own message; server errors answer with the endpoint's `context`
    /// message plus a diagnostic `error` string.
    pub fn into_error_response(self, context: &str) -> Response {
        let status = self.status_code();
        self.log();

        if status.is_client_error() {
            rejection(status, self.to_string())
        } else {
            failure(status, context, self.public_detail())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_error_response("Request failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_400() {
        assert_eq!(AppError::MissingImage.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Validation("bad".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn server_errors_map_to_500() {
        assert_eq!(
            AppError::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Upload(UploadError::MalformedResponse).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn missing_image_message_matches_contract() {
        assert_eq!(AppError::MissingImage.to_string(), "Image file is required");
    }
}
