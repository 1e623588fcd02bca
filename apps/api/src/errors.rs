use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::google::GoogleApiError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every failure is rendered as `{"detail": "..."}`. Server-side failures carry
/// the underlying message verbatim behind a `Server error: ` prefix.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Resume must be PDF or DOCX")]
    InvalidMediaType,

    #[error("Resume too large (max 5MB)")]
    PayloadTooLarge,

    #[error("Empty file uploaded")]
    EmptyFile,

    #[error("Field required: {0}")]
    MissingField(&'static str),

    #[error("Invalid multipart body: {0}")]
    MalformedForm(String),

    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    ExternalService(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidMediaType | AppError::PayloadTooLarge | AppError::MalformedForm(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EmptyFile | AppError::Configuration(_) | AppError::ExternalService(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The `detail` string sent to the caller.
    pub fn detail(&self) -> String {
        if self.status().is_server_error() {
            format!("Server error: {self}")
        } else {
            self.to_string()
        }
    }
}

impl From<GoogleApiError> for AppError {
    fn from(err: GoogleApiError) -> Self {
        AppError::ExternalService(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();

        if status.is_server_error() {
            tracing::error!("Submission failed: {detail}");
        } else {
            tracing::warn!("Submission rejected ({status}): {detail}");
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
