//! Google Workspace clients: the only place this service talks to Google.
//!
//! Plain REST over reqwest. `auth` mints service-account access tokens, `drive`
//! implements `FileStorage`, `sheets` implements `SpreadsheetStore`.
//!
//! No timeouts and no retries: a slow or failing Google call fails the submission.

use reqwest::Response;
use serde::Deserialize;
use thiserror::Error;

pub mod auth;
pub mod drive;
pub mod sheets;

#[derive(Debug, Error)]
pub enum GoogleApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Google API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("failed to read service account credentials at {path}: {reason}")]
    Credentials { path: String, reason: String },

    #[error("failed to sign token assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("worksheet not found: {0}")]
    WorksheetNotFound(String),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// REST APIs answer `{"error": {"message": ...}}`; the OAuth token endpoint
/// answers `{"error": "...", "error_description": "..."}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Api { error: ApiErrorDetail },
    OAuth {
        error: String,
        error_description: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody::Api { error }) => error.message,
        Ok(ErrorBody::OAuth {
            error,
            error_description: Some(description),
        }) => format!("{error}: {description}"),
        Ok(ErrorBody::OAuth { error, .. }) => error,
        Err(_) => body.to_string(),
    }
}

/// Passes successful responses through and turns anything else into `GoogleApiError::Api`.
pub(crate) async fn ensure_success(response: Response) -> Result<Response, GoogleApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GoogleApiError::Api {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_rest_api_body() {
        let body = r#"{"error": {"code": 403, "message": "The caller does not have permission", "status": "PERMISSION_DENIED"}}"#;
        assert_eq!(error_message(body), "The caller does not have permission");
    }

    #[test]
    fn test_error_message_from_oauth_body() {
        let body = r#"{"error": "invalid_grant", "error_description": "Invalid JWT Signature."}"#;
        assert_eq!(error_message(body), "invalid_grant: Invalid JWT Signature.");
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }
}
