use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::applications::gateways::{FileStorage, NewObject, ObjectRef};
use crate::errors::AppError;
use crate::google::auth::TokenProvider;
use crate::google::{ensure_success, GoogleApiError};

const UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files";
const FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileMetadata<'a> {
    name: &'a str,
    mime_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parents: Option<[&'a str; 1]>,
}

#[derive(Debug, Deserialize)]
struct CreatedFile {
    id: Option<String>,
}

/// Drive v3 over REST. Uploads are single-request `multipart/related` bodies.
pub struct GoogleDriveClient {
    client: Client,
    tokens: Arc<TokenProvider>,
}

impl GoogleDriveClient {
    pub fn new(client: Client, tokens: Arc<TokenProvider>) -> Self {
        Self { client, tokens }
    }

    async fn create_file(&self, object: &NewObject) -> Result<String, GoogleApiError> {
        let metadata = FileMetadata {
            name: &object.name,
            mime_type: &object.mime_type,
            parents: object.parent_folder_id.as_deref().map(|parent| [parent]),
        };
        let metadata_json = serde_json::to_vec(&metadata)
            .map_err(|e| GoogleApiError::UnexpectedResponse(e.to_string()))?;
        let boundary = format!("careers-{}", Uuid::new_v4().simple());
        let body = related_body(&boundary, &metadata_json, &object.mime_type, &object.bytes);

        let token = self.tokens.access_token().await?;
        let response = self
            .client
            .post(UPLOAD_URL)
            .query(&[
                ("uploadType", "multipart"),
                ("fields", "id"),
                ("supportsAllDrives", "true"),
            ])
            .bearer_auth(token)
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={boundary}"),
            )
            .body(body)
            .send()
            .await?;

        let created: CreatedFile = ensure_success(response).await?.json().await?;
        created
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| GoogleApiError::UnexpectedResponse("Drive returned no file id".into()))
    }

    async fn create_public_permission(&self, file_id: &str) -> Result<(), GoogleApiError> {
        let token = self.tokens.access_token().await?;
        let response = self
            .client
            .post(format!("{FILES_URL}/{file_id}/permissions"))
            .query(&[("supportsAllDrives", "true")])
            .bearer_auth(token)
            .json(&json!({ "type": "anyone", "role": "reader" }))
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl FileStorage for GoogleDriveClient {
    async fn store(&self, object: NewObject) -> Result<ObjectRef, AppError> {
        let id = self.create_file(&object).await?;
        Ok(ObjectRef(id))
    }

    async fn grant_public_read(&self, object: &ObjectRef) -> Result<(), AppError> {
        self.create_public_permission(&object.0).await?;
        Ok(())
    }

    fn viewer_link(&self, object: &ObjectRef) -> String {
        viewer_link(&object.0)
    }
}

pub fn viewer_link(file_id: &str) -> String {
    format!("https://drive.google.com/file/d/{file_id}/view")
}

/// Metadata part (JSON) followed by the media part, per Drive's multipart upload.
fn related_body(boundary: &str, metadata_json: &[u8], media_type: &str, media: &Bytes) -> Vec<u8> {
    let mut body = Vec::with_capacity(media.len() + metadata_json.len() + 256);
    body.extend_from_slice(
        format!("--{boundary}\r\nContent-Type: {}\r\n\r\n", mime::APPLICATION_JSON).as_bytes(),
    );
    body.extend_from_slice(metadata_json);
    body.extend_from_slice(format!("\r\n--{boundary}\r\nContent-Type: {media_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(media);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_link_format() {
        assert_eq!(
            viewer_link("1AbC"),
            "https://drive.google.com/file/d/1AbC/view"
        );
    }

    #[test]
    fn test_metadata_includes_parent_only_when_configured() {
        let with_parent = FileMetadata {
            name: "a.pdf",
            mime_type: "application/pdf",
            parents: Some(["folder-9"]),
        };
        assert_eq!(
            serde_json::to_value(&with_parent).unwrap(),
            json!({ "name": "a.pdf", "mimeType": "application/pdf", "parents": ["folder-9"] })
        );

        let without = FileMetadata {
            name: "a.pdf",
            mime_type: "application/pdf",
            parents: None,
        };
        assert_eq!(
            serde_json::to_value(&without).unwrap(),
            json!({ "name": "a.pdf", "mimeType": "application/pdf" })
        );
    }

    #[test]
    fn test_related_body_layout() {
        let body = related_body("B", br#"{"name":"x"}"#, "application/pdf", &Bytes::from_static(b"%PDF"));
        let expected = "--B\r\nContent-Type: application/json\r\n\r\n{\"name\":\"x\"}\r\n\
                        --B\r\nContent-Type: application/pdf\r\n\r\n%PDF\r\n--B--\r\n";
        assert_eq!(String::from_utf8(body).unwrap(), expected);
    }
}
