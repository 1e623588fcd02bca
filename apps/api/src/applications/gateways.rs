//! Narrow seams to the two external services a submission touches.
//!
//! `SubmissionService` holds these as `Arc<dyn ...>`; production wires the Google
//! clients, tests wire the in-memory fakes.

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::AppError;

/// A file to create in remote storage.
#[derive(Debug, Clone)]
pub struct NewObject {
    pub name: String,
    pub mime_type: String,
    pub parent_folder_id: Option<String>,
    pub bytes: Bytes,
}

/// Identifier of a created storage object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef(pub String);

/// A worksheet that has been resolved inside a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksheetRef {
    pub spreadsheet_id: String,
    pub title: String,
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Single-shot, non-resumable upload.
    async fn store(&self, object: NewObject) -> Result<ObjectRef, AppError>;

    /// Anyone holding the link can view the object.
    async fn grant_public_read(&self, object: &ObjectRef) -> Result<(), AppError>;

    /// Stable viewer URL for an object.
    fn viewer_link(&self, object: &ObjectRef) -> String;
}

#[async_trait]
pub trait SpreadsheetStore: Send + Sync {
    async fn open_worksheet(
        &self,
        spreadsheet_id: &str,
        title: &str,
    ) -> Result<WorksheetRef, AppError>;

    async fn append_row(&self, worksheet: &WorksheetRef, cells: &[String]) -> Result<(), AppError>;
}
