use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::applications::gateways::{FileStorage, NewObject, SpreadsheetStore};
use crate::applications::naming::{row_timestamp, storage_object_name};
use crate::applications::validation::validate_resume;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::application::{ApplicationSubmission, SubmissionResponse};

/// Runs one submission: validate → upload → grant public read → open worksheet → append row.
///
/// Nothing is rolled back. A failure after the upload leaves the stored (and
/// possibly public) object in place.
pub struct SubmissionService {
    storage: Arc<dyn FileStorage>,
    sheets: Arc<dyn SpreadsheetStore>,
    config: Arc<Config>,
}

impl SubmissionService {
    pub fn new(
        storage: Arc<dyn FileStorage>,
        sheets: Arc<dyn SpreadsheetStore>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            storage,
            sheets,
            config,
        }
    }

    pub async fn submit(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<SubmissionResponse, AppError> {
        self.submit_at(submission, Utc::now()).await
    }

    /// Same as [`submit`](Self::submit) with an explicit submission instant,
    /// used for both the object name and the row timestamp.
    pub async fn submit_at(
        &self,
        submission: ApplicationSubmission,
        at: DateTime<Utc>,
    ) -> Result<SubmissionResponse, AppError> {
        validate_resume(&submission.resume)?;

        let resume = &submission.resume;
        let object_name =
            storage_object_name(&submission.full_name, &submission.role, at, &resume.filename);
        let mime_type = resume.content_type.clone().unwrap_or_default();

        let object = self
            .storage
            .store(NewObject {
                name: object_name.clone(),
                mime_type,
                parent_folder_id: self.config.drive_folder_id.clone(),
                bytes: resume.bytes.clone(),
            })
            .await?;
        info!(object_name = %object_name, object_id = %object.0, "Resume stored");

        self.storage.grant_public_read(&object).await?;
        let resume_link = self.storage.viewer_link(&object);

        let sheet_id = self
            .config
            .sheet_id
            .as_deref()
            .ok_or_else(|| AppError::Configuration("GOOGLE_SHEET_ID missing in .env".into()))?;
        let worksheet = self
            .sheets
            .open_worksheet(sheet_id, &self.config.worksheet_name)
            .await?;

        let row = submission.to_row(&row_timestamp(at), &resume_link);
        self.sheets.append_row(&worksheet, &row).await?;
        info!(worksheet = %worksheet.title, role = %submission.role, "Application recorded");

        Ok(SubmissionResponse {
            success: true,
            resume_link,
        })
    }
}
