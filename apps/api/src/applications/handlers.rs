use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;

use crate::applications::form::ApplicationForm;
use crate::errors::AppError;
use crate::models::application::SubmissionResponse;
use crate::state::AppState;

/// POST /api/applications
pub async fn handle_submit_application(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let multipart = multipart.map_err(|rejection| AppError::MalformedForm(rejection.body_text()))?;

    let submission = ApplicationForm::from_multipart(multipart)
        .await?
        .into_submission()?;

    let response = state.applications.submit(submission).await?;
    Ok(Json(response))
}
