//! Resume checks run before anything leaves the process.
//!
//! Order matters and the first failure wins:
//! 1. declared media type must be PDF or DOCX
//! 2. size must not exceed `MAX_RESUME_BYTES` (inclusive bound)
//! 3. content must not be empty

use crate::errors::AppError;
use crate::models::application::ResumeUpload;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

pub const ALLOWED_RESUME_TYPES: [&str; 2] = [PDF_MIME, DOCX_MIME];

/// 5 MiB.
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

pub fn is_allowed_media_type(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ALLOWED_RESUME_TYPES.contains(&ct))
}

pub fn validate_resume(resume: &ResumeUpload) -> Result<(), AppError> {
    if !is_allowed_media_type(resume.content_type.as_deref()) {
        return Err(AppError::InvalidMediaType);
    }
    if resume.bytes.len() > MAX_RESUME_BYTES {
        return Err(AppError::PayloadTooLarge);
    }
    if resume.bytes.is_empty() {
        return Err(AppError::EmptyFile);
    }
    Ok(())
}
