use axum::extract::multipart::{Field, Multipart, MultipartError};
use axum::http::StatusCode;
use bytes::BytesMut;

use crate::applications::validation::{is_allowed_media_type, MAX_RESUME_BYTES};
use crate::errors::AppError;
use crate::models::application::{ApplicationSubmission, ResumeUpload};

/// Raw multipart fields before required-field checks.
#[derive(Debug, Default)]
pub struct ApplicationForm {
    pub role: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub portfolio: Option<String>,
    pub linkedin: Option<String>,
    pub cover_letter: Option<String>,
    pub resume: Option<ResumeUpload>,
}

impl ApplicationForm {
    /// Drains the multipart stream. Unknown fields are ignored; a repeated field
    /// keeps its last value.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            let slot = match name.as_str() {
                "resume" => {
                    form.resume = Some(read_resume(field).await?);
                    continue;
                }
                "role" => &mut form.role,
                "full_name" => &mut form.full_name,
                "email" => &mut form.email,
                "phone" => &mut form.phone,
                "location" => &mut form.location,
                "portfolio" => &mut form.portfolio,
                "linkedin" => &mut form.linkedin,
                "cover_letter" => &mut form.cover_letter,
                _ => continue,
            };
            *slot = Some(field.text().await.map_err(multipart_error)?);
        }

        Ok(form)
    }

    pub fn into_submission(self) -> Result<ApplicationSubmission, AppError> {
        Ok(ApplicationSubmission {
            role: required(self.role, "role")?,
            full_name: required(self.full_name, "full_name")?,
            email: required(self.email, "email")?,
            phone: self.phone.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            portfolio: self.portfolio.unwrap_or_default(),
            linkedin: self.linkedin.unwrap_or_default(),
            cover_letter: self.cover_letter.unwrap_or_default(),
            resume: self.resume.ok_or(AppError::MissingField("resume"))?,
        })
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, AppError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(AppError::MissingField(name))
}

/// Buffers at most `MAX_RESUME_BYTES + 1` bytes. Anything past that is drained
/// and dropped: one extra byte is enough for the size check to fail.
///
/// The declared type is checked before any content is read, so a disallowed
/// type wins over a body that later trips the request size limit.
async fn read_resume(mut field: Field<'_>) -> Result<ResumeUpload, AppError> {
    let filename = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(str::to_string);
    if !is_allowed_media_type(content_type.as_deref()) {
        return Err(AppError::InvalidMediaType);
    }

    let cap = MAX_RESUME_BYTES + 1;
    let mut buf = BytesMut::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        let room = cap - buf.len();
        if room == 0 {
            continue;
        }
        buf.extend_from_slice(&chunk[..chunk.len().min(room)]);
    }

    Ok(ResumeUpload {
        filename,
        content_type,
        bytes: buf.freeze(),
    })
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::MalformedForm(err.body_text())
    }
}
