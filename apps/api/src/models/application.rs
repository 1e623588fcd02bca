use bytes::Bytes;
use serde::Serialize;

/// One job application as received from the careers form. Lives for a single
/// request; nothing is persisted locally.
#[derive(Debug, Clone)]
pub struct ApplicationSubmission {
    pub role: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub portfolio: String,
    pub linkedin: String,
    pub cover_letter: String,
    pub resume: ResumeUpload,
}

/// The uploaded resume part: raw bytes plus what the client declared about them.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Body of a successful `POST /api/applications`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SubmissionResponse {
    pub success: bool,
    pub resume_link: String,
}

/// Number of cells in every appended spreadsheet row.
pub const ROW_WIDTH: usize = 10;

impl ApplicationSubmission {
    /// Spreadsheet row in fixed column order:
    /// submitted_at, role, full_name, email, phone, location, portfolio,
    /// linkedin, resume_link, cover_letter.
    pub fn to_row(&self, submitted_at: &str, resume_link: &str) -> [String; ROW_WIDTH] {
        [
            submitted_at.to_string(),
            self.role.clone(),
            self.full_name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.location.clone(),
            self.portfolio.clone(),
            self.linkedin.clone(),
            resume_link.to_string(),
            self.cover_letter.clone(),
        ]
    }
}
