//! In-memory gateways for tests. Each records what it was asked to do and can
//! be told to fail a specific call.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::applications::gateways::{
    FileStorage, NewObject, ObjectRef, SpreadsheetStore, WorksheetRef,
};
use crate::applications::validation::PDF_MIME;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::application::{ApplicationSubmission, ResumeUpload};

pub fn test_config() -> Config {
    Config {
        allowed_origins: vec!["http://localhost:5500".to_string()],
        sheet_id: Some("sheet-1".to_string()),
        worksheet_name: "Applications".to_string(),
        drive_folder_id: Some("folder-1".to_string()),
        service_account_file: PathBuf::from("unused.json"),
        host: "127.0.0.1".to_string(),
        port: 0,
        rust_log: "info".to_string(),
    }
}

pub fn sample_submission() -> ApplicationSubmission {
    ApplicationSubmission {
        role: "Backend Engineer".to_string(),
        full_name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: String::new(),
        location: String::new(),
        portfolio: String::new(),
        linkedin: String::new(),
        cover_letter: String::new(),
        resume: ResumeUpload {
            filename: "cv.pdf".to_string(),
            content_type: Some(PDF_MIME.to_string()),
            bytes: Bytes::from_static(b"%PDF-1.7 fake"),
        },
    }
}

#[derive(Default)]
pub struct FakeStorage {
    stored: Mutex<Vec<NewObject>>,
    granted: Mutex<Vec<String>>,
    store_error: Option<String>,
    grant_error: Option<String>,
}

impl FakeStorage {
    pub fn failing_store(message: &str) -> Self {
        Self {
            store_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_grant(message: &str) -> Self {
        Self {
            grant_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn stored(&self) -> Vec<NewObject> {
        self.stored.lock().unwrap().clone()
    }

    pub fn granted(&self) -> Vec<String> {
        self.granted.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileStorage for FakeStorage {
    async fn store(&self, object: NewObject) -> Result<ObjectRef, AppError> {
        if let Some(message) = &self.store_error {
            return Err(AppError::ExternalService(message.clone()));
        }
        let mut stored = self.stored.lock().unwrap();
        stored.push(object);
        Ok(ObjectRef(format!("obj-{}", stored.len())))
    }

    async fn grant_public_read(&self, object: &ObjectRef) -> Result<(), AppError> {
        if let Some(message) = &self.grant_error {
            return Err(AppError::ExternalService(message.clone()));
        }
        self.granted.lock().unwrap().push(object.0.clone());
        Ok(())
    }

    fn viewer_link(&self, object: &ObjectRef) -> String {
        format!("https://files.test/{}/view", object.0)
    }
}

#[derive(Default)]
pub struct FakeSheets {
    rows: Mutex<Vec<(WorksheetRef, Vec<String>)>>,
    opens: Mutex<usize>,
    open_error: Option<String>,
    append_error: Option<String>,
}

impl FakeSheets {
    pub fn failing_open(message: &str) -> Self {
        Self {
            open_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_append(message: &str) -> Self {
        Self {
            append_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn rows(&self) -> Vec<(WorksheetRef, Vec<String>)> {
        self.rows.lock().unwrap().clone()
    }

    pub fn open_calls(&self) -> usize {
        *self.opens.lock().unwrap()
    }
}

#[async_trait]
impl SpreadsheetStore for FakeSheets {
    async fn open_worksheet(
        &self,
        spreadsheet_id: &str,
        title: &str,
    ) -> Result<WorksheetRef, AppError> {
        *self.opens.lock().unwrap() += 1;
        if let Some(message) = &self.open_error {
            return Err(AppError::ExternalService(message.clone()));
        }
        Ok(WorksheetRef {
            spreadsheet_id: spreadsheet_id.to_string(),
            title: title.to_string(),
        })
    }

    async fn append_row(&self, worksheet: &WorksheetRef, cells: &[String]) -> Result<(), AppError> {
        if let Some(message) = &self.append_error {
            return Err(AppError::ExternalService(message.clone()));
        }
        self.rows
            .lock()
            .unwrap()
            .push((worksheet.clone(), cells.to_vec()));
        Ok(())
    }
}
