use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5500,http://127.0.0.1:5500";
const DEFAULT_WORKSHEET_NAME: &str = "Applications";
const DEFAULT_SERVICE_ACCOUNT_FILE: &str = "service_account.json";

/// Application configuration loaded from environment variables.
/// Built once at startup and shared read-only with every handler.
///
/// A missing `GOOGLE_SHEET_ID` is deliberately not a startup failure:
/// `/health` must keep answering, and submissions report it as a server error.
#[derive(Debug, Clone)]
pub struct Config {
    pub allowed_origins: Vec<String>,
    pub sheet_id: Option<String>,
    pub worksheet_name: String,
    pub drive_folder_id: Option<String>,
    pub service_account_file: PathBuf,
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Tests pass a closure over
    /// a map instead of mutating the process environment.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let origins = lookup("ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.into());

        Ok(Config {
            allowed_origins: parse_origins(&origins),
            sheet_id: non_blank(lookup("GOOGLE_SHEET_ID")),
            worksheet_name: non_blank(lookup("GOOGLE_WORKSHEET_NAME"))
                .unwrap_or_else(|| DEFAULT_WORKSHEET_NAME.to_string()),
            drive_folder_id: non_blank(lookup("DRIVE_FOLDER_ID")),
            service_account_file: lookup("GOOGLE_SERVICE_ACCOUNT_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SERVICE_ACCOUNT_FILE)),
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Splits a comma-separated origin list, trimming entries and dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
