use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::applications::gateways::{SpreadsheetStore, WorksheetRef};
use crate::errors::AppError;
use crate::google::auth::TokenProvider;
use crate::google::{ensure_success, GoogleApiError};

const SHEETS_API: &str = "https://sheets.googleapis.com";

#[derive(Debug, Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange<'a> {
    major_dimension: &'static str,
    values: [&'a [String]; 1],
}

/// Sheets v4 over REST.
pub struct GoogleSheetsClient {
    client: Client,
    tokens: Arc<TokenProvider>,
}

impl GoogleSheetsClient {
    pub fn new(client: Client, tokens: Arc<TokenProvider>) -> Self {
        Self { client, tokens }
    }

    async fn fetch_titles(&self, spreadsheet_id: &str) -> Result<Vec<String>, GoogleApiError> {
        let url = spreadsheet_url(spreadsheet_id, &[])?;
        let token = self.tokens.access_token().await?;
        let response = self
            .client
            .get(url)
            .query(&[("fields", "sheets.properties.title")])
            .bearer_auth(token)
            .send()
            .await?;

        let metadata: SpreadsheetMetadata = ensure_success(response).await?.json().await?;
        Ok(metadata
            .sheets
            .into_iter()
            .map(|sheet| sheet.properties.title)
            .collect())
    }

    async fn append_values(
        &self,
        worksheet: &WorksheetRef,
        cells: &[String],
    ) -> Result<(), GoogleApiError> {
        let url = append_url(worksheet)?;
        let token = self.tokens.access_token().await?;
        let response = self
            .client
            .post(url)
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .bearer_auth(token)
            .json(&ValueRange {
                major_dimension: "ROWS",
                values: [cells],
            })
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl SpreadsheetStore for GoogleSheetsClient {
    async fn open_worksheet(
        &self,
        spreadsheet_id: &str,
        title: &str,
    ) -> Result<WorksheetRef, AppError> {
        let titles = self.fetch_titles(spreadsheet_id).await?;
        if !titles.iter().any(|t| t == title) {
            return Err(GoogleApiError::WorksheetNotFound(title.to_string()).into());
        }
        Ok(WorksheetRef {
            spreadsheet_id: spreadsheet_id.to_string(),
            title: title.to_string(),
        })
    }

    async fn append_row(&self, worksheet: &WorksheetRef, cells: &[String]) -> Result<(), AppError> {
        self.append_values(worksheet, cells).await?;
        debug!("Appended {} cells to '{}'", cells.len(), worksheet.title);
        Ok(())
    }
}

/// A1 range covering the whole worksheet. Titles are always quoted, with
/// embedded quotes doubled.
fn sheet_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

fn spreadsheet_url(spreadsheet_id: &str, tail: &[&str]) -> Result<Url, GoogleApiError> {
    let mut url =
        Url::parse(SHEETS_API).map_err(|e| GoogleApiError::UnexpectedResponse(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| GoogleApiError::UnexpectedResponse("Sheets API URL cannot be a base".into()))?
        .extend(["v4", "spreadsheets", spreadsheet_id])
        .extend(tail);
    Ok(url)
}

fn append_url(worksheet: &WorksheetRef) -> Result<Url, GoogleApiError> {
    let range = format!("{}:append", sheet_range(&worksheet.title));
    spreadsheet_url(&worksheet.spreadsheet_id, &["values", &range])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_quotes_title() {
        assert_eq!(sheet_range("Applications"), "'Applications'");
        assert_eq!(sheet_range("Bob's Sheet"), "'Bob''s Sheet'");
    }

    #[test]
    fn test_append_url_encodes_worksheet_title() {
        let worksheet = WorksheetRef {
            spreadsheet_id: "1xYz".to_string(),
            title: "Job Applications".to_string(),
        };
        assert_eq!(
            append_url(&worksheet).unwrap().as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/1xYz/values/'Job%20Applications':append"
        );
    }

    #[test]
    fn test_value_range_body_is_a_single_row() {
        let cells = vec!["a".to_string(), String::new(), "c".to_string()];
        let body = serde_json::to_value(ValueRange {
            major_dimension: "ROWS",
            values: [cells.as_slice()],
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "majorDimension": "ROWS", "values": [["a", "", "c"]] })
        );
    }

    #[test]
    fn test_metadata_titles_parse() {
        let raw = r#"{"sheets": [{"properties": {"title": "Applications"}}, {"properties": {"title": "Archive"}}]}"#;
        let metadata: SpreadsheetMetadata = serde_json::from_str(raw).unwrap();
        let titles: Vec<_> = metadata.sheets.into_iter().map(|s| s.properties.title).collect();
        assert_eq!(titles, vec!["Applications", "Archive"]);
    }
}
