//! Spreadsheet backend: the Google Sheets v4 REST API.
//!
//! On first use the named worksheet is created if absent (with generous
//! pre-allocated capacity) and row 1 is checked against the expected
//! header, appending or repairing it as needed. Data rows are appended in
//! exact header order. Authentication is a pre-obtained OAuth bearer
//! token; obtaining it is an external concern.

use async_trait::async_trait;
use bmrq_core::record::SubmissionRecord;
use bmrq_core::row;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::error::StorageError;
use crate::store::{SequenceHint, SubmissionStore};

const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Pre-allocated grid for a freshly created worksheet.
const NEW_SHEET_ROWS: u32 = 2000;
const NEW_SHEET_COLS: u32 = 40;

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    #[serde(rename = "sheetId")]
    sheet_id: i64,
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

pub struct SheetStore {
    http: Client,
    token: String,
    spreadsheet_id: String,
    worksheet: String,
}

impl SheetStore {
    pub fn new(
        http: Client,
        token: impl Into<String>,
        spreadsheet_id: impl Into<String>,
        worksheet: impl Into<String>,
    ) -> Self {
        Self {
            http,
            token: token.into(),
            spreadsheet_id: spreadsheet_id.into(),
            worksheet: worksheet.into(),
        }
    }

    /// One-time bootstrap: create the worksheet if absent and make sure
    /// row 1 carries the expected header. Call before the first append.
    pub async fn ensure_ready(&self) -> Result<(), StorageError> {
        let sheet_id = match self.find_worksheet().await? {
            Some(id) => id,
            None => {
                self.create_worksheet().await?;
                info!(worksheet = %self.worksheet, "created worksheet");
                self.find_worksheet().await?.ok_or_else(|| {
                    StorageError::SheetsApi("worksheet missing after creation".to_string())
                })?
            }
        };
        self.ensure_header(sheet_id).await
    }

    async fn find_worksheet(&self) -> Result<Option<i64>, StorageError> {
        let url = format!("{SHEETS_BASE_URL}/{}", self.spreadsheet_id);
        let resp = self
            .http
            .get(url)
            .query(&[("fields", "sheets.properties")])
            .bearer_auth(&self.token)
            .send()
            .await?;
        let meta: SpreadsheetMeta = check(resp, "spreadsheet lookup").await?.json().await?;
        Ok(meta
            .sheets
            .iter()
            .find(|s| s.properties.title == self.worksheet)
            .map(|s| s.properties.sheet_id))
    }

    async fn create_worksheet(&self) -> Result<(), StorageError> {
        let body = json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": self.worksheet,
                        "gridProperties": {
                            "rowCount": NEW_SHEET_ROWS,
                            "columnCount": NEW_SHEET_COLS,
                        }
                    }
                }
            }]
        });
        let resp = self
            .http
            .post(self.batch_update_url())
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;
        check(resp, "worksheet creation").await?;
        Ok(())
    }

    async fn ensure_header(&self, sheet_id: i64) -> Result<(), StorageError> {
        let expected = row::header();
        match self.first_row().await? {
            // Empty worksheet: the header becomes row 1.
            None => self.append_cells(&expected).await,
            Some(first) if header_matches(&first, &expected) => Ok(()),
            // Stale row 1: push existing data down and write the header.
            Some(_) => {
                info!(worksheet = %self.worksheet, "repairing stale header row");
                self.insert_header(sheet_id, &expected).await
            }
        }
    }

    async fn first_row(&self) -> Result<Option<Vec<String>>, StorageError> {
        let url = self.values_url("1:1");
        let resp = self.http.get(url).bearer_auth(&self.token).send().await?;
        let range: ValueRange = check(resp, "header fetch").await?.json().await?;
        Ok(range.values.into_iter().next())
    }

    async fn insert_header(&self, sheet_id: i64, expected: &[String]) -> Result<(), StorageError> {
        let body = json!({
            "requests": [{
                "insertDimension": {
                    "range": {
                        "sheetId": sheet_id,
                        "dimension": "ROWS",
                        "startIndex": 0,
                        "endIndex": 1,
                    },
                    "inheritFromBefore": false,
                }
            }]
        });
        let resp = self
            .http
            .post(self.batch_update_url())
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;
        check(resp, "header row insertion").await?;

        let url = self.values_url("1:1");
        let resp = self
            .http
            .put(url)
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(&self.token)
            .json(&json!({ "values": [expected] }))
            .send()
            .await?;
        check(resp, "header write").await?;
        Ok(())
    }

    async fn append_cells(&self, cells: &[String]) -> Result<(), StorageError> {
        let url = format!(
            "{SHEETS_BASE_URL}/{}/values/{}:append",
            self.spreadsheet_id, self.worksheet
        );
        let resp = self
            .http
            .post(url)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .bearer_auth(&self.token)
            .json(&json!({ "values": [cells] }))
            .send()
            .await?;
        check(resp, "row append").await?;
        Ok(())
    }

    fn batch_update_url(&self) -> String {
        format!("{SHEETS_BASE_URL}/{}:batchUpdate", self.spreadsheet_id)
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{SHEETS_BASE_URL}/{}/values/{}!{range}",
            self.spreadsheet_id, self.worksheet
        )
    }
}

/// Row 1 matches when it starts with the expected header columns.
fn header_matches(first: &[String], expected: &[String]) -> bool {
    first.len() >= expected.len() && first[..expected.len()] == expected[..]
}

async fn check(resp: Response, what: &str) -> Result<Response, StorageError> {
    if resp.status().is_success() {
        Ok(resp)
    } else {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Err(StorageError::SheetsApi(format!(
            "{what} returned {status}: {body}"
        )))
    }
}

#[async_trait]
impl SubmissionStore for SheetStore {
    fn describe(&self) -> &str {
        "spreadsheet"
    }

    /// Count of data rows in column A, header excluded.
    async fn sequence_hint(&self) -> Result<SequenceHint, StorageError> {
        let url = self.values_url("A:A");
        let resp = self.http.get(url).bearer_auth(&self.token).send().await?;
        let range: ValueRange = check(resp, "row count fetch").await?.json().await?;
        let count = range.values.len().saturating_sub(1) as u32;
        Ok(SequenceHint::RecordCount(count))
    }

    async fn append(&self, record: &SubmissionRecord) -> Result<(), StorageError> {
        self.append_cells(&record.to_row()).await
    }
}
