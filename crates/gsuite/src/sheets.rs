//! Google Sheets wire payloads and client.
//!
//! The finance export is a flat batch write: header row plus one data row,
//! or a single appended row. No cursor model applies here; the only typed
//! payloads are the formatting requests (bold headers, wrapped summary
//! cell).

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::auth::TokenProvider;
use crate::error::{check_status, ServiceError};

pub const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRange {
    pub sheet_id: i64,
    pub start_row_index: usize,
    pub end_row_index: usize,
    pub start_column_index: usize,
    pub end_column_index: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextFormat {
    pub bold: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_format: Option<TextFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap_strategy: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellData {
    pub user_entered_format: CellFormat,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RowData {
    pub values: Vec<CellData>,
}

/// One spreadsheet `batchUpdate` request, externally tagged like the Docs
/// counterpart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SheetRequest {
    #[serde(rename_all = "camelCase")]
    UpdateCells {
        rows: Vec<RowData>,
        fields: &'static str,
        range: GridRange,
    },
}

/// Bold every header cell of row zero.
pub fn bold_header_request(sheet_id: i64, column_count: usize) -> SheetRequest {
    let cell = CellData {
        user_entered_format: CellFormat {
            text_format: Some(TextFormat { bold: true }),
            wrap_strategy: None,
        },
    };
    SheetRequest::UpdateCells {
        rows: vec![RowData { values: vec![cell; column_count] }],
        fields: "userEnteredFormat.textFormat.bold",
        range: GridRange {
            sheet_id,
            start_row_index: 0,
            end_row_index: 1,
            start_column_index: 0,
            end_column_index: column_count,
        },
    }
}

/// Wrap the free-text summary cell of the written row.
pub fn wrap_summary_request(sheet_id: i64, row_index: usize, column_index: usize) -> SheetRequest {
    SheetRequest::UpdateCells {
        rows: vec![RowData {
            values: vec![CellData {
                user_entered_format: CellFormat {
                    text_format: None,
                    wrap_strategy: Some("WRAP"),
                },
            }],
        }],
        fields: "userEnteredFormat.wrapStrategy",
        range: GridRange {
            sheet_id,
            start_row_index: row_index,
            end_row_index: row_index + 1,
            start_column_index: column_index,
            end_column_index: column_index + 1,
        },
    }
}

/// Locator for a created spreadsheet plus the numeric id of its finance tab.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpreadsheetHandle {
    pub spreadsheet_id: String,
    pub url: String,
    pub tab_id: i64,
}

/// The spreadsheet service boundary: flat value writes plus formatting.
#[async_trait]
pub trait SpreadsheetService: Send + Sync {
    /// Create a spreadsheet whose first tab is `tab`.
    async fn create_spreadsheet(
        &self,
        title: &str,
        tab: &str,
    ) -> Result<SpreadsheetHandle, ServiceError>;
    /// Numeric id of a named tab, if present.
    async fn find_tab(&self, spreadsheet_id: &str, tab: &str) -> Result<Option<i64>, ServiceError>;
    /// Add a named tab to an existing spreadsheet, returning its id.
    async fn add_tab(&self, spreadsheet_id: &str, tab: &str) -> Result<i64, ServiceError>;
    /// Overwrite values starting at `range` (A1 notation).
    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        rows: &[Vec<Value>],
    ) -> Result<(), ServiceError>;
    /// Append one row below the existing data, returning the zero-based row
    /// index it landed on when the service reports it.
    async fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        row: &[Value],
    ) -> Result<Option<usize>, ServiceError>;
    async fn batch_format(
        &self,
        spreadsheet_id: &str,
        requests: &[SheetRequest],
    ) -> Result<(), ServiceError>;
}

pub struct GoogleSheetsService {
    http: Client,
    tokens: Arc<dyn TokenProvider>,
    base_url: String,
}

impl GoogleSheetsService {
    pub fn new(http: Client, tokens: Arc<dyn TokenProvider>) -> Self {
        Self::with_base_url(http, tokens, SHEETS_BASE_URL)
    }

    pub fn with_base_url(
        http: Client,
        tokens: Arc<dyn TokenProvider>,
        base_url: impl Into<String>,
    ) -> Self {
        Self { http, tokens, base_url: base_url.into() }
    }

    async fn bearer(&self) -> Result<String, ServiceError> {
        Ok(self.tokens.access_token().await?.expose_secret().to_string())
    }
}

#[async_trait]
impl SpreadsheetService for GoogleSheetsService {
    async fn create_spreadsheet(
        &self,
        title: &str,
        tab: &str,
    ) -> Result<SpreadsheetHandle, ServiceError> {
        let response = self
            .http
            .post(format!("{}/spreadsheets", self.base_url))
            .bearer_auth(self.bearer().await?)
            .json(&json!({
                "properties": { "title": title },
                "sheets": [{ "properties": { "title": tab } }],
            }))
            .send()
            .await?;
        let body: Value = check_status("sheets", response).await?.json().await?;

        let spreadsheet_id = string_field(&body, "spreadsheetId", "sheets")?;
        let url = body
            .get("spreadsheetUrl")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| spreadsheet_url(&spreadsheet_id));
        let tab_id = body
            .pointer("/sheets/0/properties/sheetId")
            .and_then(Value::as_i64)
            .ok_or_else(|| decode_error("create response carried no sheetId"))?;
        info!(%spreadsheet_id, title, "created spreadsheet");

        Ok(SpreadsheetHandle { spreadsheet_id, url, tab_id })
    }

    async fn find_tab(&self, spreadsheet_id: &str, tab: &str) -> Result<Option<i64>, ServiceError> {
        let response = self
            .http
            .get(format!("{}/spreadsheets/{spreadsheet_id}", self.base_url))
            .query(&[("fields", "sheets(properties(sheetId,title))")])
            .bearer_auth(self.bearer().await?)
            .send()
            .await?;
        let body: Value = check_status("sheets", response).await?.json().await?;

        let found = body
            .get("sheets")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .find(|sheet| {
                sheet.pointer("/properties/title").and_then(Value::as_str) == Some(tab)
            })
            .and_then(|sheet| sheet.pointer("/properties/sheetId").and_then(Value::as_i64));
        Ok(found)
    }

    async fn add_tab(&self, spreadsheet_id: &str, tab: &str) -> Result<i64, ServiceError> {
        let response = self
            .http
            .post(format!("{}/spreadsheets/{spreadsheet_id}:batchUpdate", self.base_url))
            .bearer_auth(self.bearer().await?)
            .json(&json!({
                "requests": [{ "addSheet": { "properties": { "title": tab } } }],
            }))
            .send()
            .await?;
        let body: Value = check_status("sheets", response).await?.json().await?;

        body.pointer("/replies/0/addSheet/properties/sheetId")
            .and_then(Value::as_i64)
            .ok_or_else(|| decode_error("addSheet reply carried no sheetId"))
    }

    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        rows: &[Vec<Value>],
    ) -> Result<(), ServiceError> {
        let response = self
            .http
            .put(format!(
                "{}/spreadsheets/{spreadsheet_id}/values/{}",
                self.base_url,
                encode_path_segment(range),
            ))
            .query(&[("valueInputOption", "USER_ENTERED")])
            .bearer_auth(self.bearer().await?)
            .json(&json!({ "values": rows }))
            .send()
            .await?;
        check_status("sheets", response).await?;
        info!(spreadsheet_id, row_count = rows.len(), "wrote value rows");
        Ok(())
    }

    async fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        row: &[Value],
    ) -> Result<Option<usize>, ServiceError> {
        let response = self
            .http
            .post(format!(
                "{}/spreadsheets/{spreadsheet_id}/values/{}:append",
                self.base_url,
                encode_path_segment(range),
            ))
            .query(&[("valueInputOption", "USER_ENTERED"), ("insertDataOption", "INSERT_ROWS")])
            .bearer_auth(self.bearer().await?)
            .json(&json!({ "values": [row] }))
            .send()
            .await?;
        let body: Value = check_status("sheets", response).await?.json().await?;

        let appended_row = body
            .pointer("/updates/updatedRange")
            .and_then(Value::as_str)
            .and_then(parse_appended_row_index);
        info!(spreadsheet_id, ?appended_row, "appended value row");
        Ok(appended_row)
    }

    async fn batch_format(
        &self,
        spreadsheet_id: &str,
        requests: &[SheetRequest],
    ) -> Result<(), ServiceError> {
        let response = self
            .http
            .post(format!("{}/spreadsheets/{spreadsheet_id}:batchUpdate", self.base_url))
            .bearer_auth(self.bearer().await?)
            .json(&json!({ "requests": requests }))
            .send()
            .await?;
        check_status("sheets", response).await?;
        Ok(())
    }
}

pub fn spreadsheet_url(spreadsheet_id: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{spreadsheet_id}")
}

/// Zero-based row index of the first cell in an `updatedRange` like
/// `'Finance Planner'!A5:J5`.
pub(crate) fn parse_appended_row_index(updated_range: &str) -> Option<usize> {
    let cell = updated_range.rsplit('!').next()?;
    let digits: String = cell
        .chars()
        .skip_while(|c| c.is_ascii_alphabetic())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let row: usize = digits.parse().ok()?;
    row.checked_sub(1)
}

/// Minimal percent-encoding for an A1 range used as a path segment.
fn encode_path_segment(value: &str) -> String {
    value.replace('%', "%25").replace(' ', "%20").replace('\'', "%27")
}

fn string_field(body: &Value, key: &str, service: &'static str) -> Result<String, ServiceError> {
    body.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ServiceError::Decode {
            service,
            message: format!("response carried no {key}"),
        })
}

fn decode_error(message: &str) -> ServiceError {
    ServiceError::Decode { service: "sheets", message: message.to_string() }
}

#[cfg(test)]
mod tests {
    use super::{
        bold_header_request, parse_appended_row_index, wrap_summary_request,
    };
    use serde_json::json;
    use waypoint_core::{FINANCE_HEADERS, SUMMARY_COLUMN};

    #[test]
    fn header_bolding_covers_every_column_of_row_zero() {
        let request = bold_header_request(42, FINANCE_HEADERS.len());
        let encoded = serde_json::to_value(&request).expect("serializable");

        assert_eq!(
            encoded["updateCells"]["range"],
            json!({
                "sheetId": 42,
                "startRowIndex": 0,
                "endRowIndex": 1,
                "startColumnIndex": 0,
                "endColumnIndex": FINANCE_HEADERS.len(),
            })
        );
        assert_eq!(encoded["updateCells"]["fields"], json!("userEnteredFormat.textFormat.bold"));
        assert_eq!(
            encoded["updateCells"]["rows"][0]["values"]
                .as_array()
                .expect("row values")
                .len(),
            FINANCE_HEADERS.len()
        );
        assert_eq!(
            encoded["updateCells"]["rows"][0]["values"][0],
            json!({"userEnteredFormat": {"textFormat": {"bold": true}}})
        );
    }

    #[test]
    fn summary_wrap_targets_one_cell() {
        let request = wrap_summary_request(7, 4, SUMMARY_COLUMN);
        let encoded = serde_json::to_value(&request).expect("serializable");

        assert_eq!(
            encoded["updateCells"]["range"],
            json!({
                "sheetId": 7,
                "startRowIndex": 4,
                "endRowIndex": 5,
                "startColumnIndex": SUMMARY_COLUMN,
                "endColumnIndex": SUMMARY_COLUMN + 1,
            })
        );
        assert_eq!(
            encoded["updateCells"]["rows"][0]["values"][0],
            json!({"userEnteredFormat": {"wrapStrategy": "WRAP"}})
        );
    }

    #[test]
    fn appended_row_index_parses_from_the_updated_range() {
        assert_eq!(parse_appended_row_index("'Finance Planner'!A5:J5"), Some(4));
        assert_eq!(parse_appended_row_index("Sheet1!B12"), Some(11));
        assert_eq!(parse_appended_row_index("garbage"), None);
    }
}
