//! Export orchestrators.
//!
//! External-facing operations: take section texts or a financial plan,
//! build the batch via the core, and submit it. Every path returns a
//! structured [`ExportOutcome`] instead of an error type, so the calling
//! agent always gets a status, a message, and - when a resource was already
//! created - its identifier for manual inspection or cleanup. There is no
//! automatic rollback of a partially written document.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use waypoint_core::{
    assemble_sections, ApplicationError, ExportConfig, FinancePlan, Section, FINANCE_HEADERS,
    FINANCE_TAB, SUMMARY_COLUMN,
};

use crate::auth::TokenProvider;
use crate::docs::{DocumentService, GoogleDocsService, DOCS_BASE_URL};
use crate::drive::{DriveService, GoogleDriveService, DRIVE_BASE_URL};
use crate::sheets::{
    bold_header_request, spreadsheet_url, wrap_summary_request, GoogleSheetsService, SheetRequest,
    SpreadsheetService, SHEETS_BASE_URL,
};

pub const DEFAULT_DOC_TITLE: &str = "Travel Plan Document";
pub const DEFAULT_SHEET_TITLE: &str = "New Travel Plan";

/// Section texts for a document export, exactly as the agents produced them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct DocExportRequest {
    pub flight_data: String,
    pub hotel_data: String,
    pub itinerary_data: String,
    #[serde(default)]
    pub food_data: Option<String>,
    #[serde(default)]
    pub document_title: Option<String>,
}

impl DocExportRequest {
    fn sections(&self) -> Vec<Section> {
        let mut sections = vec![
            Section::new("Flights", self.flight_data.clone()),
            Section::new("Hotels", self.hotel_data.clone()),
            Section::new("Itinerary", self.itinerary_data.clone()),
        ];
        if let Some(food) = self.food_data.clone().filter(|food| !food.is_empty()) {
            sections.push(Section::new("Food", food));
        }
        sections
    }
}

/// Where a financial plan lands: a fresh spreadsheet, or an existing one,
/// optionally appending below prior rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SheetExportOptions {
    pub spreadsheet_id: Option<String>,
    pub spreadsheet_title: Option<String>,
    pub append: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportStatus {
    Success,
    Error,
}

/// The structured result every export operation resolves to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExportOutcome {
    pub status: ExportStatus,
    pub message: String,
    pub correlation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ExportOutcome {
    fn success(
        correlation_id: String,
        message: impl Into<String>,
        file_id: Option<String>,
        url: Option<String>,
    ) -> Self {
        Self { status: ExportStatus::Success, message: message.into(), correlation_id, file_id, url }
    }

    fn failure(
        correlation_id: String,
        message: impl Into<String>,
        file_id: Option<String>,
    ) -> Self {
        let message = message.into();
        error!(%correlation_id, %message, "export failed");
        Self { status: ExportStatus::Error, message, correlation_id, file_id, url: None }
    }

    pub fn is_success(&self) -> bool {
        self.status == ExportStatus::Success
    }
}

pub struct TripExporter {
    config: ExportConfig,
    docs: Arc<dyn DocumentService>,
    sheets: Arc<dyn SpreadsheetService>,
    drive: Arc<dyn DriveService>,
}

impl TripExporter {
    pub fn new(
        config: ExportConfig,
        docs: Arc<dyn DocumentService>,
        sheets: Arc<dyn SpreadsheetService>,
        drive: Arc<dyn DriveService>,
    ) -> Self {
        Self { config, docs, sheets, drive }
    }

    /// Build an exporter backed by the real Google services, honoring any
    /// endpoint overrides from the configuration.
    pub fn with_google_services(
        config: ExportConfig,
        http: reqwest::Client,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        let endpoints = &config.endpoints;
        let docs_url = endpoints.docs.clone().unwrap_or_else(|| DOCS_BASE_URL.to_string());
        let sheets_url = endpoints.sheets.clone().unwrap_or_else(|| SHEETS_BASE_URL.to_string());
        let drive_url = endpoints.drive.clone().unwrap_or_else(|| DRIVE_BASE_URL.to_string());

        let docs =
            GoogleDocsService::with_base_url(http.clone(), Arc::clone(&tokens), docs_url);
        let sheets =
            GoogleSheetsService::with_base_url(http.clone(), Arc::clone(&tokens), sheets_url);
        let drive = GoogleDriveService::with_base_url(http, tokens, drive_url);
        Self::new(config, Arc::new(docs), Arc::new(sheets), Arc::new(drive))
    }

    /// Export the descriptive trip plan to a fresh document: one heading per
    /// non-empty section, bodies compiled through the markdown compiler, the
    /// whole batch submitted in one call.
    pub async fn export_trip_plan_to_doc(&self, request: &DocExportRequest) -> ExportOutcome {
        let correlation_id = new_correlation_id();
        if let Err(cause) = self.ensure_configured() {
            return ExportOutcome::failure(correlation_id, preflight_message(&cause), None);
        }

        let title = request.document_title.as_deref().unwrap_or(DEFAULT_DOC_TITLE);
        let handle = match self.docs.create_document(title).await {
            Ok(handle) => handle,
            Err(cause) => {
                return ExportOutcome::failure(
                    correlation_id,
                    format!("failed to create document: {}", ApplicationError::from(cause)),
                    None,
                );
            }
        };
        self.share_created_file(&handle.document_id).await;

        let operations = assemble_sections(&request.sections());
        match self.docs.apply_edits(&handle.document_id, &operations).await {
            Ok(()) => {
                info!(document_id = %handle.document_id, %correlation_id, "trip plan exported");
                ExportOutcome::success(
                    correlation_id,
                    format!("Trip plan exported to document: {title}"),
                    Some(handle.document_id),
                    Some(handle.url),
                )
            }
            // The document exists but its content is in an undefined state;
            // hand back the id so the caller can inspect or delete it.
            Err(cause) => ExportOutcome::failure(
                correlation_id,
                format!(
                    "document {} was created but the content update failed: {}",
                    handle.document_id,
                    ApplicationError::from(cause)
                ),
                Some(handle.document_id),
            ),
        }
    }

    /// Export a financial plan to the finance tab: overwrite headers plus
    /// one row, or append a row to an existing spreadsheet.
    pub async fn export_finance_to_sheet(
        &self,
        plan: &FinancePlan,
        options: &SheetExportOptions,
    ) -> ExportOutcome {
        let correlation_id = new_correlation_id();
        if let Err(cause) = self.ensure_configured() {
            return ExportOutcome::failure(correlation_id, preflight_message(&cause), None);
        }

        let summary = plan.summary_text();
        let (spreadsheet_id, url, tab_id, append) = match options.spreadsheet_id.clone() {
            Some(spreadsheet_id) => {
                let tab_id = match self.resolve_finance_tab(&spreadsheet_id).await {
                    Ok(tab_id) => tab_id,
                    Err(cause) => {
                        return ExportOutcome::failure(
                            correlation_id,
                            format!("failed to resolve the finance tab: {}", ApplicationError::from(cause)),
                            Some(spreadsheet_id),
                        );
                    }
                };
                let url = spreadsheet_url(&spreadsheet_id);
                (spreadsheet_id, url, tab_id, options.append)
            }
            None => {
                let title = options.spreadsheet_title.as_deref().unwrap_or(DEFAULT_SHEET_TITLE);
                let handle = match self.sheets.create_spreadsheet(title, FINANCE_TAB).await {
                    Ok(handle) => handle,
                    Err(cause) => {
                        return ExportOutcome::failure(
                            correlation_id,
                            format!("failed to create spreadsheet: {}", ApplicationError::from(cause)),
                            None,
                        );
                    }
                };
                self.share_created_file(&handle.spreadsheet_id).await;
                // A sheet that did not exist a moment ago has nothing to
                // append below.
                (handle.spreadsheet_id, handle.url, handle.tab_id, false)
            }
        };

        let range = format!("'{FINANCE_TAB}'!A1");
        let write_result = if append {
            self.sheets
                .append_values(&spreadsheet_id, &range, &plan.sheet_row(&summary))
                .await
                .map(|row| row.unwrap_or(1))
        } else {
            self.sheets
                .update_values(&spreadsheet_id, &range, &plan.sheet_rows_with_headers(&summary))
                .await
                .map(|()| 1)
        };
        let summary_row = match write_result {
            Ok(row) => row,
            Err(cause) => {
                return ExportOutcome::failure(
                    correlation_id,
                    format!(
                        "spreadsheet {spreadsheet_id} was created or found but the value write \
                         failed: {}",
                        ApplicationError::from(cause)
                    ),
                    Some(spreadsheet_id),
                );
            }
        };

        let mut formatting: Vec<SheetRequest> = Vec::new();
        if !append {
            formatting.push(bold_header_request(tab_id, FINANCE_HEADERS.len()));
        }
        formatting.push(wrap_summary_request(tab_id, summary_row, SUMMARY_COLUMN));
        if let Err(cause) = self.sheets.batch_format(&spreadsheet_id, &formatting).await {
            return ExportOutcome::failure(
                correlation_id,
                format!("values were written but formatting failed: {}", ApplicationError::from(cause)),
                Some(spreadsheet_id),
            );
        }

        info!(%spreadsheet_id, %correlation_id, append, "financial plan exported");
        ExportOutcome::success(
            correlation_id,
            format!("Financial plan exported to tab '{FINANCE_TAB}'."),
            Some(spreadsheet_id),
            Some(url),
        )
    }

    /// Permanently delete a previously created document or spreadsheet.
    pub async fn delete_file(&self, file_id: &str) -> ExportOutcome {
        let correlation_id = new_correlation_id();
        if let Err(cause) = self.ensure_configured() {
            return ExportOutcome::failure(correlation_id, preflight_message(&cause), None);
        }

        match self.drive.delete_file(file_id).await {
            Ok(()) => ExportOutcome::success(
                correlation_id,
                format!("File with ID '{file_id}' has been permanently deleted."),
                Some(file_id.to_string()),
                None,
            ),
            Err(cause) => ExportOutcome::failure(
                correlation_id,
                format!("failed to delete file '{file_id}': {}", ApplicationError::from(cause)),
                Some(file_id.to_string()),
            ),
        }
    }

    async fn resolve_finance_tab(
        &self,
        spreadsheet_id: &str,
    ) -> Result<i64, crate::error::ServiceError> {
        match self.sheets.find_tab(spreadsheet_id, FINANCE_TAB).await? {
            Some(tab_id) => Ok(tab_id),
            None => self.sheets.add_tab(spreadsheet_id, FINANCE_TAB).await,
        }
    }

    /// Misconfiguration is reported before any remote mutation is attempted.
    fn ensure_configured(&self) -> Result<(), ApplicationError> {
        if self.config.service_account_key_path.is_none() {
            return Err(ApplicationError::Configuration(
                "service account key path is not set".to_string(),
            ));
        }
        Ok(())
    }

    async fn share_created_file(&self, file_id: &str) {
        let Some(email) = self.config.share_with_email.as_deref() else {
            return;
        };
        if let Err(cause) = self.drive.share_with(file_id, email).await {
            warn!(file_id, email, error = %cause, "failed to share created file");
        }
    }
}

fn preflight_message(cause: &ApplicationError) -> String {
    format!("Google API services are not available: {cause}")
}

fn new_correlation_id() -> String {
    Uuid::new_v4().simple().to_string()
}
