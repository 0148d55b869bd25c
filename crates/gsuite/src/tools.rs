//! Export adapters exposed as agent tools.
//!
//! Thin wrappers that deserialize the tool input, run the exporter, and hand
//! the structured outcome back as JSON. All failure reporting happens inside
//! [`TripExporter`]; a tool call only errors on malformed input.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use waypoint_agent::tools::{Tool, DELETE_FILE_TOOL, EXPORT_DOC_TOOL, EXPORT_SHEET_TOOL};
use waypoint_core::{FinancePlan, TripCosts};

use crate::export::{DocExportRequest, SheetExportOptions, TripExporter};

pub struct DocExportTool {
    exporter: Arc<TripExporter>,
}

impl DocExportTool {
    pub fn new(exporter: Arc<TripExporter>) -> Self {
        Self { exporter }
    }
}

#[async_trait]
impl Tool for DocExportTool {
    fn name(&self) -> &'static str {
        EXPORT_DOC_TOOL
    }

    fn description(&self) -> &'static str {
        "Exports flight, hotel, itinerary, and optional food sections to a new document"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let request: DocExportRequest = serde_json::from_value(input)?;
        let outcome = self.exporter.export_trip_plan_to_doc(&request).await;
        Ok(serde_json::to_value(outcome)?)
    }
}

#[derive(Debug, Deserialize)]
struct SheetExportInput {
    costs: TripCosts,
    source: String,
    destination: String,
    #[serde(default)]
    spreadsheet_id: Option<String>,
    #[serde(default)]
    spreadsheet_title: Option<String>,
    #[serde(default)]
    append_data: bool,
}

pub struct SheetExportTool {
    exporter: Arc<TripExporter>,
}

impl SheetExportTool {
    pub fn new(exporter: Arc<TripExporter>) -> Self {
        Self { exporter }
    }
}

#[async_trait]
impl Tool for SheetExportTool {
    fn name(&self) -> &'static str {
        EXPORT_SHEET_TOOL
    }

    fn description(&self) -> &'static str {
        "Exports a trip financial plan to the finance tab of a spreadsheet"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let input: SheetExportInput = serde_json::from_value(input)?;
        let costs = TripCosts::new(
            input.costs.flights,
            input.costs.hotels,
            input.costs.itinerary,
            input.costs.food,
            input.costs.budget,
        )?;
        let plan = FinancePlan::new(input.source, input.destination, costs);
        let options = SheetExportOptions {
            spreadsheet_id: input.spreadsheet_id,
            spreadsheet_title: input.spreadsheet_title,
            append: input.append_data,
        };
        let outcome = self.exporter.export_finance_to_sheet(&plan, &options).await;
        Ok(serde_json::to_value(outcome)?)
    }
}

#[derive(Debug, Deserialize)]
struct DeleteFileInput {
    file_id: String,
}

pub struct DeleteFileTool {
    exporter: Arc<TripExporter>,
}

impl DeleteFileTool {
    pub fn new(exporter: Arc<TripExporter>) -> Self {
        Self { exporter }
    }
}

#[async_trait]
impl Tool for DeleteFileTool {
    fn name(&self) -> &'static str {
        DELETE_FILE_TOOL
    }

    fn description(&self) -> &'static str {
        "Permanently deletes a previously exported file by its identifier"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let input: DeleteFileInput = serde_json::from_value(input)?;
        let outcome = self.exporter.delete_file(&input.file_id).await;
        Ok(serde_json::to_value(outcome)?)
    }
}
