//! Google Docs/Sheets/Drive adapters.
//!
//! The core compiler emits service-neutral edit operations; everything that
//! knows Google field names, endpoints, and batching lives here. Each
//! adapter is a trait (so exports are testable against in-memory fakes) with
//! a reqwest-backed implementation, and the export orchestrators convert
//! every failure into a structured outcome instead of letting raw errors
//! cross the boundary.

pub mod auth;
pub mod docs;
pub mod drive;
pub mod error;
pub mod export;
pub mod sheets;
pub mod tools;

pub use auth::{AuthError, StaticTokenProvider, TokenProvider};
pub use docs::{encode_batch, DocRequest, DocumentHandle, DocumentService, GoogleDocsService};
pub use drive::{DriveService, GoogleDriveService};
pub use error::ServiceError;
pub use export::{
    DocExportRequest, ExportOutcome, ExportStatus, SheetExportOptions, TripExporter,
    DEFAULT_DOC_TITLE, DEFAULT_SHEET_TITLE,
};
pub use sheets::{GoogleSheetsService, SheetRequest, SpreadsheetHandle, SpreadsheetService};
pub use tools::{DeleteFileTool, DocExportTool, SheetExportTool};
