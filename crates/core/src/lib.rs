pub mod compose;
pub mod config;
pub mod errors;
pub mod finance;

pub use compose::{
    assemble_sections, compile_markdown, tokenize_inline, CompiledBlock, EditOperation, Section,
    TextRun, DOCUMENT_BODY_START,
};
pub use config::{ConfigError, Endpoints, ExportConfig};
pub use errors::{ApplicationError, DomainError};
pub use finance::{FinancePlan, TripCosts, FINANCE_HEADERS, FINANCE_TAB, SUMMARY_COLUMN};
