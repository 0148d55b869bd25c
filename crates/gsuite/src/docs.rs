//! Google Docs wire encoding and client.
//!
//! Encodes the core's service-neutral [`EditOperation`] batch into the Docs
//! `batchUpdate` request payloads. The whole batch goes out in one call;
//! Docs applies requests in order, which is exactly the ordering contract
//! the compiler emits under.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use waypoint_core::EditOperation;

use crate::auth::TokenProvider;
use crate::error::{check_status, ServiceError};

pub const DOCS_BASE_URL: &str = "https://docs.googleapis.com/v1";

const BULLET_PRESET: &str = "BULLET_DISC_CIRCLE_SQUARE";
const HEADING_STYLE: &str = "HEADING_1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Location {
    pub index: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub start_index: usize,
    pub end_index: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    pub named_style_type: &'static str,
}

/// One `batchUpdate` request, externally tagged the way the Docs API expects
/// (`{"insertText": {...}}`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DocRequest {
    InsertText {
        location: Location,
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    UpdateTextStyle {
        range: Range,
        text_style: TextStyle,
        fields: &'static str,
    },
    #[serde(rename_all = "camelCase")]
    UpdateParagraphStyle {
        range: Range,
        paragraph_style: ParagraphStyle,
        fields: &'static str,
    },
    #[serde(rename_all = "camelCase")]
    CreateParagraphBullets {
        range: Range,
        bullet_preset: &'static str,
    },
}

pub fn encode_operation(operation: &EditOperation) -> DocRequest {
    match operation {
        EditOperation::InsertText { index, text } => DocRequest::InsertText {
            location: Location { index: *index },
            text: text.clone(),
        },
        EditOperation::SetCharacterStyle { start, end, bold, italic } => {
            DocRequest::UpdateTextStyle {
                range: Range { start_index: *start, end_index: *end },
                text_style: TextStyle { bold: *bold, italic: *italic },
                fields: "bold,italic",
            }
        }
        EditOperation::SetHeading { start, end } => DocRequest::UpdateParagraphStyle {
            range: Range { start_index: *start, end_index: *end },
            paragraph_style: ParagraphStyle { named_style_type: HEADING_STYLE },
            fields: "namedStyleType",
        },
        EditOperation::SetParagraphBullet { start, end } => DocRequest::CreateParagraphBullets {
            range: Range { start_index: *start, end_index: *end },
            bullet_preset: BULLET_PRESET,
        },
    }
}

/// Encode a batch preserving emission order.
pub fn encode_batch(operations: &[EditOperation]) -> Vec<DocRequest> {
    operations.iter().map(encode_operation).collect()
}

/// Locator for a created document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentHandle {
    pub document_id: String,
    pub url: String,
}

/// The document service boundary: create a fresh target, then apply one
/// ordered operation batch to it. The batch is submitted as a unit; a
/// mid-batch failure leaves the document in an undefined intermediate state,
/// which is why every export attempt starts from a fresh document.
#[async_trait]
pub trait DocumentService: Send + Sync {
    async fn create_document(&self, title: &str) -> Result<DocumentHandle, ServiceError>;
    async fn apply_edits(
        &self,
        document_id: &str,
        operations: &[EditOperation],
    ) -> Result<(), ServiceError>;
}

pub struct GoogleDocsService {
    http: Client,
    tokens: Arc<dyn TokenProvider>,
    base_url: String,
}

impl GoogleDocsService {
    pub fn new(http: Client, tokens: Arc<dyn TokenProvider>) -> Self {
        Self::with_base_url(http, tokens, DOCS_BASE_URL)
    }

    pub fn with_base_url(
        http: Client,
        tokens: Arc<dyn TokenProvider>,
        base_url: impl Into<String>,
    ) -> Self {
        Self { http, tokens, base_url: base_url.into() }
    }
}

#[async_trait]
impl DocumentService for GoogleDocsService {
    async fn create_document(&self, title: &str) -> Result<DocumentHandle, ServiceError> {
        let token = self.tokens.access_token().await?;
        let response = self
            .http
            .post(format!("{}/documents", self.base_url))
            .bearer_auth(token.expose_secret())
            .json(&json!({ "title": title }))
            .send()
            .await?;
        let body: Value = check_status("docs", response).await?.json().await?;

        let document_id = body
            .get("documentId")
            .and_then(Value::as_str)
            .ok_or_else(|| ServiceError::Decode {
                service: "docs",
                message: "create response carried no documentId".to_string(),
            })?
            .to_string();
        let url = format!("https://docs.google.com/document/d/{document_id}/edit");
        info!(%document_id, title, "created document");

        Ok(DocumentHandle { document_id, url })
    }

    async fn apply_edits(
        &self,
        document_id: &str,
        operations: &[EditOperation],
    ) -> Result<(), ServiceError> {
        let requests = encode_batch(operations);
        let token = self.tokens.access_token().await?;
        let response = self
            .http
            .post(format!("{}/documents/{document_id}:batchUpdate", self.base_url))
            .bearer_auth(token.expose_secret())
            .json(&json!({ "requests": requests }))
            .send()
            .await?;
        check_status("docs", response).await?;
        info!(document_id, request_count = requests.len(), "applied edit batch");
        Ok(())
    }
}
