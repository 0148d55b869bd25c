//! Google Drive operations: sharing created files and permanent deletion.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::json;
use tracing::info;

use crate::auth::TokenProvider;
use crate::error::{check_status, ServiceError};

pub const DRIVE_BASE_URL: &str = "https://www.googleapis.com/drive/v3";

#[async_trait]
pub trait DriveService: Send + Sync {
    /// Grant `email` writer access to a file. Callers treat a failure here
    /// as a warning, not an export failure.
    async fn share_with(&self, file_id: &str, email: &str) -> Result<(), ServiceError>;
    /// Permanently delete a file. There is no undo.
    async fn delete_file(&self, file_id: &str) -> Result<(), ServiceError>;
}

pub struct GoogleDriveService {
    http: Client,
    tokens: Arc<dyn TokenProvider>,
    base_url: String,
}

impl GoogleDriveService {
    pub fn new(http: Client, tokens: Arc<dyn TokenProvider>) -> Self {
        Self::with_base_url(http, tokens, DRIVE_BASE_URL)
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
impl DriveService for GoogleDriveService {
    async fn share_with(&self, file_id: &str, email: &str) -> Result<(), ServiceError> {
        let token = self.tokens.access_token().await?;
        let response = self
            .http
            .post(format!("{}/files/{file_id}/permissions", self.base_url))
            .query(&[("sendNotificationEmail", "false")])
            .bearer_auth(token.expose_secret())
            .json(&json!({
                "type": "user",
                "role": "writer",
                "emailAddress": email,
            }))
            .send()
            .await?;
        check_status("drive", response).await?;
        info!(file_id, email, "granted writer access");
        Ok(())
    }

    async fn delete_file(&self, file_id: &str) -> Result<(), ServiceError> {
        let token = self.tokens.access_token().await?;
        let response = self
            .http
            .delete(format!("{}/files/{file_id}", self.base_url))
            .bearer_auth(token.expose_secret())
            .send()
            .await?;
        check_status("drive", response).await?;
        info!(file_id, "deleted file");
        Ok(())
    }
}
