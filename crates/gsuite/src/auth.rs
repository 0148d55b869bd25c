use async_trait::async_trait;
use secrecy::SecretString;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("service credentials are not available: {0}")]
    Misconfigured(String),
}

/// Produces bearer tokens for the Google APIs. Exchanging a service-account
/// key for short-lived tokens happens behind this seam; the adapters only
/// ever see an opaque secret.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<SecretString, AuthError>;
}

/// Fixed-token provider for tests and for environments that mint tokens out
/// of band.
pub struct StaticTokenProvider {
    token: SecretString,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into().into() }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<SecretString, AuthError> {
        Ok(self.token.clone())
    }
}
