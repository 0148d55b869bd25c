use anyhow::Result;
use async_trait::async_trait;

/// Seam to the backing language model. Implementations complete a prompt
/// under a fixed instruction; the planner never interprets the reply beyond
/// the constrained markdown dialect the instructions mandate.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, instruction: &str, prompt: &str) -> Result<String>;
}
