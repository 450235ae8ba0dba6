use async_trait::async_trait;
use serde_json::Value;
use storycase_core::StorycaseError;
use storycase_prompts::ChatRequest;

use crate::config::ModelConfig;

/// A hosted chat model that can answer with schema-constrained JSON.
///
/// `OpenAiClient` talks to an OpenAI-compatible endpoint.
/// `MockModelClient` replays scripted replies in tests.
#[async_trait]
pub trait ModelClient: Send + Sync {
    fn name(&self) -> &str;

    /// Send one request and return the model's structured reply, unvalidated.
    ///
    /// Issues exactly one outbound call. Errors are classified as
    /// `Authentication`, `RateLimited`, `TransientNetwork`, `SchemaViolation`
    /// (reply was not JSON) or `Api`.
    async fn complete(
        &self,
        config: &ModelConfig,
        request: &ChatRequest,
    ) -> Result<Value, StorycaseError>;
}
