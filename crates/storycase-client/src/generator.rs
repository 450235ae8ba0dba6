use storycase_core::{normalize_suite, StorycaseError, TestSuite};
use storycase_prompts::{build_request, ChatRequest};
use tracing::{info, warn};

use crate::config::ModelConfig;
use crate::ModelClient;

/// Total attempts per generation: the first call plus one corrective retry.
pub const MAX_SCHEMA_ATTEMPTS: usize = 2;

/// The generation pipeline: prompt, model call, validation.
///
/// Only `SchemaViolation` is retried, once, with the violation fed back to
/// the model. Every other error returns to the caller on first occurrence.
pub struct Generator<C> {
    client: C,
    config: ModelConfig,
}

impl<C: ModelClient> Generator<C> {
    pub fn new(client: C, config: ModelConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub async fn generate(&self, user_story: &str) -> Result<TestSuite, StorycaseError> {
        let request = build_request(user_story)?;

        let mut current = request.clone();
        let mut last_violation = None;
        for attempt in 1..=MAX_SCHEMA_ATTEMPTS {
            match self.attempt(user_story, &current).await {
                Ok(suite) => {
                    info!(
                        "generated {} test cases with {} (attempt {attempt}/{MAX_SCHEMA_ATTEMPTS})",
                        suite.len(),
                        self.client.name()
                    );
                    return Ok(suite);
                }
                Err(e) if e.is_schema_violation() => {
                    warn!("attempt {attempt}/{MAX_SCHEMA_ATTEMPTS} rejected: {e}");
                    current = request.with_correction(&e.to_string());
                    last_violation = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_violation.unwrap_or_else(|| {
            StorycaseError::suite_violation("response", "no generation attempts were made")
        }))
    }

    async fn attempt(
        &self,
        user_story: &str,
        request: &ChatRequest,
    ) -> Result<TestSuite, StorycaseError> {
        let raw = self.client.complete(&self.config, request).await?;
        normalize_suite(user_story, &raw)
    }
}
