use storycase_core::{StorycaseError, TestSuite};
use tokio::runtime::{Builder, Runtime};

use crate::{Generator, ModelClient, ModelConfig, OpenAiClient};

/// Blocking wrapper around the async `Generator`.
///
/// Owns a current-thread tokio runtime and uses `block_on()` for each call.
/// Designed for sync callers like the interactive menu.
pub struct BlockingGenerator<C> {
    inner: Generator<C>,
    rt: Runtime,
}

impl<C: ModelClient> BlockingGenerator<C> {
    pub fn new(client: C, config: ModelConfig) -> std::io::Result<Self> {
        Ok(Self {
            inner: Generator::new(client, config),
            rt: Builder::new_current_thread().enable_all().build()?,
        })
    }

    pub fn generate(&self, user_story: &str) -> Result<TestSuite, StorycaseError> {
        self.rt.block_on(self.inner.generate(user_story))
    }

    pub fn client(&self) -> &C {
        self.inner.client()
    }

    pub fn config(&self) -> &ModelConfig {
        self.inner.config()
    }
}

impl BlockingGenerator<OpenAiClient> {
    pub fn openai(config: ModelConfig) -> std::io::Result<Self> {
        Self::new(OpenAiClient::new(), config)
    }

    pub fn list_models(&self) -> Result<Vec<String>, StorycaseError> {
        self.rt
            .block_on(self.inner.client().list_models(self.inner.config()))
    }
}
