use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use storycase_core::StorycaseError;
use storycase_prompts::ChatRequest;

use crate::config::ModelConfig;
use crate::ModelClient;

/// A scripted model client for tests.
///
/// Replies are served in order; once the script is exhausted the fallback
/// reply (if any) is repeated, otherwise calls fail with a network error.
pub struct MockModelClient {
    script: Mutex<VecDeque<Result<Value, StorycaseError>>>,
    fallback: Option<Value>,
    calls: AtomicUsize,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockModelClient {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A mock that answers every call with `reply`.
    pub fn always(reply: Value) -> Self {
        Self {
            fallback: Some(reply),
            ..Self::new()
        }
    }

    /// Queue a successful reply.
    pub fn reply(self, value: Value) -> Self {
        self.push(Ok(value))
    }

    /// Queue a failure.
    pub fn fail(self, err: StorycaseError) -> Self {
        self.push(Err(err))
    }

    fn push(self, item: Result<Value, StorycaseError>) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(item);
        }
        self
    }

    /// Number of times `complete` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every request received, in call order.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Default for MockModelClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(
        &self,
        _config: &ModelConfig,
        request: &ChatRequest,
    ) -> Result<Value, StorycaseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let next = self.script.lock().ok().and_then(|mut s| s.pop_front());
        match (next, &self.fallback) {
            (Some(item), _) => item,
            (None, Some(reply)) => Ok(reply.clone()),
            (None, None) => Err(StorycaseError::TransientNetwork(
                "mock script exhausted".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use storycase_prompts::build_request;

    #[tokio::test]
    async fn serves_script_in_order() {
        let mock = MockModelClient::new()
            .reply(json!({"n": 1}))
            .fail(StorycaseError::TransientNetwork("down".into()));
        let config = ModelConfig::default();
        let req = build_request("story").unwrap();

        assert_eq!(mock.complete(&config, &req).await.unwrap(), json!({"n": 1}));
        assert!(mock.complete(&config, &req).await.unwrap_err().is_retryable());
        assert!(mock.complete(&config, &req).await.is_err());
        assert_eq!(mock.calls(), 3);
        assert_eq!(mock.requests().len(), 3);
    }

    #[tokio::test]
    async fn always_repeats_reply() {
        let mock = MockModelClient::always(json!({"ok": true}));
        let config = ModelConfig::default();
        let req = build_request("story").unwrap();
        for _ in 0..3 {
            assert_eq!(
                mock.complete(&config, &req).await.unwrap(),
                json!({"ok": true})
            );
        }
        assert_eq!(mock.calls(), 3);
    }

    #[test]
    fn name_is_mock() {
        assert_eq!(MockModelClient::new().name(), "mock");
    }
}
