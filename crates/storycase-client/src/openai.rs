use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use storycase_core::StorycaseError;
use storycase_prompts::ChatRequest;
use tracing::{debug, info, warn};

use crate::config::ModelConfig;
use crate::ModelClient;

/// Client for an OpenAI-compatible `/chat/completions` endpoint using
/// `response_format: json_schema` structured output.
pub struct OpenAiClient {
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

impl OpenAiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    fn api_key(config: &ModelConfig) -> Result<&str, StorycaseError> {
        config.api_key().ok_or_else(|| {
            StorycaseError::Authentication(
                "API key not found. Set OPENAI_API_KEY or pass --api-key".into(),
            )
        })
    }

    fn request_body(config: &ModelConfig, request: &ChatRequest) -> Value {
        json!({
            "model": config.model,
            "temperature": config.temperature,
            "messages": request.messages,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": request.schema_name,
                    "strict": true,
                    "schema": request.schema,
                }
            }
        })
    }

    /// List model ids visible to the configured credential.
    ///
    /// Used by the preflight check to confirm the endpoint is reachable and
    /// the key is accepted.
    pub async fn list_models(&self, config: &ModelConfig) -> Result<Vec<String>, StorycaseError> {
        let api_key = Self::api_key(config)?;
        let resp = self
            .client
            .get(config.endpoint("models"))
            .bearer_auth(api_key)
            .timeout(config.timeout)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(classify_status(status, resp).await);
        }

        let list: ModelList = resp
            .json()
            .await
            .map_err(|e| StorycaseError::TransientNetwork(format!("read model list: {e}")))?;
        Ok(list.data.into_iter().map(|m| m.id).collect())
    }
}

impl Default for OpenAiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelClient for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(
        &self,
        config: &ModelConfig,
        request: &ChatRequest,
    ) -> Result<Value, StorycaseError> {
        let api_key = Self::api_key(config)?;
        info!(
            "requesting completion (model={}, messages={})",
            config.model,
            request.messages.len()
        );

        let resp = self
            .client
            .post(config.endpoint("chat/completions"))
            .bearer_auth(api_key)
            .timeout(config.timeout)
            .json(&Self::request_body(config, request))
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = resp.status();
        if !status.is_success() {
            let err = classify_status(status, resp).await;
            warn!("completion failed: {err}");
            return Err(err);
        }

        let completion: ChatCompletion = resp.json().await.map_err(|e| {
            StorycaseError::suite_violation("response", format!("undecodable completion: {e}"))
        })?;
        parse_completion(completion)
    }
}

fn parse_completion(completion: ChatCompletion) -> Result<Value, StorycaseError> {
    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| StorycaseError::suite_violation("response", "no choices returned"))?;

    if let Some(refusal) = choice.message.refusal.filter(|r| !r.is_empty()) {
        return Err(StorycaseError::suite_violation(
            "response",
            format!("model refused: {refusal}"),
        ));
    }

    let content = choice
        .message
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| StorycaseError::suite_violation("response", "empty message content"))?;
    debug!(
        "completion received ({} bytes, finish_reason={:?})",
        content.len(),
        choice.finish_reason
    );

    serde_json::from_str(strip_code_fence(&content)).map_err(|e| {
        let reason = match choice.finish_reason.as_deref() {
            Some("length") => format!("reply truncated at token limit: {e}"),
            _ => format!("reply is not valid JSON: {e}"),
        };
        StorycaseError::suite_violation("response", reason)
    })
}

// Some compatible servers ignore response_format and wrap JSON in a fence.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop a language tag such as `json` or `JSON` on the opening line.
    let rest = match rest.split_once('\n') {
        Some((tag, body))
            if tag
                .trim()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') =>
        {
            body
        }
        _ => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

fn classify_send_error(e: reqwest::Error) -> StorycaseError {
    if e.is_builder() {
        StorycaseError::InvalidInput(format!("invalid model endpoint: {e}"))
    } else if e.is_timeout() {
        StorycaseError::TransientNetwork(format!("request timed out: {e}"))
    } else {
        StorycaseError::TransientNetwork(format!("connection failed: {e}"))
    }
}

async fn classify_status(status: StatusCode, resp: reqwest::Response) -> StorycaseError {
    let retry_after = resp
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs);

    let body = resp.text().await.unwrap_or_default();
    let msg = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(String::from))
        .unwrap_or(body);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StorycaseError::Authentication(msg),
        StatusCode::TOO_MANY_REQUESTS => StorycaseError::RateLimited {
            retry_after,
            message: msg,
        },
        StatusCode::REQUEST_TIMEOUT => StorycaseError::TransientNetwork(msg),
        s if s.is_server_error() => StorycaseError::TransientNetwork(format!("{s}: {msg}")),
        s => StorycaseError::Api {
            status: s.as_u16(),
            message: msg,
        },
    }
}
