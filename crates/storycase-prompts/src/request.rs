use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A provider-neutral chat request: the conversation plus the JSON schema
/// the reply must conform to.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub schema_name: String,
    pub schema: Value,
}

impl ChatRequest {
    /// Copy of this request with a corrective user turn appended, used for
    /// the single retry after a schema violation.
    pub fn with_correction(&self, violation: &str) -> Self {
        let mut next = self.clone();
        next.messages.push(ChatMessage::user(format!(
            "Your previous response did not match the required schema: {violation}\n\n\
             Return the complete test suite again as a single JSON object that \
             satisfies the schema exactly. Every test case needs at least one step, \
             a non-empty expected_result, and valid test_type and priority values."
        )));
        next
    }
}
