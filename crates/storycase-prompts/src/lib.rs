pub mod presets;
pub mod request;
pub mod schema;
pub mod system;

pub use presets::{PresetStory, PRESETS};
pub use request::{ChatMessage, ChatRequest, Role};
pub use schema::{test_suite_schema, SCHEMA_NAME};
use storycase_core::StorycaseError;

/// Assemble the chat request for a user story.
///
/// Fails with `InvalidInput` when the story is blank; no request is built.
pub fn build_request(user_story: &str) -> Result<ChatRequest, StorycaseError> {
    if user_story.trim().is_empty() {
        return Err(StorycaseError::InvalidInput(
            "user story cannot be empty".into(),
        ));
    }

    let mut system = String::new();
    system::append_instructions(&mut system);

    let mut user = String::new();
    user.push_str("User Story:\n");
    user.push_str(user_story.trim());
    user.push_str(
        "\n\nGenerate a comprehensive test suite with at least 5-8 test cases \
         covering different scenarios.",
    );

    Ok(ChatRequest {
        messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
        schema_name: SCHEMA_NAME.to_string(),
        schema: test_suite_schema(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_system_then_user() {
        let req = build_request("As a user, I want to log in with email and password.").unwrap();
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0].role, Role::System);
        assert!(req.messages[0].content.contains("expert QA engineer"));
        assert_eq!(req.messages[1].role, Role::User);
        assert!(req.messages[1]
            .content
            .contains("As a user, I want to log in with email and password."));
        assert_eq!(req.schema_name, "test_suite");
        assert_eq!(req.schema, test_suite_schema());
    }

    #[test]
    fn system_instruction_is_fixed() {
        let a = build_request("story one").unwrap();
        let b = build_request("story two").unwrap();
        assert_eq!(a.messages[0], b.messages[0]);
        assert_ne!(a.messages[1], b.messages[1]);
    }

    #[test]
    fn blank_story_is_invalid_input() {
        for story in ["", "   ", "\n\t \n"] {
            assert!(matches!(
                build_request(story),
                Err(StorycaseError::InvalidInput(_))
            ));
        }
    }
}
