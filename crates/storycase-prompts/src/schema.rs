use serde_json::{json, Value};
use storycase_core::{Priority, TestType};

/// Name sent alongside the schema in the structured-output request.
pub const SCHEMA_NAME: &str = "test_suite";

/// JSON Schema for the suite the model must return.
///
/// Written for strict structured output: every property is required and no
/// extra properties are allowed, so optional-looking fields (preconditions)
/// are still required but may be empty.
pub fn test_suite_schema() -> Value {
    let test_types: Vec<&str> = TestType::ALL.iter().map(|t| t.as_str()).collect();
    let priorities: Vec<&str> = Priority::ALL.iter().map(|p| p.as_str()).collect();

    json!({
        "type": "object",
        "properties": {
            "user_story": { "type": "string", "description": "Original user story" },
            "test_cases": {
                "type": "array",
                "description": "Generated test cases",
                "items": {
                    "type": "object",
                    "properties": {
                        "test_id": { "type": "string", "description": "Unique identifier, e.g. TC001" },
                        "title": { "type": "string" },
                        "description": { "type": "string" },
                        "preconditions": { "type": "array", "items": { "type": "string" } },
                        "steps": { "type": "array", "items": { "type": "string" } },
                        "expected_result": { "type": "string" },
                        "test_type": { "type": "string", "enum": test_types },
                        "priority": { "type": "string", "enum": priorities }
                    },
                    "required": [
                        "test_id",
                        "title",
                        "description",
                        "preconditions",
                        "steps",
                        "expected_result",
                        "test_type",
                        "priority"
                    ],
                    "additionalProperties": false
                }
            },
            "coverage_summary": { "type": "string", "description": "Summary of test coverage" }
        },
        "required": ["user_story", "test_cases", "coverage_summary"],
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_match_core_types() {
        let schema = test_suite_schema();
        let item = &schema["properties"]["test_cases"]["items"]["properties"];
        assert_eq!(
            item["test_type"]["enum"],
            json!(["functional", "negative", "edge_case", "security"])
        );
        assert_eq!(item["priority"]["enum"], json!(["high", "medium", "low"]));
    }

    #[test]
    fn every_case_property_is_required() {
        let schema = test_suite_schema();
        let items = &schema["properties"]["test_cases"]["items"];
        let props = items["properties"].as_object().unwrap();
        let required = items["required"].as_array().unwrap();
        assert_eq!(props.len(), required.len());
        for key in props.keys() {
            assert!(required.contains(&json!(key)), "{key} not required");
        }
        assert_eq!(items["additionalProperties"], false);
    }
}
