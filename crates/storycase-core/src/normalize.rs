//! Validation and normalization of raw model output into a [`TestSuite`].
//!
//! The model is asked for schema-constrained JSON, but nothing guarantees it
//! complies. Every field of a raw case may be missing or null here; the
//! normalizer fills the ones with a safe default and rejects the rest with a
//! [`StorycaseError::SchemaViolation`] naming the case position and field.

use serde::Deserialize;
use serde_json::Value;

use crate::error::StorycaseError;
use crate::test_case::{test_id_for, Priority, TestCase, TestSuite, TestType};

/// Suite as returned by the model, before validation.
#[derive(Debug, Default, Deserialize)]
pub struct RawTestSuite {
    #[serde(default)]
    pub user_story: Option<String>,
    #[serde(default)]
    pub test_cases: Option<Vec<Value>>,
    #[serde(default)]
    pub coverage_summary: Option<String>,
}

/// One case as returned by the model, before validation.
///
/// The model's own id is not part of it: ids are reassigned, and
/// [`raw_id`] reads whatever the model sent for error messages.
#[derive(Debug, Default, Deserialize)]
pub struct RawTestCase {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub preconditions: Option<Vec<String>>,
    #[serde(default)]
    pub steps: Option<Vec<String>>,
    #[serde(default)]
    pub expected_result: Option<String>,
    #[serde(default)]
    pub test_type: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

/// Validate `raw` and build the suite for `user_story`.
///
/// The story is stored verbatim regardless of what the model echoed back,
/// and ids are reassigned `TC001..` in generation order.
pub fn normalize_suite(user_story: &str, raw: &Value) -> Result<TestSuite, StorycaseError> {
    let raw: RawTestSuite = RawTestSuite::deserialize(raw)
        .map_err(|e| StorycaseError::suite_violation("test_suite", e.to_string()))?;

    let raw_cases = raw.test_cases.unwrap_or_default();
    if raw_cases.is_empty() {
        return Err(StorycaseError::suite_violation(
            "test_cases",
            "no test cases returned",
        ));
    }

    let test_cases = raw_cases
        .iter()
        .enumerate()
        .map(|(index, value)| normalize_case(index, value))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TestSuite {
        user_story: user_story.to_string(),
        test_cases,
        coverage_summary: raw
            .coverage_summary
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    })
}

fn normalize_case(index: usize, value: &Value) -> Result<TestCase, StorycaseError> {
    let position = index + 1;
    let model_id = raw_id(value);
    let violation = |field: &str, reason: String| {
        StorycaseError::case_violation(position, model_id.as_deref(), field, reason)
    };
    let raw =
        RawTestCase::deserialize(value).map_err(|e| violation("test_case", e.to_string()))?;

    let title =
        non_blank(raw.title).ok_or_else(|| violation("title", "must not be empty".into()))?;

    let steps = clean_list(raw.steps);
    if steps.is_empty() {
        return Err(violation("steps", "must contain at least one step".into()));
    }

    let expected_result = non_blank(raw.expected_result)
        .ok_or_else(|| violation("expected_result", "must not be empty".into()))?;

    let test_type = match non_blank(raw.test_type) {
        None => TestType::default(),
        Some(s) => TestType::parse_str(&canonical(&s))
            .ok_or_else(|| violation("test_type", format!("unknown value {s:?}")))?,
    };

    let priority = match non_blank(raw.priority) {
        None => Priority::default(),
        Some(s) => Priority::parse_str(&canonical(&s))
            .ok_or_else(|| violation("priority", format!("unknown value {s:?}")))?,
    };

    Ok(TestCase {
        id: test_id_for(index),
        title,
        description: raw
            .description
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        preconditions: clean_list(raw.preconditions),
        steps,
        expected_result,
        test_type,
        priority,
    })
}

/// Best-effort model id for error messages. Numbers are accepted as well
/// as strings; anything else is ignored.
fn raw_id(value: &Value) -> Option<String> {
    ["test_id", "id"]
        .iter()
        .filter_map(|key| match value.get(key)? {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .find(|s| !s.is_empty())
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn clean_list(items: Option<Vec<String>>) -> Vec<String> {
    items
        .unwrap_or_default()
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// "Edge Case", "edge-case" and "EDGE_CASE" all mean edge_case.
fn canonical(s: &str) -> String {
    s.trim().to_lowercase().replace(['-', ' '], "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn case(id: &str) -> Value {
        json!({
            "test_id": id,
            "title": "Valid login",
            "description": "User logs in with valid credentials",
            "preconditions": ["User account exists"],
            "steps": ["Open login page", "Enter credentials", "Submit"],
            "expected_result": "Dashboard is shown",
            "test_type": "functional",
            "priority": "high"
        })
    }

    fn suite(cases: Vec<Value>) -> Value {
        json!({
            "user_story": "model echo",
            "test_cases": cases,
            "coverage_summary": "Happy path only"
        })
    }

    fn expect_violation(err: StorycaseError) -> (Option<usize>, Option<String>, String) {
        match err {
            StorycaseError::SchemaViolation {
                position,
                test_id,
                field,
                ..
            } => (position, test_id, field),
            other => panic!("expected schema violation, got {other:?}"),
        }
    }

    #[test]
    fn renumbers_ids_sequentially() {
        let raw = suite(vec![case("A-7"), case("A-7"), case("TC042")]);
        let suite = normalize_suite("story", &raw).unwrap();
        let ids: Vec<_> = suite.test_cases.iter().map(|tc| tc.id.as_str()).collect();
        assert_eq!(ids, ["TC001", "TC002", "TC003"]);
    }

    #[test]
    fn user_story_is_stored_verbatim() {
        let story = "  As a user,\n I want things.  ";
        let suite = normalize_suite(story, &suite(vec![case("x")])).unwrap();
        assert_eq!(suite.user_story, story);
        assert_eq!(suite.coverage_summary, "Happy path only");
    }

    #[test]
    fn missing_priority_defaults_to_medium() {
        let mut c = case("TC001");
        c.as_object_mut().unwrap().remove("priority");
        let suite = normalize_suite("s", &suite(vec![c])).unwrap();
        assert_eq!(suite.test_cases[0].priority, Priority::Medium);
    }

    #[test]
    fn null_test_type_defaults_to_functional() {
        let mut c = case("TC001");
        c["test_type"] = Value::Null;
        let suite = normalize_suite("s", &suite(vec![c])).unwrap();
        assert_eq!(suite.test_cases[0].test_type, TestType::Functional);
    }

    #[test]
    fn enum_spelling_variants_are_accepted() {
        let mut c = case("TC001");
        c["test_type"] = json!("Edge Case");
        c["priority"] = json!(" HIGH ");
        let suite = normalize_suite("s", &suite(vec![c])).unwrap();
        assert_eq!(suite.test_cases[0].test_type, TestType::EdgeCase);
        assert_eq!(suite.test_cases[0].priority, Priority::High);
    }

    #[test]
    fn unknown_priority_is_rejected() {
        let mut c = case("TC001");
        c["priority"] = json!("critical");
        let err = normalize_suite("s", &suite(vec![case("TC001"), c])).unwrap_err();
        let (position, test_id, field) = expect_violation(err);
        assert_eq!(position, Some(2));
        assert_eq!(test_id.as_deref(), Some("TC001"));
        assert_eq!(field, "priority");
    }

    #[test]
    fn unknown_test_type_is_rejected() {
        let mut c = case("TC001");
        c["test_type"] = json!("performance");
        let (_, _, field) = expect_violation(normalize_suite("s", &suite(vec![c])).unwrap_err());
        assert_eq!(field, "test_type");
    }

    #[test]
    fn empty_steps_names_position() {
        let mut c = case("TC003");
        c["steps"] = json!([]);
        let raw = suite(vec![case("TC001"), case("TC002"), c]);
        let (position, test_id, field) = expect_violation(normalize_suite("s", &raw).unwrap_err());
        assert_eq!(position, Some(3));
        assert_eq!(test_id.as_deref(), Some("TC003"));
        assert_eq!(field, "steps");
    }

    #[test]
    fn blank_steps_count_as_empty() {
        let mut c = case("TC001");
        c["steps"] = json!(["  ", ""]);
        let (_, _, field) = expect_violation(normalize_suite("s", &suite(vec![c])).unwrap_err());
        assert_eq!(field, "steps");
    }

    #[test]
    fn missing_expected_result_is_rejected() {
        let mut c = case("TC001");
        c["expected_result"] = json!("   ");
        let (_, _, field) = expect_violation(normalize_suite("s", &suite(vec![c])).unwrap_err());
        assert_eq!(field, "expected_result");
    }

    #[test]
    fn missing_title_is_rejected() {
        let mut c = case("TC001");
        c.as_object_mut().unwrap().remove("title");
        let (_, _, field) = expect_violation(normalize_suite("s", &suite(vec![c])).unwrap_err());
        assert_eq!(field, "title");
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let c = json!({
            "title": "Minimal",
            "steps": ["Do it"],
            "expected_result": "Done"
        });
        let suite = normalize_suite("s", &json!({ "test_cases": [c] })).unwrap();
        let tc = &suite.test_cases[0];
        assert_eq!(tc.id, "TC001");
        assert!(tc.description.is_empty());
        assert!(tc.preconditions.is_empty());
        assert_eq!(tc.test_type, TestType::Functional);
        assert_eq!(tc.priority, Priority::Medium);
        assert!(suite.coverage_summary.is_empty());
    }

    #[test]
    fn empty_case_list_is_rejected() {
        let (position, _, field) =
            expect_violation(normalize_suite("s", &suite(vec![])).unwrap_err());
        assert_eq!(position, None);
        assert_eq!(field, "test_cases");

        let (_, _, field) = expect_violation(normalize_suite("s", &json!({})).unwrap_err());
        assert_eq!(field, "test_cases");
    }

    #[test]
    fn wrongly_typed_case_names_position() {
        let bad = json!({ "test_id": "X1", "title": "t", "steps": "not a list" });
        let (position, test_id, field) =
            expect_violation(normalize_suite("s", &suite(vec![case("a"), bad])).unwrap_err());
        assert_eq!(position, Some(2));
        assert_eq!(test_id.as_deref(), Some("X1"));
        assert_eq!(field, "test_case");
    }

    #[test]
    fn model_ids_of_any_shape_are_ignored() {
        let mut numeric = case("unused");
        numeric["test_id"] = json!(1);
        let mut both = case("TC001");
        both["id"] = json!("1");
        let mut object = case("unused");
        object["test_id"] = json!({ "n": 3 });

        let suite = normalize_suite("s", &suite(vec![numeric, both, object])).unwrap();
        let ids: Vec<_> = suite.test_cases.iter().map(|tc| tc.id.as_str()).collect();
        assert_eq!(ids, ["TC001", "TC002", "TC003"]);
    }

    #[test]
    fn numeric_model_id_appears_in_violation() {
        let mut c = case("unused");
        c["test_id"] = json!(7);
        c["steps"] = json!([]);
        let (position, test_id, _) =
            expect_violation(normalize_suite("s", &suite(vec![c])).unwrap_err());
        assert_eq!(position, Some(1));
        assert_eq!(test_id.as_deref(), Some("7"));
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let err = normalize_suite("s", &json!("just text")).unwrap_err();
        assert!(err.is_schema_violation());
    }
}
