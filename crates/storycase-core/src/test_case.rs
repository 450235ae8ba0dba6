use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    Functional,
    Negative,
    EdgeCase,
    Security,
}

impl TestType {
    pub const ALL: &[TestType] = &[
        TestType::Functional,
        TestType::Negative,
        TestType::EdgeCase,
        TestType::Security,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TestType::Functional => "functional",
            TestType::Negative => "negative",
            TestType::EdgeCase => "edge_case",
            TestType::Security => "security",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "functional" => Some(TestType::Functional),
            "negative" => Some(TestType::Negative),
            "edge_case" => Some(TestType::EdgeCase),
            "security" => Some(TestType::Security),
            _ => None,
        }
    }
}

impl Default for TestType {
    fn default() -> Self {
        TestType::Functional
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: &[Priority] = &[Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generated scenario. Serialized with the exported field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(rename = "test_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub preconditions: Vec<String>,
    pub steps: Vec<String>,
    pub expected_result: String,
    pub test_type: TestType,
    pub priority: Priority,
}

/// All cases generated for one user story.
///
/// Built once by the normalizer and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSuite {
    pub user_story: String,
    pub test_cases: Vec<TestCase>,
    pub coverage_summary: String,
}

impl TestSuite {
    pub fn len(&self) -> usize {
        self.test_cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.test_cases.is_empty()
    }
}

/// Sequential id for the case at zero-based `index`: `TC001`, `TC002`, ...
pub fn test_id_for(index: usize) -> String {
    format!("TC{:03}", index + 1)
}
