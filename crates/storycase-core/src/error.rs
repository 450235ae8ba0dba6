use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorycaseError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("rate limited: {message}{}", retry_hint(.retry_after))]
    RateLimited {
        retry_after: Option<Duration>,
        message: String,
    },

    #[error("network error: {0}")]
    TransientNetwork(String),

    #[error("schema violation: {}{field}: {reason}", case_location(.position, .test_id))]
    SchemaViolation {
        /// 1-based position of the offending case; `None` for suite-level problems.
        position: Option<usize>,
        test_id: Option<String>,
        field: String,
        reason: String,
    },

    #[error("io error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("model API returned {status}: {message}")]
    Api { status: u16, message: String },
}

impl StorycaseError {
    /// Violation that applies to the whole suite rather than one case.
    pub fn suite_violation(field: &str, reason: impl Into<String>) -> Self {
        StorycaseError::SchemaViolation {
            position: None,
            test_id: None,
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn case_violation(
        position: usize,
        test_id: Option<&str>,
        field: &str,
        reason: impl Into<String>,
    ) -> Self {
        StorycaseError::SchemaViolation {
            position: Some(position),
            test_id: test_id.map(String::from),
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorycaseError::Io {
            path: path.into(),
            source,
        }
    }

    /// The caller may retry after a backoff. Never retried automatically.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StorycaseError::RateLimited { .. } | StorycaseError::TransientNetwork(_)
        )
    }

    /// Only fixable outside the process (credential configuration).
    pub fn is_fatal(&self) -> bool {
        matches!(self, StorycaseError::Authentication(_))
    }

    pub fn is_schema_violation(&self) -> bool {
        matches!(self, StorycaseError::SchemaViolation { .. })
    }
}

fn retry_hint(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(d) => format!(" (retry after {}s)", d.as_secs()),
        None => String::new(),
    }
}

fn case_location(position: &Option<usize>, test_id: &Option<String>) -> String {
    match (position, test_id) {
        (Some(pos), Some(id)) => format!("test case #{pos} ({id}) "),
        (Some(pos), None) => format!("test case #{pos} "),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_violation_names_position_and_id() {
        let err = StorycaseError::case_violation(2, Some("TC009"), "steps", "must not be empty");
        assert_eq!(
            err.to_string(),
            "schema violation: test case #2 (TC009) steps: must not be empty"
        );
    }

    #[test]
    fn case_violation_without_id() {
        let err = StorycaseError::case_violation(3, None, "priority", "unknown value \"urgent\"");
        assert_eq!(
            err.to_string(),
            "schema violation: test case #3 priority: unknown value \"urgent\""
        );
    }

    #[test]
    fn suite_violation_has_no_location() {
        let err = StorycaseError::suite_violation("test_cases", "no test cases returned");
        assert_eq!(
            err.to_string(),
            "schema violation: test_cases: no test cases returned"
        );
    }

    #[test]
    fn rate_limited_shows_retry_hint() {
        let err = StorycaseError::RateLimited {
            retry_after: Some(Duration::from_secs(20)),
            message: "slow down".into(),
        };
        assert_eq!(err.to_string(), "rate limited: slow down (retry after 20s)");

        let err = StorycaseError::RateLimited {
            retry_after: None,
            message: "slow down".into(),
        };
        assert_eq!(err.to_string(), "rate limited: slow down");
    }

    #[test]
    fn classification() {
        assert!(StorycaseError::TransientNetwork("timeout".into()).is_retryable());
        assert!(StorycaseError::RateLimited {
            retry_after: None,
            message: String::new()
        }
        .is_retryable());
        assert!(!StorycaseError::InvalidInput("empty".into()).is_retryable());
        assert!(StorycaseError::Authentication("missing key".into()).is_fatal());
        assert!(!StorycaseError::Api {
            status: 400,
            message: "bad model".into()
        }
        .is_fatal());
        assert!(StorycaseError::suite_violation("x", "y").is_schema_violation());
    }
}
