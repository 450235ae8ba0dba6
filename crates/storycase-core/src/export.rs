use std::fs;
use std::path::Path;

use crate::error::StorycaseError;
use crate::test_case::TestSuite;

pub const DEFAULT_EXPORT_FILE: &str = "test_cases.json";

/// Write `suite` to `path` as pretty-printed JSON.
///
/// An existing file at `path` is overwritten without warning.
pub fn export_json(suite: &TestSuite, path: &Path) -> Result<(), StorycaseError> {
    let mut body = serde_json::to_string_pretty(suite).map_err(|e| {
        StorycaseError::io(path, std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;
    body.push('\n');
    fs::write(path, body).map_err(|e| StorycaseError::io(path, e))
}

/// Read a suite previously written by [`export_json`].
///
/// Strict: unknown `test_type`/`priority` values are rejected, unlike the
/// lenient model-output path in [`crate::normalize`].
pub fn import_json(path: &Path) -> Result<TestSuite, StorycaseError> {
    let body = fs::read_to_string(path).map_err(|e| StorycaseError::io(path, e))?;
    serde_json::from_str(&body).map_err(|e| {
        StorycaseError::io(path, std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
