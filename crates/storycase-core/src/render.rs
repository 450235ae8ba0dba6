use std::fmt::Write;

use crate::test_case::{TestCase, TestSuite};

const RULE_WIDTH: usize = 80;

/// Render a suite as plain console text.
///
/// Pure: the same suite always renders to the same string.
pub fn render_suite(suite: &TestSuite) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(out, "USER STORY");
    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(out, "{}", suite.user_story.trim());
    let _ = writeln!(out);

    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(
        out,
        "GENERATED TEST CASES ({} {})",
        suite.len(),
        if suite.len() == 1 { "case" } else { "cases" }
    );
    let _ = writeln!(out, "{heavy}");

    for tc in &suite.test_cases {
        let _ = writeln!(out);
        render_case(&mut out, tc);
        let _ = writeln!(out, "{light}");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "COVERAGE SUMMARY");
    let _ = writeln!(out, "{heavy}");
    let _ = writeln!(out, "{}", suite.coverage_summary);
    let _ = writeln!(out, "{heavy}");
    out
}

fn render_case(out: &mut String, tc: &TestCase) {
    let _ = writeln!(out, "[{}] {}", tc.id, tc.title);
    let _ = writeln!(out, "Type: {} | Priority: {}", tc.test_type, tc.priority);
    let _ = writeln!(out);
    let _ = writeln!(out, "Description: {}", tc.description);

    if !tc.preconditions.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Preconditions:");
        for pre in &tc.preconditions {
            let _ = writeln!(out, "  • {pre}");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Steps:");
    for (i, step) in tc.steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. {step}", i + 1);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Expected Result: {}", tc.expected_result);
}
