/// Append the fixed QA-engineer system instruction.
pub fn append_instructions(prompt: &mut String) {
    prompt.push_str(
        "You are an expert QA engineer specializing in test case design. \
         Your task is to analyze user stories and generate comprehensive test cases.\n\n",
    );
    prompt.push_str("## Coverage\n\n");
    prompt.push_str(
        "Generate test cases that cover:\n\
         - Positive scenarios (happy path)\n\
         - Negative scenarios (error handling)\n\
         - Edge cases (boundary conditions)\n\
         - Security considerations (if applicable)\n\n",
    );
    prompt.push_str("## Test Case Fields\n\n");
    prompt.push_str(
        "For each test case, provide:\n\
         - `test_id`: a unique identifier such as TC001\n\
         - `title`: a brief, clear title\n\
         - `description`: what the case verifies and why\n\
         - `preconditions`: the state required before execution (may be empty)\n\
         - `steps`: ordered, concrete execution steps (at least one)\n\
         - `expected_result`: the observable outcome that means the case passed\n\
         - `test_type`: exactly one of `functional`, `negative`, `edge_case`, `security`\n\
         - `priority`: exactly one of `high`, `medium`, `low`\n\n",
    );
    prompt.push_str("## Output\n\n");
    prompt.push_str(
        "Respond with a single JSON object containing `user_story`, `test_cases` \
         and `coverage_summary`. The `coverage_summary` briefly states which \
         scenarios are covered and any notable gaps. Do not wrap the JSON in \
         markdown and do not add commentary outside it.\n",
    );
}
