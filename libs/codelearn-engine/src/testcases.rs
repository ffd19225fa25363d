//! Typed test cases applied, in order, to the single captured output of
//! one execution. `output` delegates to the comparator, `contains` is a
//! verbatim substring, `regex` matches a precompiled pattern anywhere in
//! the raw output, and unrecognized kinds are recorded as skipped. This
//! stage never compiles caller-supplied patterns.

use codelearn_common::types::{TestCase, TestCaseKind, TestCaseResult};
use regex::Regex;

use crate::compare::compare_output;

/// Run all configured test cases against the captured output.
///
/// `compiled` must parallel `cases`: `Some` for every `regex` case, as
/// produced by configuration validation.
pub fn run_test_cases(
    output: &str,
    cases: &[TestCase],
    compiled: &[Option<Regex>],
) -> Vec<TestCaseResult> {
    cases
        .iter()
        .enumerate()
        .map(|(index, case)| {
            let mut result = TestCaseResult {
                test_number: (index + 1) as u32,
                input: case.input.clone().unwrap_or_else(|| "N/A".to_string()),
                expected: case.expected.clone(),
                passed: false,
                message: String::new(),
                similarity: 0.0,
            };

            match case.kind {
                TestCaseKind::Output => {
                    let comparison = compare_output(output, &case.expected);
                    result.passed = comparison.passed;
                    result.similarity = comparison.similarity;
                    result.message = comparison.messages.join("; ");
                }
                TestCaseKind::Contains => {
                    result.passed = output.contains(&case.expected);
                    result.message = if result.passed {
                        format!("Output contains expected text: \"{}\"", case.expected)
                    } else {
                        format!("Output does not contain expected text: \"{}\"", case.expected)
                    };
                }
                TestCaseKind::Regex => {
                    // Validation guarantees a compiled pattern is present.
                    if let Some(regex) = compiled.get(index).and_then(|r| r.as_ref()) {
                        result.passed = regex.is_match(output);
                        result.message = if result.passed {
                            format!("Output matches pattern: {}", case.expected)
                        } else {
                            format!("Output does not match pattern: {}", case.expected)
                        };
                    } else {
                        result.message =
                            format!("Skipped: pattern was not compiled: {}", case.expected);
                    }
                }
                TestCaseKind::Unknown => {
                    result.message = "Skipped: unrecognized test case type".to_string();
                }
            }

            result
        })
        .collect()
}
