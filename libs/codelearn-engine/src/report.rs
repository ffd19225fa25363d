//! Plain-text rendering of an `EvaluationResult`. Section order (banner,
//! feedback blocks, captured output, execution error) is part of the
//! display contract.

use codelearn_common::types::EvaluationResult;

const RULE_HEAVY: &str =
    "============================================================";
const RULE_LIGHT: &str =
    "------------------------------------------------------------";

/// Render an evaluation result for human display.
pub fn format_result(result: &EvaluationResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", RULE_HEAVY));
    out.push_str("EVALUATION RESULTS\n");
    out.push_str(&format!("{}\n\n", RULE_HEAVY));

    out.push_str(&format!(
        "STATUS: {}\n",
        if result.passed { "✓ PASSED" } else { "✗ FAILED" }
    ));
    out.push_str(&format!("SCORE: {}/100\n\n", result.score));

    out.push_str("FEEDBACK:\n");
    out.push_str(&format!("{}\n", RULE_LIGHT));

    for entry in &result.feedback {
        out.push_str(&format!(
            "\n[{}] {}\n",
            entry.category,
            if entry.passed { "✓" } else { "✗" }
        ));
        for message in &entry.messages {
            out.push_str(&format!("  {}\n", message));
        }
    }

    out.push_str(&format!("\n{}\n", RULE_HEAVY));

    if !result.execution.output.is_empty() {
        out.push_str("\nCODE OUTPUT:\n");
        out.push_str(&format!("{}\n", RULE_LIGHT));
        out.push_str(&format!("{}\n", result.execution.output));
        out.push_str(&format!("{}\n", RULE_LIGHT));
    }

    if let Some(error) = &result.execution.error {
        out.push_str("\nEXECUTION ERROR:\n");
        out.push_str(&format!("{}\n", error));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use codelearn_common::types::{
        EvaluationDetails, ExecutionResult, FeedbackEntry,
    };

    fn sample_result() -> EvaluationResult {
        EvaluationResult {
            passed: false,
            score: 40,
            feedback: vec![
                FeedbackEntry {
                    category: "Structure Check".to_string(),
                    passed: true,
                    messages: vec!["✓ Code length is adequate (42 characters)".to_string()],
                    timestamp: Utc::now(),
                },
                FeedbackEntry {
                    category: "Output Verification".to_string(),
                    passed: false,
                    messages: vec!["✗ Output does not match. Similarity: 12.0%".to_string()],
                    timestamp: Utc::now(),
                },
            ],
            details: EvaluationDetails::default(),
            execution: ExecutionResult {
                success: true,
                output: "hello".to_string(),
                error: None,
                execution_time_ms: 12,
            },
        }
    }

    #[test]
    fn test_report_sections_in_order() {
        let report = format_result(&sample_result());

        let status = report.find("STATUS: ✗ FAILED").expect("status line");
        let score = report.find("SCORE: 40/100").expect("score line");
        let feedback = report.find("FEEDBACK:").expect("feedback header");
        let output = report.find("CODE OUTPUT:").expect("output section");

        assert!(status < score && score < feedback && feedback < output);
    }

    #[test]
    fn test_feedback_blocks_list_messages() {
        let report = format_result(&sample_result());
        assert!(report.contains("[Structure Check] ✓"));
        assert!(report.contains("[Output Verification] ✗"));
        assert!(report.contains("  ✓ Code length is adequate (42 characters)"));
    }

    #[test]
    fn test_error_section_rendered_when_present() {
        let mut result = sample_result();
        result.execution.error = Some("boom".to_string());
        let report = format_result(&result);
        assert!(report.contains("EXECUTION ERROR:\nboom"));
    }

    #[test]
    fn test_empty_output_omits_output_section() {
        let mut result = sample_result();
        result.execution.output.clear();
        let report = format_result(&result);
        assert!(!report.contains("CODE OUTPUT:"));
    }
}
