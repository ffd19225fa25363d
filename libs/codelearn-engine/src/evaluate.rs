//! Evaluation orchestrator.
//!
//! Drives one submission through the stage machine
//! `StructuralCheck -> Execute -> {TestCases | OutputCheck | Skip} -> Aggregate`
//! and always hands the caller a well-formed `EvaluationResult`.
//!
//! Scoring policy (fixed contract):
//! 1. Structure check: feedback entry, 0 points
//! 2. Execution failure: -20 ("Execution Error")
//! 3. Execution success: +10 ("Code Execution")
//! 4. Test cases configured: round(pass_rate_percent / 10) points,
//!    category passed iff every case passed ("Test Cases")
//! 5. Otherwise, single expected output: +30 on match, -15 on mismatch
//!    ("Output Verification")
//!
//! Final score clamped to 0..=100; overall pass at 70.
//!
//! Malformed caller patterns surface as `ConfigError` before any stage
//! runs (a setup failure, never scored). The pipeline itself runs on a
//! spawned task; should it ever panic, the panic is absorbed and reported
//! as an "Evaluation Error" feedback entry instead of unwinding into the
//! caller.

use codelearn_common::types::{
    EvaluationConfig, EvaluationDetails, EvaluationResult, ExecutionResult, TestCaseResult,
};
use tracing::{info, instrument};

use crate::compare::compare_output;
use crate::config::{ConfigError, ValidatedConfig};
use crate::feedback::Scorecard;
use crate::sandbox;
use crate::structure::analyze_structure;
use crate::testcases::run_test_cases;

const POINTS_EXECUTION_SUCCESS: i32 = 10;
const PENALTY_EXECUTION_ERROR: i32 = -20;
const POINTS_OUTPUT_MATCH: i32 = 30;
const PENALTY_OUTPUT_MISMATCH: i32 = -15;

/// Evaluate a submission. The sole entry point of the engine.
///
/// Returns `Err` only for configuration errors (malformed patterns); every
/// property of the submission itself, including crashes and timeouts,
/// resolves into an `Ok` result.
#[instrument(skip(code, config), fields(language = %config.language, source_len = code.len()))]
pub async fn evaluate(
    code: &str,
    config: &EvaluationConfig,
) -> Result<EvaluationResult, ConfigError> {
    let validated = ValidatedConfig::compile(config)?;
    let code = code.to_string();

    match tokio::spawn(run_pipeline(code, validated)).await {
        Ok(result) => Ok(result),
        Err(fault) => {
            // A stage panicked. Contain it: the caller still receives a
            // result, with the fault recorded instead of a verdict.
            let message = format!("Evaluation pipeline fault: {}", fault);
            let mut scorecard = Scorecard::new();
            scorecard.add_feedback("Evaluation Error", vec![message.clone()], false, 0);
            Ok(EvaluationResult {
                passed: false,
                score: scorecard.final_score(),
                feedback: scorecard.into_entries(),
                details: EvaluationDetails::default(),
                execution: ExecutionResult::failure(message),
            })
        }
    }
}

/// Forward-only stage pipeline. Owns its scorecard; no state survives the
/// call, so concurrent evaluations never interact.
async fn run_pipeline(code: String, config: ValidatedConfig) -> EvaluationResult {
    let mut scorecard = Scorecard::new();
    let mut details = EvaluationDetails::default();

    // Stage 1: static structure analysis, before and independent of
    // execution.
    let structure = analyze_structure(&code, &config.structure, &config.forbidden);
    let mut structure_feedback = structure.messages.clone();
    structure_feedback.extend(structure.issues.iter().map(|issue| format!("✗ {}", issue)));
    scorecard.add_feedback("Structure Check", structure_feedback, structure.passed, 0);
    details.structure_check = structure;

    // Stage 2: sandboxed execution.
    let execution = sandbox::execute(&code, config.time_limit_ms, config.max_output_len).await;

    if !execution.success {
        let error = execution
            .error
            .clone()
            .unwrap_or_else(|| "Unknown execution error".to_string());
        scorecard.add_feedback("Execution Error", vec![error], false, PENALTY_EXECUTION_ERROR);
    } else {
        scorecard.add_feedback(
            "Code Execution",
            vec!["Code executed successfully".to_string()],
            true,
            POINTS_EXECUTION_SUCCESS,
        );

        // Stage 3: verification against test cases, or a single expected
        // output, or nothing at all.
        if !config.test_cases.is_empty() {
            let results =
                run_test_cases(&execution.output, &config.test_cases, &config.compiled_tests);
            record_test_results(&mut scorecard, &results);
            details.test_cases = results;
        } else if let Some(expected) =
            config.expected_output.as_deref().filter(|s| !s.is_empty())
        {
            let comparison = compare_output(&execution.output, expected);
            let points = if comparison.passed {
                POINTS_OUTPUT_MATCH
            } else {
                PENALTY_OUTPUT_MISMATCH
            };
            scorecard.add_feedback(
                "Output Verification",
                comparison.messages.clone(),
                comparison.passed,
                points,
            );
            details.output_check = Some(comparison);
        }
    }

    let score = scorecard.final_score();
    let passed = scorecard.passed();
    info!(
        score,
        passed,
        execution_success = execution.success,
        execution_ms = execution.execution_time_ms,
        "Evaluation completed"
    );

    EvaluationResult {
        passed,
        score,
        feedback: scorecard.into_entries(),
        details,
        execution,
    }
}

/// Fold test case results into one feedback entry with pass-rate points.
fn record_test_results(scorecard: &mut Scorecard, results: &[TestCaseResult]) {
    let total = results.len();
    let passed_count = results.iter().filter(|r| r.passed).count();

    let messages = results
        .iter()
        .map(|r| {
            format!(
                "Test {}: {} - {}",
                r.test_number,
                if r.passed { "✓ PASS" } else { "✗ FAIL" },
                r.message
            )
        })
        .collect();

    scorecard.add_feedback(
        "Test Cases",
        messages,
        passed_count == total,
        test_case_points(passed_count, total),
    );
}

/// Points contributed by the test-case stage: round(pass_rate_percent / 10),
/// 0..=10.
fn test_case_points(passed_count: usize, total: usize) -> i32 {
    if total == 0 {
        return 0;
    }
    let pass_percentage = passed_count as f64 / total as f64 * 100.0;
    (pass_percentage / 10.0).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_follow_pass_rate_rounding() {
        // 3 of 4 -> 75% -> round(7.5) = 8.
        assert_eq!(test_case_points(3, 4), 8);
        assert_eq!(test_case_points(4, 4), 10);
        assert_eq!(test_case_points(0, 4), 0);
        assert_eq!(test_case_points(1, 3), 3);
        assert_eq!(test_case_points(2, 3), 7);
    }

    #[test]
    fn test_no_cases_no_points() {
        assert_eq!(test_case_points(0, 0), 0);
    }
}
