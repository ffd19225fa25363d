// HTTP route handlers for the CodeLearn API

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use codelearn_common::problems;
use codelearn_common::types::{
    EvaluationConfig, EvaluationResult, StructureRequirements, TestCase, DEFAULT_TIME_LIMIT_MS,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::metrics;
use crate::AppState;

/// JSON submission envelope.
///
/// When `problem_id` is present the grading configuration is derived from
/// the catalog record and the ad-hoc expectation fields are ignored.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub code: String,
    #[serde(default)]
    pub problem_id: Option<u32>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub expected_output: Option<String>,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    #[serde(default)]
    pub structure_checks: Option<StructureRequirements>,
    #[serde(default = "default_timeout")]
    pub time_limit_ms: u64,
}

fn default_language() -> String {
    "javascript".to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIME_LIMIT_MS
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub submission_id: Uuid,
    pub problem_id: Option<u32>,
    pub result: EvaluationResult,
    /// Human-readable rendering of `result` for direct display.
    pub report: String,
}

/// One line of the transient session history.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionRecord {
    pub submission_id: Uuid,
    pub problem_id: Option<u32>,
    pub language: String,
    pub score: u32,
    pub passed: bool,
    pub submitted_at: DateTime<Utc>,
}

/// Catalog summary row for the problem list.
#[derive(Debug, Serialize)]
pub struct ProblemSummary {
    pub id: u32,
    pub title: String,
    pub difficulty: codelearn_common::problems::Difficulty,
    pub category: String,
}

/// POST /api/submit - Evaluate a submission
pub async fn submit_code(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SubmitRequest>,
) -> impl IntoResponse {
    let submission_id = Uuid::new_v4();
    metrics::SUBMISSIONS_TOTAL.inc();

    let config = match payload.problem_id {
        Some(id) => match problems::find(id) {
            Some(problem) => problem.evaluation_config(payload.time_limit_ms),
            None => {
                return (
                    StatusCode::NOT_FOUND,
                    Json(serde_json::json!({
                        "error": format!("Unknown problem id: {}", id)
                    })),
                )
                    .into_response();
            }
        },
        None => EvaluationConfig {
            language: payload.language.clone(),
            test_cases: payload.test_cases.clone(),
            expected_output: payload.expected_output.clone(),
            structure_checks: payload.structure_checks.clone().unwrap_or_default(),
            time_limit_ms: payload.time_limit_ms,
            ..Default::default()
        },
    };

    let result = match codelearn_engine::evaluate(&payload.code, &config).await {
        Ok(result) => result,
        Err(e) => {
            // Setup failure, not a graded outcome.
            metrics::SETUP_ERRORS_TOTAL.inc();
            error!(submission_id = %submission_id, error = %e, "Invalid evaluation configuration");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({
                    "error": format!("Invalid evaluation configuration: {}", e)
                })),
            )
                .into_response();
        }
    };

    if result.passed {
        metrics::SUBMISSIONS_PASSED.inc();
    }

    info!(
        submission_id = %submission_id,
        problem_id = ?payload.problem_id,
        score = result.score,
        passed = result.passed,
        execution_ms = result.execution.execution_time_ms,
        "Submission evaluated"
    );

    let record = SubmissionRecord {
        submission_id,
        problem_id: payload.problem_id,
        language: payload.language.clone(),
        score: result.score,
        passed: result.passed,
        submitted_at: Utc::now(),
    };
    state.history.lock().await.push(record);

    let report = codelearn_engine::report::format_result(&result);

    (
        StatusCode::OK,
        Json(SubmitResponse {
            submission_id,
            problem_id: payload.problem_id,
            result,
            report,
        }),
    )
        .into_response()
}

/// GET /api/problems - Catalog summaries
pub async fn list_problems() -> impl IntoResponse {
    let summaries: Vec<ProblemSummary> = problems::catalog()
        .into_iter()
        .map(|p| ProblemSummary {
            id: p.id,
            title: p.title,
            difficulty: p.difficulty,
            category: p.category,
        })
        .collect();

    (StatusCode::OK, Json(summaries))
}

/// GET /api/problems/{id} - Full problem record
///
/// Reference test cases and the sample solution are skipped during
/// serialization; submitters never see them.
pub async fn get_problem(Path(id): Path<u32>) -> impl IntoResponse {
    match problems::find(id) {
        Some(problem) => (StatusCode::OK, Json(problem)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": format!("Unknown problem id: {}", id)
            })),
        )
            .into_response(),
    }
}

/// GET /api/results - Transient session history, insertion order
pub async fn session_results(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let history = state.history.lock().await;
    (StatusCode::OK, Json(history.clone()))
}

/// GET /status - Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /metrics - Prometheus text exposition
pub async fn metrics_exposition() -> impl IntoResponse {
    match metrics::exposition() {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics unavailable").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_request_defaults() {
        let req: SubmitRequest =
            serde_json::from_str(r#"{"code": "console.log(1);"}"#).unwrap();
        assert_eq!(req.language, "javascript");
        assert_eq!(req.time_limit_ms, DEFAULT_TIME_LIMIT_MS);
        assert!(req.problem_id.is_none());
        assert!(req.test_cases.is_empty());
    }
}
