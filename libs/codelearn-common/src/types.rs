use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Engine-wide defaults. The API and CLI share these so a submission
/// evaluated over HTTP and one evaluated locally behave identically.
pub const DEFAULT_TIME_LIMIT_MS: u64 = 5000;
pub const DEFAULT_MAX_OUTPUT_LEN: usize = 10_000;

/// Minimum trimmed source length considered a real submission.
pub const MIN_MEANINGFUL_CODE_LEN: usize = 20;

/// Final score at or above this value is a passing submission.
pub const PASSING_SCORE: u32 = 70;

/// Per-submission evaluation configuration.
///
/// Constructed fresh for every submission and never mutated afterwards.
/// Every recognized option is enumerated here with an explicit default:
/// no duck-typed option merging, no hidden engine state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Informational only; the engine executes JavaScript.
    #[serde(default = "default_language")]
    pub language: String,

    /// Typed assertions applied to the captured output.
    /// When non-empty, `expected_output` is ignored.
    #[serde(default)]
    pub test_cases: Vec<TestCase>,

    /// Single expected output, used only when `test_cases` is empty.
    #[serde(default)]
    pub expected_output: Option<String>,

    #[serde(default)]
    pub structure_checks: StructureRequirements,

    /// Wall-clock deadline for the execution stage.
    #[serde(default = "default_time_limit_ms")]
    pub time_limit_ms: u64,

    /// Captured output is truncated beyond this many characters.
    #[serde(default = "default_max_output_len")]
    pub max_output_len: usize,
}

fn default_language() -> String {
    "javascript".to_string()
}

fn default_time_limit_ms() -> u64 {
    DEFAULT_TIME_LIMIT_MS
}

fn default_max_output_len() -> usize {
    DEFAULT_MAX_OUTPUT_LEN
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            test_cases: Vec::new(),
            expected_output: None,
            structure_checks: StructureRequirements::default(),
            time_limit_ms: DEFAULT_TIME_LIMIT_MS,
            max_output_len: DEFAULT_MAX_OUTPUT_LEN,
        }
    }
}

/// Static structure requirements checked without executing the code.
/// All flags default to false (no requirement).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureRequirements {
    #[serde(default)]
    pub requires_functions: bool,
    #[serde(default)]
    pub requires_comments: bool,
    #[serde(default)]
    pub requires_variables: bool,
    #[serde(default)]
    pub requires_conditionals: bool,
    #[serde(default)]
    pub requires_loops: bool,
    /// Regex source strings; a match fails the structure check.
    /// Compiled once at configuration validation time.
    #[serde(default)]
    pub forbidden_patterns: Vec<String>,
}

/// Assertion mode of a test case.
///
/// Unrecognized wire values deserialize to `Unknown` and are skipped by
/// the runner rather than rejected at the transport boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestCaseKind {
    Output,
    Contains,
    Regex,
    #[serde(other)]
    Unknown,
}

/// One typed assertion against the submission's captured output.
///
/// `input` is reporting-only: the engine executes the submission once and
/// evaluates every case against that single captured output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(rename = "type")]
    pub kind: TestCaseKind,
    pub expected: String,
    #[serde(default)]
    pub input: Option<String>,
}

/// Outcome of the sandboxed execution stage.
/// Produced exactly once per evaluation and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub success: bool,
    /// Captured print output, possibly truncated with a marker appended.
    pub output: String,
    pub error: Option<String>,
    pub execution_time_ms: u64,
}

impl ExecutionResult {
    /// Failure result that never ran (spawn error, oversized source).
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: Some(error.into()),
            execution_time_ms: 0,
        }
    }
}

/// One categorized, pass/fail-tagged unit of the evaluation report.
/// Entries accumulate in call order and are never reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub category: String,
    pub passed: bool,
    pub messages: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Result of the static structure analysis stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureResult {
    pub passed: bool,
    pub issues: Vec<String>,
    pub messages: Vec<String>,
    pub details: StructureDetails,
}

/// Raw measured facts about the source text, reported regardless of which
/// requirements were enabled (post-hoc analytics).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureDetails {
    pub code_length: usize,
    pub has_comments: bool,
    pub has_functions: bool,
    pub has_variables: bool,
}

/// Result of comparing actual vs. expected output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputComparison {
    pub passed: bool,
    pub similarity: f64,
    pub exact_match: bool,
    pub messages: Vec<String>,
    pub normalized_actual: String,
    pub normalized_expected: String,
}

/// Result of a single test case, order preserved from the configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCaseResult {
    /// 1-based position in the configured sequence.
    pub test_number: u32,
    /// Reported input, or "N/A" when the case carried none.
    pub input: String,
    pub expected: String,
    pub passed: bool,
    pub message: String,
    pub similarity: f64,
}

/// Per-stage sub-results retained for diagnostics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationDetails {
    pub structure_check: StructureResult,
    pub output_check: Option<OutputComparison>,
    pub test_cases: Vec<TestCaseResult>,
}

/// Top-level evaluation outcome returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// True iff `score >= PASSING_SCORE`.
    pub passed: bool,
    /// Clamped to 0..=100.
    pub score: u32,
    pub feedback: Vec<FeedbackEntry>,
    pub details: EvaluationDetails,
    pub execution: ExecutionResult,
}
