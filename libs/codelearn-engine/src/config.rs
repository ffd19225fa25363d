/// Configuration Validation
///
/// **Core Responsibility:**
/// Compile every caller-supplied pattern (forbidden structure patterns,
/// regex test cases) exactly once, before any evaluation stage runs.
///
/// A malformed pattern is a setup failure, not a grading outcome: it
/// surfaces as `ConfigError` to the caller of `evaluate` and is never
/// scored against the submission. Patterns are never compiled
/// per-evaluation and never sourced from submitted code.

use codelearn_common::types::{EvaluationConfig, StructureRequirements, TestCase, TestCaseKind};
use regex::Regex;
use thiserror::Error;

/// Setup failure: the evaluation configuration itself is malformed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid forbidden pattern `{pattern}`: {source}")]
    InvalidForbiddenPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("invalid regex pattern in test case {test_number}: {source}")]
    InvalidTestPattern {
        /// 1-based position of the offending case.
        test_number: usize,
        source: regex::Error,
    },
}

/// An `EvaluationConfig` with all user-supplied patterns compiled.
/// Owns its data so the evaluation pipeline can run on a spawned task.
#[derive(Debug)]
pub struct ValidatedConfig {
    pub language: String,
    pub test_cases: Vec<TestCase>,
    /// Parallel to `test_cases`: `Some` for every `regex` case.
    pub compiled_tests: Vec<Option<Regex>>,
    pub expected_output: Option<String>,
    pub structure: StructureRequirements,
    /// Compiled counterparts of `structure.forbidden_patterns`, in order.
    pub forbidden: Vec<Regex>,
    pub time_limit_ms: u64,
    pub max_output_len: usize,
}

impl ValidatedConfig {
    /// Validate and compile a configuration.
    pub fn compile(config: &EvaluationConfig) -> Result<Self, ConfigError> {
        let forbidden = config
            .structure_checks
            .forbidden_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ConfigError::InvalidForbiddenPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let compiled_tests = config
            .test_cases
            .iter()
            .enumerate()
            .map(|(index, case)| match case.kind {
                TestCaseKind::Regex => Regex::new(&case.expected)
                    .map(Some)
                    .map_err(|source| ConfigError::InvalidTestPattern {
                        test_number: index + 1,
                        source,
                    }),
                _ => Ok(None),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            language: config.language.clone(),
            test_cases: config.test_cases.clone(),
            compiled_tests,
            expected_output: config.expected_output.clone(),
            structure: config.structure_checks.clone(),
            forbidden,
            time_limit_ms: config.time_limit_ms,
            max_output_len: config.max_output_len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let validated = ValidatedConfig::compile(&EvaluationConfig::default()).unwrap();
        assert!(validated.forbidden.is_empty());
        assert!(validated.compiled_tests.is_empty());
        assert_eq!(validated.time_limit_ms, 5000);
    }

    #[test]
    fn test_forbidden_patterns_compiled_in_order() {
        let mut config = EvaluationConfig::default();
        config.structure_checks.forbidden_patterns =
            vec![r"eval\s*\(".to_string(), "XMLHttpRequest".to_string()];

        let validated = ValidatedConfig::compile(&config).unwrap();
        assert_eq!(validated.forbidden.len(), 2);
        assert_eq!(validated.forbidden[0].as_str(), r"eval\s*\(");
    }

    #[test]
    fn test_malformed_forbidden_pattern_is_config_error() {
        let mut config = EvaluationConfig::default();
        config.structure_checks.forbidden_patterns = vec!["[unclosed".to_string()];

        let err = ValidatedConfig::compile(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidForbiddenPattern { .. }));
        assert!(err.to_string().contains("[unclosed"));
    }

    #[test]
    fn test_malformed_regex_test_case_reports_position() {
        let mut config = EvaluationConfig::default();
        config.test_cases = vec![
            TestCase {
                kind: TestCaseKind::Contains,
                expected: "fine".to_string(),
                input: None,
            },
            TestCase {
                kind: TestCaseKind::Regex,
                expected: "(broken".to_string(),
                input: None,
            },
        ];

        let err = ValidatedConfig::compile(&config).unwrap_err();
        match err {
            ConfigError::InvalidTestPattern { test_number, .. } => assert_eq!(test_number, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_regex_cases_not_compiled() {
        let mut config = EvaluationConfig::default();
        config.test_cases = vec![TestCase {
            kind: TestCaseKind::Contains,
            // Would be an invalid regex, but contains cases are verbatim.
            expected: "(unbalanced".to_string(),
            input: None,
        }];

        let validated = ValidatedConfig::compile(&config).unwrap();
        assert_eq!(validated.compiled_tests.len(), 1);
        assert!(validated.compiled_tests[0].is_none());
    }
}
