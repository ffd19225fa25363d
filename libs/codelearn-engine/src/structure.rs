//! Static structure analysis: required and forbidden syntactic constructs,
//! checked on the source text without executing it. Construct recognizers
//! are fixed engine patterns compiled once; forbidden patterns arrive
//! precompiled from configuration validation. Empty and too-short
//! submissions fail unconditionally.

use codelearn_common::types::{
    StructureDetails, StructureRequirements, StructureResult, MIN_MEANINGFUL_CODE_LEN,
};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Named function declarations, function-valued consts, arrow functions.
    static ref FUNCTION_PATTERN: Regex =
        Regex::new(r"function\s+\w+\s*\(|const\s+\w+\s*=\s*\(|=>").expect("valid pattern");
    /// Line or block comment markers.
    static ref COMMENT_PATTERN: Regex = Regex::new(r"//|/\*").expect("valid pattern");
    static ref VARIABLE_PATTERN: Regex =
        Regex::new(r"const\s+\w+|let\s+\w+|var\s+\w+").expect("valid pattern");
    static ref CONDITIONAL_PATTERN: Regex =
        Regex::new(r"if\s*\(|switch\s*\(").expect("valid pattern");
    /// Loop statements and the common iteration methods.
    static ref LOOP_PATTERN: Regex =
        Regex::new(r"for\s*\(|while\s*\(|forEach|map\s*\(|reduce\s*\(").expect("valid pattern");

    // Broader probes used for the details block only.
    static ref ANY_FUNCTION: Regex = Regex::new(r"function|=>").expect("valid pattern");
    static ref ANY_VARIABLE: Regex = Regex::new(r"const|let|var").expect("valid pattern");
}

/// Analyze code structure against the configured requirements.
///
/// `forbidden` must be the compiled counterparts of
/// `requirements.forbidden_patterns`, in the same order.
pub fn analyze_structure(
    code: &str,
    requirements: &StructureRequirements,
    forbidden: &[Regex],
) -> StructureResult {
    let mut result = StructureResult {
        passed: true,
        ..Default::default()
    };

    let mut require = |enabled: bool, pattern: &Regex, present: &str, missing: &str| {
        if !enabled {
            return;
        }
        if pattern.is_match(code) {
            result.messages.push(format!("✓ {}", present));
        } else {
            result.issues.push(missing.to_string());
            result.passed = false;
        }
    };

    require(
        requirements.requires_functions,
        &FUNCTION_PATTERN,
        "Contains function definitions",
        "Missing function definitions",
    );
    require(
        requirements.requires_comments,
        &COMMENT_PATTERN,
        "Contains comments",
        "Missing comments or documentation",
    );
    require(
        requirements.requires_variables,
        &VARIABLE_PATTERN,
        "Contains variable declarations",
        "Missing variable declarations",
    );
    require(
        requirements.requires_conditionals,
        &CONDITIONAL_PATTERN,
        "Contains conditional statements",
        "Missing conditional statements",
    );
    require(
        requirements.requires_loops,
        &LOOP_PATTERN,
        "Contains loop structures",
        "Missing loop structures",
    );

    for regex in forbidden {
        if regex.is_match(code) {
            result.issues.push(format!("Forbidden pattern detected: {}", regex.as_str()));
            result.passed = false;
        }
    }

    // Basic submission sanity, applied unconditionally.
    let code_length = code.trim().len();
    if code_length == 0 {
        result.issues.push("Code is empty".to_string());
        result.passed = false;
    } else if code_length < MIN_MEANINGFUL_CODE_LEN {
        result.issues.push("Code is too short to be meaningful".to_string());
        result.passed = false;
    } else {
        result
            .messages
            .push(format!("✓ Code length is adequate ({} characters)", code_length));
    }

    result.details = StructureDetails {
        code_length,
        has_comments: COMMENT_PATTERN.is_match(code),
        has_functions: ANY_FUNCTION.is_match(code),
        has_variables: ANY_VARIABLE.is_match(code),
    };

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_requirements() -> StructureRequirements {
        StructureRequirements {
            requires_functions: true,
            requires_comments: true,
            requires_variables: true,
            requires_conditionals: true,
            requires_loops: true,
            forbidden_patterns: Vec::new(),
        }
    }

    #[test]
    fn test_empty_code_fails_with_both_issues() {
        let requirements = StructureRequirements {
            requires_functions: true,
            ..Default::default()
        };
        let result = analyze_structure("", &requirements, &[]);

        assert!(!result.passed);
        assert!(result.issues.iter().any(|i| i == "Code is empty"));
        assert!(result.issues.iter().any(|i| i == "Missing function definitions"));
        assert_eq!(result.details.code_length, 0);
    }

    #[test]
    fn test_too_short_code_flagged() {
        let result = analyze_structure("let x=1;", &StructureRequirements::default(), &[]);
        assert!(!result.passed);
        assert!(result.issues.iter().any(|i| i.contains("too short")));
    }

    #[test]
    fn test_complete_submission_passes_all_five() {
        let code = "function f(){ // ok \n let x=1; if(x){} for(;;){} }";
        let result = analyze_structure(code, &all_requirements(), &[]);

        assert!(result.passed, "issues: {:?}", result.issues);
        assert!(result.issues.is_empty());
        let construct_messages = result
            .messages
            .iter()
            .filter(|m| m.contains("Contains"))
            .count();
        assert_eq!(construct_messages, 5);
    }

    #[test]
    fn test_arrow_function_recognized() {
        let code = "const add = (a, b) => a + b; console.log(add(1, 2));";
        let requirements = StructureRequirements {
            requires_functions: true,
            ..Default::default()
        };
        let result = analyze_structure(code, &requirements, &[]);
        assert!(result.passed);
    }

    #[test]
    fn test_forbidden_pattern_fails() {
        let code = "function f() { eval('1 + 1'); } console.log(f());";
        let forbidden = vec![Regex::new(r"eval\s*\(").unwrap()];
        let result = analyze_structure(code, &StructureRequirements::default(), &forbidden);

        assert!(!result.passed);
        assert!(result.issues.iter().any(|i| i.contains("Forbidden pattern")));
    }

    #[test]
    fn test_details_reported_without_requirements() {
        let code = "// sum\nconst total = [1,2].reduce((a, b) => a + b, 0);";
        let result = analyze_structure(code, &StructureRequirements::default(), &[]);

        assert!(result.passed);
        assert!(result.details.has_comments);
        assert!(result.details.has_functions);
        assert!(result.details.has_variables);
        assert_eq!(result.details.code_length, code.trim().len());
    }

    #[test]
    fn test_missing_loops_reported() {
        let code = "function f(x) { if (x) { return 1; } return 0; } // no loop here";
        let requirements = StructureRequirements {
            requires_loops: true,
            ..Default::default()
        };
        let result = analyze_structure(code, &requirements, &[]);
        assert!(!result.passed);
        assert_eq!(result.issues, vec!["Missing loop structures"]);
    }
}
