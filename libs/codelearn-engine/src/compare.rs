//! Output comparison: exact match after normalization first, similarity
//! above [`SIMILARITY_THRESHOLD`] as fallback. Containment of the expected
//! string is computed only for messaging when the strict checks fail.

use codelearn_common::types::OutputComparison;

use crate::similarity::similarity;

/// Similarity strictly above this passes an approximate match.
pub const SIMILARITY_THRESHOLD: f64 = 0.85;

/// Normalize output for comparison: trim, collapse whitespace, lowercase.
pub fn normalize_output(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Compare actual output with expected output.
pub fn compare_output(actual: &str, expected: &str) -> OutputComparison {
    let normalized_actual = normalize_output(actual);
    let normalized_expected = normalize_output(expected);

    let exact_match = normalized_actual == normalized_expected;
    let contains_match = normalized_actual.contains(&normalized_expected);
    let score = similarity(&normalized_actual, &normalized_expected);

    let passed = exact_match || score > SIMILARITY_THRESHOLD;
    let mut messages = Vec::new();

    if exact_match {
        messages.push("✓ Output matches expected result exactly".to_string());
    } else if score > SIMILARITY_THRESHOLD {
        messages.push(format!("✓ Output matches with {:.1}% similarity", score * 100.0));
    } else if contains_match {
        messages.push("⚠ Output contains expected result but has extra content".to_string());
    } else {
        messages.push(format!("✗ Output does not match. Similarity: {:.1}%", score * 100.0));
        messages.push(format!("  Expected: \"{}\"", normalized_expected));
        messages.push(format!("  Got: \"{}\"", normalized_actual));
    }

    OutputComparison {
        passed,
        similarity: score,
        exact_match,
        messages,
        normalized_actual,
        normalized_expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_and_lowercases() {
        assert_eq!(normalize_output("  Hello   World  "), "hello world");
        assert_eq!(normalize_output("a\tb\n\nc"), "a b c");
        assert_eq!(normalize_output(""), "");
        assert_eq!(normalize_output("   "), "");
    }

    #[test]
    fn test_exact_match_after_normalization() {
        let result = compare_output("  Hello   World  ", "hello world");
        assert!(result.exact_match);
        assert!(result.passed);
        assert_eq!(result.similarity, 1.0);
        assert_eq!(result.messages, vec!["✓ Output matches expected result exactly"]);
    }

    #[test]
    fn test_cat_hat_below_threshold() {
        let result = compare_output("cat", "hat");
        assert!(!result.exact_match);
        assert!(!result.passed);
        assert!((result.similarity - 2.0 / 3.0).abs() < 1e-9);
        // Failure messages include the diagnostic pair.
        assert!(result.messages.iter().any(|m| m.contains("Expected: \"hat\"")));
        assert!(result.messages.iter().any(|m| m.contains("Got: \"cat\"")));
    }

    #[test]
    fn test_high_similarity_passes_without_exact_match() {
        // One substitution across a long string stays above 0.85.
        let result = compare_output("the quick brown fox jumps", "the quick brown fox jumpz");
        assert!(!result.exact_match);
        assert!(result.passed);
        assert!(result.messages[0].contains("% similarity"));
    }

    #[test]
    fn test_containment_hint_when_extra_content() {
        let result = compare_output(
            "debug line one\ndebug line two\ndebug line three\n42",
            "42",
        );
        assert!(!result.passed);
        assert!(result
            .messages
            .iter()
            .any(|m| m.contains("extra content")));
    }

    #[test]
    fn test_both_empty_passes() {
        let result = compare_output("", "");
        assert!(result.exact_match);
        assert!(result.passed);
    }
}
