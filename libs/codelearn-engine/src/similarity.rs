//! Edit-distance similarity on a 0.0..=1.0 scale.

/// Normalized similarity: `(L - D) / L` where L is the length of the
/// longer string in Unicode scalar values and D the Levenshtein distance.
/// Two empty strings are fully similar (1.0). Symmetric in its arguments.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    let longer = a_len.max(b_len);

    if longer == 0 {
        return 1.0;
    }

    let distance = levenshtein(a, b);
    (longer - distance) as f64 / longer as f64
}

/// Levenshtein edit distance: the minimum number of single-character
/// insertions, deletions, and substitutions transforming `a` into `b`.
///
/// Standard dynamic-programming recurrence over prefix lengths, with base
/// cases equal to the prefix index. Kept as two rolling rows; `prev[j]`
/// and `curr[j-1]` correspond to `table[i-1][j]` and `table[i][j-1]`.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr: Vec<usize> = vec![0; b_chars.len() + 1];

    for (i, &ca) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j]
            } else {
                1 + prev[j].min(prev[j + 1]).min(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings_fully_similar() {
        assert_eq!(similarity("hello", "hello"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("aaaa", "aaaa"), 1.0);
    }

    #[test]
    fn test_empty_vs_non_empty() {
        assert_eq!(similarity("", "abc"), 0.0);
        assert_eq!(similarity("abc", ""), 0.0);
    }

    #[test]
    fn test_known_distances() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("cat", "hat"), 1);
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
    }

    #[test]
    fn test_cat_hat_two_thirds() {
        let s = similarity("cat", "hat");
        assert!((s - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [("kitten", "sitting"), ("abc", ""), ("120", "12O"), ("aab", "aba")];
        for (a, b) in pairs {
            assert_eq!(similarity(a, b), similarity(b, a), "asymmetric for {a:?}/{b:?}");
            assert_eq!(levenshtein(a, b), levenshtein(b, a));
        }
    }

    #[test]
    fn test_triangle_inequality() {
        let triples = [
            ("kitten", "sitting", "mitten"),
            ("", "abc", "abcdef"),
            ("aaa", "bbb", "ccc"),
            ("hello world", "helo world", "hello"),
        ];
        for (a, b, c) in triples {
            assert!(
                levenshtein(a, c) <= levenshtein(a, b) + levenshtein(b, c),
                "triangle violated for {a:?}/{b:?}/{c:?}"
            );
        }
    }

    #[test]
    fn test_repeated_characters() {
        assert_eq!(levenshtein("aaaa", "aa"), 2);
        assert_eq!(levenshtein("abab", "baba"), 2);
    }

    #[test]
    fn test_unicode_counts_scalars_not_bytes() {
        // One substitution between two 2-char strings, not a byte-level edit.
        assert_eq!(levenshtein("héllo", "hállo"), 1);
        let s = similarity("héllo", "hállo");
        assert!((s - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_in_unit_range() {
        for (a, b) in [("abc", "xyz"), ("a", "abcdefgh"), ("same", "same")] {
            let s = similarity(a, b);
            assert!((0.0..=1.0).contains(&s));
        }
    }
}
