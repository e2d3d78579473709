//! String similarity primitives used by the relevance scorer.
//!
//! Every function works on `char`s, so "São Paulo" has nine units, not ten.
//! Callers are expected to case-fold both inputs.

use std::collections::HashSet;

/// N-gram size used by the scorer unless the policy overrides it.
pub const DEFAULT_NGRAM_SIZE: usize = 2;

/// Jaro-Winkler prefix bonus is capped at this many characters.
const MAX_PREFIX_BONUS: usize = 4;
const PREFIX_SCALE: f64 = 0.1;

/// Compute edit distance between two strings (Levenshtein).
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[n]
}

/// Length of the shared prefix, in characters.
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Jaro-Winkler similarity in `[0, 1]`.
///
/// Matching characters must lie within `max(len) / 2 - 1` positions of each
/// other. For single-character strings that window is negative and nothing
/// matches, so "a" vs "b" and "a" vs "ab" both score 0 unless identical.
pub fn prefix_weighted_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    if a_chars.is_empty() || b_chars.is_empty() {
        return 0.0;
    }

    let jaro = jaro(&a_chars, &b_chars);
    let prefix = common_prefix_len(a, b).min(MAX_PREFIX_BONUS) as f64;

    jaro + PREFIX_SCALE * prefix * (1.0 - jaro)
}

fn jaro(a: &[char], b: &[char]) -> f64 {
    let window = (a.len().max(b.len()) / 2) as i64 - 1;
    let mut a_matched = vec![false; a.len()];
    let mut b_matched = vec![false; b.len()];
    let mut matches = 0usize;

    for (i, ca) in a.iter().enumerate() {
        let start = (i as i64 - window).max(0);
        let end = (i as i64 + window + 1).min(b.len() as i64);
        for j in start..end {
            let j = j as usize;
            if b_matched[j] || b[j] != *ca {
                continue;
            }
            a_matched[i] = true;
            b_matched[j] = true;
            matches += 1;
            break;
        }
    }

    if matches == 0 {
        return 0.0;
    }

    let mut transpositions = 0usize;
    let mut k = 0usize;
    for (i, ca) in a.iter().enumerate() {
        if !a_matched[i] {
            continue;
        }
        while !b_matched[k] {
            k += 1;
        }
        if *ca != b[k] {
            transpositions += 1;
        }
        k += 1;
    }

    let m = matches as f64;
    let t = transpositions as f64;
    (m / a.len() as f64 + m / b.len() as f64 + (m - t / 2.0) / m) / 3.0
}

/// Jaccard index over the sets of contiguous `n`-character windows.
///
/// Returns 0 when either string is shorter than `n` (or `n` is 0).
pub fn ngram_overlap(a: &str, b: &str, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.len() < n || b.len() < n {
        return 0.0;
    }

    let grams_a: HashSet<&[char]> = a.windows(n).collect();
    let grams_b: HashSet<&[char]> = b.windows(n).collect();

    let intersection = grams_a.intersection(&grams_b).count();
    let union = grams_a.union(&grams_b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("stockholm", "stokholm"), 1);
        assert_eq!(edit_distance("abc", "abc"), 0);
        assert_eq!(edit_distance("", "paris"), 5);
        assert_eq!(edit_distance("paris", ""), 5);
    }

    #[test]
    fn test_edit_distance_counts_chars() {
        assert_eq!(edit_distance("são paulo", "sao paulo"), 1);
    }

    #[test]
    fn test_common_prefix_len() {
        assert_eq!(common_prefix_len("berlin", "bern"), 3);
        assert_eq!(common_prefix_len("oslo", "paris"), 0);
        assert_eq!(common_prefix_len("", "x"), 0);
    }

    #[test]
    fn test_similarity_identical_and_empty() {
        assert_eq!(prefix_weighted_similarity("tokyo", "tokyo"), 1.0);
        assert_eq!(prefix_weighted_similarity("", ""), 1.0);
        assert_eq!(prefix_weighted_similarity("tokyo", ""), 0.0);
        assert_eq!(prefix_weighted_similarity("", "tokyo"), 0.0);
    }

    #[test]
    fn test_similarity_known_values() {
        // Classic textbook pair: jaro = 0.9444, prefix "mar"
        assert_relative_eq!(prefix_weighted_similarity("martha", "marhta"), 0.9611, epsilon = 1e-4);
        assert_relative_eq!(prefix_weighted_similarity("dwayne", "duane"), 0.84, epsilon = 1e-4);
    }

    #[test]
    fn test_similarity_single_char_window() {
        // Window is -1 for max length 1: distinct single chars never match.
        assert_eq!(prefix_weighted_similarity("a", "b"), 0.0);
    }

    #[test]
    fn test_similarity_disjoint() {
        assert_eq!(prefix_weighted_similarity("paris", "xyz"), 0.0);
    }

    #[test]
    fn test_ngram_overlap() {
        assert_eq!(ngram_overlap("paris", "paris", 2), 1.0);
        assert_eq!(ngram_overlap("ab", "cd", 2), 0.0);
        assert_eq!(ngram_overlap("a", "abc", 2), 0.0);
        // {"lo","on","nd","do"} vs {"lo","on"}: 2 / 4
        assert_relative_eq!(ngram_overlap("london", "lon", 2), 0.5);
    }

    #[test]
    fn test_ngram_overlap_zero_n() {
        assert_eq!(ngram_overlap("paris", "paris", 0), 0.0);
    }

    proptest! {
        #[test]
        fn prop_edit_distance_symmetric(a in "[a-z ]{0,12}", b in "[a-z ]{0,12}") {
            prop_assert_eq!(edit_distance(&a, &b), edit_distance(&b, &a));
        }

        #[test]
        fn prop_edit_distance_self_is_zero(s in "\\PC{0,16}") {
            prop_assert_eq!(edit_distance(&s, &s), 0);
        }

        #[test]
        fn prop_similarity_in_unit_range(a in "[a-z]{0,10}", b in "[a-z]{0,10}") {
            let s = prefix_weighted_similarity(&a, &b);
            prop_assert!((0.0..=1.0 + 1e-9).contains(&s));
        }

        #[test]
        fn prop_ngram_overlap_in_unit_range(a in "[a-z]{0,10}", b in "[a-z]{0,10}") {
            let s = ngram_overlap(&a, &b, DEFAULT_NGRAM_SIZE);
            prop_assert!((0.0..=1.0).contains(&s));
        }
    }
}
