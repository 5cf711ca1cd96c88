//! Edit-distance similarity for fuzzy matching.

use strsim::normalized_levenshtein;

/// Safely convert usize to f64 for ratio calculations
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Similarity ratio in [0, 1]: `1 - levenshtein(a, b) / max(len(a), len(b))`.
///
/// Lengths are counted in Unicode scalar values. Two empty strings are identical.
#[must_use]
pub fn ratio(a: &str, b: &str) -> f64 {
    normalized_levenshtein(a, b)
}

/// Upper bound of [`ratio`] given only the two lengths.
///
/// The edit distance is at least the length difference, so no pair with these
/// lengths can score higher than this.
#[must_use]
pub fn max_ratio_for_lengths(len_a: usize, len_b: usize) -> f64 {
    let longest = len_a.max(len_b);
    if longest == 0 {
        return 1.0;
    }
    1.0 - count_to_f64(len_a.abs_diff(len_b)) / count_to_f64(longest)
}

/// Whether a candidate of `candidate_len` could beat `threshold` against a query of `query_len`
#[inline]
#[must_use]
pub fn can_exceed(query_len: usize, candidate_len: usize, threshold: f64) -> bool {
    max_ratio_for_lengths(query_len, candidate_len) > threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_identical_and_disjoint() {
        assert!((ratio("blue jay", "blue jay") - 1.0).abs() < f64::EPSILON);
        assert!(ratio("abc", "xyz").abs() < f64::EPSILON);
        assert!((ratio("", "") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_typo_above_default_threshold() {
        // one deletion in a 14 character name
        let score = ratio("amercan robin", "american robin");
        assert!((score - (1.0 - 1.0 / 14.0)).abs() < 1e-9);
        assert!(score > 0.8);
    }

    #[test]
    fn test_length_bound() {
        assert!((max_ratio_for_lengths(10, 10) - 1.0).abs() < f64::EPSILON);
        assert!((max_ratio_for_lengths(5, 10) - 0.5).abs() < f64::EPSILON);
        assert!(can_exceed(13, 14, 0.8));
        assert!(!can_exceed(4, 14, 0.8));
    }

    #[test]
    fn test_bound_never_below_ratio() {
        let pairs = [
            ("amerob", "american robin"),
            ("blue jy", "blue jay"),
            ("turdus", "turdidae"),
        ];
        for (a, b) in pairs {
            let bound = max_ratio_for_lengths(a.chars().count(), b.chars().count());
            assert!(ratio(a, b) <= bound + 1e-12, "{a} vs {b}");
        }
    }
}
