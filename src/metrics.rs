//! Information-theoretic measures over class labels.
//!
//! | Function | Range | Meaning |
//! |----------|-------|---------|
//! | [`entropy_from_counts`] | [0, log₂ c] | Uncertainty of a class distribution |
//! | [`label_entropy`] | [0, log₂ c] | Same, from raw labels |
//! | [`conditional_entropy`] | [0, log₂ c] | Weighted entropy after a partition |
//!
//! All entropies are in **bits** (base-2 logarithm). A class with zero
//! probability contributes nothing; `0 · log₂ 0` is never evaluated.
//!
//! # Example
//!
//! ```rust
//! use quarry::metrics::{entropy_from_counts, label_entropy};
//!
//! assert_eq!(entropy_from_counts([4, 4]), 1.0);
//! assert_eq!(label_entropy(&["yes", "yes", "yes"]), 0.0);
//! ```

use std::collections::HashMap;
use std::hash::Hash;

/// Shannon entropy of a class distribution given as counts.
///
/// ```text
/// H = -Σ p_c · log₂(p_c),   p_c = count_c / total
/// ```
///
/// Returns 0 for an empty distribution.
pub fn entropy_from_counts<I>(counts: I) -> f64
where
    I: IntoIterator<Item = usize>,
{
    let counts: Vec<usize> = counts.into_iter().collect();
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let n = total as f64;

    counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let c = c as f64;
            c / n * (n / c).log2()
        })
        .sum()
}

/// Shannon entropy of a sequence of labels.
pub fn label_entropy<T: Eq + Hash>(labels: &[T]) -> f64 {
    let mut counts: HashMap<&T, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    entropy_from_counts(counts.into_values())
}

/// Expected entropy after splitting into `partitions`.
///
/// Each partition is the class-count vector of one subset; the result is
/// `Σ (|subset| / |total|) · H(subset)`.
pub fn conditional_entropy<P>(partitions: &[P]) -> f64
where
    P: AsRef<[usize]>,
{
    let sizes: Vec<usize> = partitions.iter().map(|p| p.as_ref().iter().sum()).collect();
    let total: usize = sizes.iter().sum();
    if total == 0 {
        return 0.0;
    }

    partitions
        .iter()
        .zip(&sizes)
        .map(|(p, &size)| {
            size as f64 / total as f64 * entropy_from_counts(p.as_ref().iter().copied())
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_class_is_zero() {
        assert_eq!(entropy_from_counts([7]), 0.0);
        assert_eq!(label_entropy(&["a", "a", "a"]), 0.0);
    }

    #[test]
    fn test_even_binary_split_is_one_bit() {
        assert_eq!(entropy_from_counts([3, 3]), 1.0);
        assert_eq!(label_entropy(&["yes", "no"]), 1.0);
    }

    #[test]
    fn test_zero_counts_ignored() {
        assert_eq!(entropy_from_counts([5, 0, 5]), 1.0);
        assert_eq!(entropy_from_counts(Vec::new()), 0.0);
    }

    #[test]
    fn test_nine_six() {
        // 9 positive, 6 negative
        let h = entropy_from_counts([9, 6]);
        assert!((h - 0.970_950_594_454_668_6).abs() < 1e-12);
    }

    #[test]
    fn test_conditional_entropy_of_pure_partitions() {
        assert_eq!(conditional_entropy(&[vec![4, 0], vec![0, 3]]), 0.0);
        let halves = conditional_entropy(&[[2usize, 2], [1, 1]]);
        assert!((halves - 1.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_entropy_bounded(counts in prop::collection::vec(0usize..50, 1..8)) {
            let h = entropy_from_counts(counts.iter().copied());
            let classes = counts.iter().filter(|&&c| c > 0).count().max(1);
            prop_assert!(h >= 0.0);
            prop_assert!(h <= (classes as f64).log2() + 1e-9);
        }
    }
}
