//! Euclidean distance.
//!
//! K-means here works on raw feature values: nothing is scaled or normalized
//! internally, so callers with heterogeneous units should normalize first.

use ndarray::ArrayView1;

/// Squared Euclidean distance `Σ (aᵢ - bᵢ)²`.
///
/// Ranking by squared distance gives the same nearest centroid as ranking by
/// distance, without the square root.
pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Euclidean (L2) distance.
///
/// ```rust
/// use quarry::cluster::euclidean;
///
/// assert_eq!(euclidean(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
/// ```
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    squared_euclidean(a, b).sqrt()
}

pub(crate) fn squared_euclidean_view(a: &ArrayView1<'_, f64>, b: &ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}
