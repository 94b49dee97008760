//! K-means clustering.
//!
//! Partitions data into k clusters with Lloyd's algorithm (1957):
//!
//! 1. Initialize k centroids: k distinct input points drawn uniformly at
//!    random, or centroids supplied by the caller
//! 2. **Assign**: each point → nearest centroid (Euclidean)
//! 3. **Update**: each centroid → mean of its assigned points
//! 4. Repeat steps 2-3 a fixed number of times
//!
//! There is no convergence check. The loop always runs the configured number
//! of iterations, and the returned labels are those of the last Assign step.
//! The partition may still be moving when the budget runs out.
//!
//! # Empty clusters
//!
//! A cluster that receives no points in an Assign step is reseeded with a
//! uniformly random point drawn from the *whole* input, assigned or not. The
//! reseed can land on a point that already sits comfortably in another
//! cluster. Each reseed is logged at `warn` and recorded as a
//! [`DegenerateCluster`] on the result.
//!
//! # Worked example
//!
//! ```rust
//! use quarry::cluster::Kmeans;
//!
//! let points = vec![
//!     vec![2.0, 10.0], vec![2.0, 5.0], vec![8.0, 4.0], vec![5.0, 8.0],
//!     vec![7.0, 5.0], vec![6.0, 4.0], vec![1.0, 2.0], vec![4.0, 9.0],
//! ];
//! let fit = Kmeans::new(3)
//!     .with_iterations(1)
//!     .with_initial_centroids(vec![points[0].clone(), points[3].clone(), points[6].clone()])
//!     .fit(&points)
//!     .unwrap();
//!
//! // P6 = (6, 4) is nearest to m2 = (5, 8).
//! assert_eq!(fit.labels()[5], 1);
//! ```

use super::distance::{euclidean, squared_euclidean_view};
use super::traits::Clustering;
use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView1};
use rand::prelude::*;
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const DEFAULT_ITERATIONS: usize = 10;

/// How initial centroids are chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum Init {
    /// Sample k distinct input points with a seeded generator.
    Seed(u64),
    /// Use these centroids as given (one per cluster).
    Centroids(Vec<Vec<f64>>),
}

/// K-means clustering with a fixed iteration budget.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Number of assign/update rounds.
    iterations: usize,
    /// Random seed.
    seed: Option<u64>,
    /// Caller-chosen starting centroids.
    initial_centroids: Option<Vec<Vec<f64>>>,
}

/// A cluster that emptied during an Update step and was reseeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DegenerateCluster {
    /// Cluster index.
    pub cluster: usize,
    /// 1-based iteration in which the cluster had no members.
    pub iteration: usize,
    /// Index of the input point the centroid was reset to.
    pub reseeded_from: usize,
}

/// Result of a k-means run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KmeansFit {
    centroids: Vec<Vec<f64>>,
    labels: Vec<usize>,
    degenerate: Vec<DegenerateCluster>,
    inertia: f64,
}

impl KmeansFit {
    /// Final centroids, one per cluster.
    pub fn centroids(&self) -> &[Vec<f64>] {
        &self.centroids
    }

    /// Cluster index of every input point, from the last Assign step.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Every empty-cluster reseed, in the order it happened.
    pub fn degenerate(&self) -> &[DegenerateCluster] {
        &self.degenerate
    }

    /// Consume the fit, keeping only the labels.
    pub fn into_labels(self) -> Vec<usize> {
        self.labels
    }

    /// Number of clusters.
    pub fn k(&self) -> usize {
        self.centroids.len()
    }

    /// Number of points per cluster.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.k()];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }

    /// Indices of the points assigned to `cluster`.
    pub fn members(&self, cluster: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|&(_, &label)| label == cluster)
            .map(|(i, _)| i)
            .collect()
    }

    /// Within-cluster sum of squared distances to the final centroids.
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Turn the first recorded reseed into an error.
    ///
    /// `fit` treats empty clusters as informational. Callers that would rather
    /// reject such a run can use this.
    pub fn ensure_no_degenerate(&self) -> Result<()> {
        match self.degenerate.first() {
            Some(event) => Err(Error::DegenerateCluster {
                cluster: event.cluster,
                iteration: event.iteration,
            }),
            None => Ok(()),
        }
    }
}

impl Kmeans {
    /// Create a new K-means clusterer.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            initial_centroids: None,
        }
    }

    /// Set the number of assign/update rounds.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Start from these centroids instead of sampling input points.
    ///
    /// The random source is then only consulted to reseed empty clusters.
    pub fn with_initial_centroids(mut self, centroids: Vec<Vec<f64>>) -> Self {
        self.initial_centroids = Some(centroids);
        self
    }

    /// Run k-means, seeding from the configured seed or the thread RNG.
    pub fn fit(&self, data: &[Vec<f64>]) -> Result<KmeansFit> {
        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };
        self.fit_with_rng(data, &mut rng)
    }

    /// Run k-means drawing all randomness from `rng`.
    pub fn fit_with_rng<R: Rng>(&self, data: &[Vec<f64>], rng: &mut R) -> Result<KmeansFit> {
        if self.iterations == 0 {
            return Err(Error::InvalidParameter {
                name: "iterations",
                message: "must be at least 1",
            });
        }

        let data_arr = to_matrix(data)?;
        let (n, d) = data_arr.dim();

        if self.k == 0 || self.k > n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n,
            });
        }

        let mut centroids = match &self.initial_centroids {
            Some(given) => {
                if given.len() != self.k {
                    return Err(Error::InvalidParameter {
                        name: "initial_centroids",
                        message: "expected exactly one centroid per cluster",
                    });
                }
                let arr = to_matrix(given)?;
                if arr.ncols() != d {
                    return Err(Error::DimensionMismatch {
                        expected: d,
                        found: arr.ncols(),
                    });
                }
                arr
            }
            None => self.sample_centroids(&data_arr, rng),
        };

        let mut labels = vec![0usize; n];
        let mut degenerate = Vec::new();

        for iteration in 1..=self.iterations {
            // Assign
            for (i, label) in labels.iter_mut().enumerate() {
                *label = nearest(&data_arr.row(i), &centroids);
            }

            // Update
            let mut new_centroids = Array2::zeros((self.k, d));
            let mut counts = vec![0usize; self.k];

            for (i, &k) in labels.iter().enumerate() {
                let mut row = new_centroids.row_mut(k);
                row += &data_arr.row(i);
                counts[k] += 1;
            }

            for (k, &count) in counts.iter().enumerate() {
                if count > 0 {
                    new_centroids.row_mut(k).mapv_inplace(|x| x / count as f64);
                } else {
                    let idx = rng.random_range(0..n);
                    new_centroids.row_mut(k).assign(&data_arr.row(idx));
                    warn!(
                        cluster = k,
                        iteration,
                        reseeded_from = idx,
                        "k-means cluster had no members, reinitialized to a data point"
                    );
                    degenerate.push(DegenerateCluster {
                        cluster: k,
                        iteration,
                        reseeded_from: idx,
                    });
                }
            }

            centroids = new_centroids;
            debug!(
                iteration,
                inertia = inertia_of(&data_arr, &centroids, &labels),
                "k-means iteration"
            );
        }

        let inertia = inertia_of(&data_arr, &centroids, &labels);
        Ok(KmeansFit {
            centroids: centroids.rows().into_iter().map(|r| r.to_vec()).collect(),
            labels,
            degenerate,
            inertia,
        })
    }

    /// Pick k distinct input points uniformly at random.
    fn sample_centroids<R: Rng>(&self, data: &Array2<f64>, rng: &mut R) -> Array2<f64> {
        let mut centroids = Array2::zeros((self.k, data.ncols()));
        let picked = rand::seq::index::sample(rng, data.nrows(), self.k);
        for (c, idx) in picked.iter().enumerate() {
            centroids.row_mut(c).assign(&data.row(idx));
        }
        centroids
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[Vec<f64>]) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.into_labels())
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

/// Run k-means for exactly `iterations` rounds.
///
/// `Init::Seed` samples the starting centroids (and any reseeds) from a
/// `StdRng` seeded with the given value. `Init::Centroids` fixes the starting
/// centroids; reseeds then use a generator seeded with `0`.
pub fn cluster(points: &[Vec<f64>], k: usize, iterations: usize, init: Init) -> Result<KmeansFit> {
    let kmeans = Kmeans::new(k).with_iterations(iterations);
    match init {
        Init::Seed(seed) => kmeans.with_seed(seed).fit(points),
        Init::Centroids(centroids) => kmeans
            .with_seed(0)
            .with_initial_centroids(centroids)
            .fit(points),
    }
}

/// One Assign step: the index of the nearest centroid for every point.
///
/// Ties go to the lowest centroid index.
pub fn assign(points: &[Vec<f64>], centroids: &[Vec<f64>]) -> Result<Vec<usize>> {
    let data = to_matrix(points)?;
    let centers = to_matrix(centroids)?;
    if centers.ncols() != data.ncols() {
        return Err(Error::DimensionMismatch {
            expected: data.ncols(),
            found: centers.ncols(),
        });
    }
    Ok(data.rows().into_iter().map(|p| nearest(&p, &centers)).collect())
}

/// Euclidean distance from `point` to each centroid, in centroid order.
pub fn distances_to_centroids(point: &[f64], centroids: &[Vec<f64>]) -> Result<Vec<f64>> {
    check_finite(0, point)?;
    centroids
        .iter()
        .map(|c| {
            if c.len() != point.len() {
                return Err(Error::DimensionMismatch {
                    expected: point.len(),
                    found: c.len(),
                });
            }
            Ok(euclidean(point, c))
        })
        .collect()
}

/// One Update step without reseeding: the mean of each cluster's points, or
/// `None` for a cluster with no members.
pub fn cluster_means(
    points: &[Vec<f64>],
    labels: &[usize],
    k: usize,
) -> Result<Vec<Option<Vec<f64>>>> {
    let data = to_matrix(points)?;
    if labels.len() != data.nrows() {
        return Err(Error::DimensionMismatch {
            expected: data.nrows(),
            found: labels.len(),
        });
    }
    if let Some(&bad) = labels.iter().find(|&&l| l >= k) {
        return Err(Error::InvalidParameter {
            name: "labels",
            message: "every label must be below k",
        });
    }

    let mut sums = Array2::<f64>::zeros((k, data.ncols()));
    let mut counts = vec![0usize; k];
    for (i, &label) in labels.iter().enumerate() {
        let mut row = sums.row_mut(label);
        row += &data.row(i);
        counts[label] += 1;
    }

    Ok(sums
        .rows()
        .into_iter()
        .zip(counts)
        .map(|(sum, count)| (count > 0).then(|| sum.iter().map(|x| x / count as f64).collect()))
        .collect())
}

fn nearest(point: &ArrayView1<'_, f64>, centroids: &Array2<f64>) -> usize {
    let mut best_cluster = 0;
    let mut best_dist = f64::INFINITY;
    for (k, centroid) in centroids.rows().into_iter().enumerate() {
        let dist = squared_euclidean_view(point, &centroid);
        if dist < best_dist {
            best_dist = dist;
            best_cluster = k;
        }
    }
    best_cluster
}

fn inertia_of(data: &Array2<f64>, centroids: &Array2<f64>, labels: &[usize]) -> f64 {
    labels
        .iter()
        .enumerate()
        .map(|(i, &k)| squared_euclidean_view(&data.row(i), &centroids.row(k)))
        .sum()
}

fn check_finite(row: usize, point: &[f64]) -> Result<()> {
    match point.iter().position(|x| !x.is_finite()) {
        Some(dim) => Err(Error::NonFinite { row, dim }),
        None => Ok(()),
    }
}

/// Pack rows into an `n × d` matrix, rejecting empty, ragged or non-finite
/// input.
fn to_matrix(data: &[Vec<f64>]) -> Result<Array2<f64>> {
    let first = data.first().ok_or(Error::EmptyInput)?;
    let (n, d) = (data.len(), first.len());

    let mut flat: Vec<f64> = Vec::with_capacity(n * d);
    for (row, point) in data.iter().enumerate() {
        if point.len() != d {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: point.len(),
            });
        }
        check_finite(row, point)?;
        flat.extend(point);
    }
    Array2::from_shape_vec((n, d), flat).map_err(|_| Error::DimensionMismatch {
        expected: n * d,
        found: data.iter().map(Vec::len).sum(),
    })
}
