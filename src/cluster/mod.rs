//! K-means clustering.
//!
//! The classic algorithm: assign each point to the nearest centroid, then
//! move each centroid to the mean of its points. Repeat a fixed number of
//! times.
//!
//! **Objective**: K-means tends to reduce the within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! **Assumptions**:
//! - Clusters are roughly spherical
//! - Features share a scale (distances are computed on raw values)
//! - You know k in advance
//!
//! ## Usage
//!
//! ```rust
//! use quarry::cluster::{cluster, Clustering, Init, Kmeans};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ];
//!
//! let labels = Kmeans::new(2).with_seed(42).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//!
//! // Same thing, as a plain function with explicit starting centroids.
//! let fit = cluster(&data, 2, 10, Init::Centroids(vec![vec![0.0, 0.0], vec![10.0, 10.0]])).unwrap();
//! assert_eq!(fit.labels(), vec![0, 0, 1, 1]);
//! ```

mod distance;
mod kmeans;
mod traits;

pub use distance::{euclidean, squared_euclidean};
pub use kmeans::{
    assign, cluster, cluster_means, distances_to_centroids, DegenerateCluster, Init, Kmeans,
    KmeansFit,
};
pub use traits::Clustering;
