//! # quarry
//!
//! Two classic data-mining algorithms, small and deterministic:
//!
//! - [`cluster`]: K-means (Lloyd's algorithm) with a fixed iteration budget
//!   and explicit empty-cluster reseeding.
//! - [`tree`]: ID3 decision trees built by information gain, with median
//!   discretization for numeric columns.
//!
//! Both are plain functions over in-memory data that return structured
//! results. Loading files and printing are left to the caller; see the
//! `kmeans_walkthrough` and `id3_tree` demos.
//!
//! Randomness is always injectable: pass a seed, your own `Rng`, or fixed
//! starting centroids.
//!
//! Events are emitted through `tracing` (`debug` per iteration and split,
//! `warn` when a cluster empties). Install a subscriber to see them.

pub mod cluster;
/// Error types used across `quarry`.
pub mod error;
pub mod metrics;
pub mod tree;

#[cfg(test)]
mod worked_examples_tests;

pub use cluster::{cluster, Clustering, Init, Kmeans, KmeansFit};
pub use error::{Error, Result};
pub use tree::{build_tree, predict, Id3, Row, TreeNode};
