//! ID3 decision trees over categorical data.
//!
//! # Pipeline
//!
//! ```text
//! RawRow ──discretize──▶ Row ──build_tree──▶ TreeNode ──predict──▶ class
//!          (median split)      (max info gain)         (follow values)
//! ```
//!
//! Rows map attribute names to string values; one attribute is the class
//! (target). Numeric columns must be bucketed first, see [`discretize`].
//!
//! # Tree shape
//!
//! A [`TreeNode`] is either a `Leaf` carrying a class or a `Decision` that
//! dispatches on one attribute:
//!
//! ```text
//! [Married]
//!   If Married == No:
//!     [Health]
//!       ...
//!   If Married == Yes:
//!     [Age]
//!       ...
//! ```
//!
//! Prediction follows the child keyed by the row's value at each decision
//! node. A value the training data never contained is an error
//! ([`Error::UnseenValue`](crate::Error::UnseenValue)), not a silent default.
//!
//! # Inspecting a split
//!
//! [`split_report`] and [`rank_attributes`] expose the numbers behind each
//! choice: per-value counts, class frequency tables, subset entropies and the
//! resulting gain.

mod discretize;
mod id3;
mod node;

use std::collections::BTreeMap;

/// A categorical row: attribute name → value.
pub type Row = BTreeMap<String, String>;

pub use discretize::{discretize, median_split, Discretized, RawRow, RawValue, MISSING};
pub use id3::{
    build_tree, entropy, information_gain, rank_attributes, root_attribute, split_report,
    AttributeSplit, Id3, Partition,
};
pub use node::{predict, TreeNode};
