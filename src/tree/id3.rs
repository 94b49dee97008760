//! ID3: greedy decision-tree induction by information gain.
//!
//! At every node, for each remaining candidate attribute `A`:
//!
//! ```text
//! IG(A) = H(rows) - Σ_v (|rows_v| / |rows|) · H(rows_v)
//! ```
//!
//! The attribute with the largest gain becomes the split; ties go to the
//! attribute listed first. Recursion stops when:
//!
//! | Condition | Result |
//! |-----------|--------|
//! | all rows share one class | leaf with that class |
//! | no candidates left, or max depth reached | majority leaf |
//! | best gain ≤ `min_gain` | majority leaf |
//!
//! A split gets one child for every value the attribute takes anywhere in the
//! training set. Values that do not occur in the current subset become
//! majority leaves for the current rows, so a later prediction never falls
//! off a branch the training data knew about.
//!
//! "Majority" breaks ties in favour of the class that appears first in the
//! rows.

use super::{Row, TreeNode};
use crate::error::{Error, Result};
use crate::metrics::{conditional_entropy, entropy_from_counts};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const DEFAULT_MIN_GAIN: f64 = 1e-12;

/// ID3 tree builder.
#[derive(Debug, Clone)]
pub struct Id3 {
    /// Class attribute.
    target: String,
    /// Optional bound on the number of decision levels.
    max_depth: Option<usize>,
    /// Gains at or below this are treated as zero.
    min_gain: f64,
}

/// One subset of a split: rows sharing a value of the split attribute.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Partition {
    /// Attribute value shared by the subset.
    pub value: String,
    /// Number of rows in the subset.
    pub count: usize,
    /// `count / total`.
    pub weight: f64,
    /// Class entropy of the subset, in bits.
    pub entropy: f64,
    /// Rows per class, in order of first appearance.
    pub class_counts: Vec<(String, usize)>,
}

/// Breakdown of splitting a row set on one attribute.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AttributeSplit {
    /// Candidate attribute.
    pub attribute: String,
    /// Class entropy before the split.
    pub parent_entropy: f64,
    /// Weighted class entropy after the split.
    pub weighted_entropy: f64,
    /// `parent_entropy - weighted_entropy`.
    pub gain: f64,
    /// Subsets in order of first appearance.
    pub partitions: Vec<Partition>,
}

impl Id3 {
    /// Create a builder predicting `target`.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            max_depth: None,
            min_gain: DEFAULT_MIN_GAIN,
        }
    }

    /// Stop splitting after `depth` decision levels.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Treat gains at or below `min_gain` as uninformative.
    pub fn with_min_gain(mut self, min_gain: f64) -> Self {
        self.min_gain = min_gain;
        self
    }

    /// Build a tree from `rows`, considering `attributes` in the given order.
    pub fn fit(&self, rows: &[Row], attributes: &[&str]) -> Result<TreeNode> {
        validate(rows, &self.target, attributes)?;
        if self.min_gain.is_nan() {
            return Err(Error::InvalidParameter {
                name: "min_gain",
                message: "must be a number",
            });
        }

        // Children are enumerated from the full training set, not the subset.
        let domains: HashMap<&str, BTreeSet<&str>> = attributes
            .iter()
            .map(|&a| (a, rows.iter().map(|r| value_of(r, a)).collect()))
            .collect();

        let subset: Vec<&Row> = rows.iter().collect();
        Ok(self.grow(&subset, attributes, &domains, 0))
    }

    fn grow(
        &self,
        rows: &[&Row],
        attributes: &[&str],
        domains: &HashMap<&str, BTreeSet<&str>>,
        depth: usize,
    ) -> TreeNode {
        let counts = class_counts(rows.iter().map(|r| value_of(r, &self.target)));

        if counts.len() == 1 {
            trace!(depth, class = counts[0].0, "id3 pure leaf");
            return TreeNode::leaf(counts[0].0);
        }

        let majority = majority(&counts);
        if attributes.is_empty() || self.max_depth.is_some_and(|max| depth >= max) {
            trace!(depth, class = majority, "id3 majority leaf");
            return TreeNode::leaf(majority);
        }

        let mut best = attributes[0];
        let mut best_gain = f64::NEG_INFINITY;
        for &attribute in attributes {
            let gain = gain_of(rows, attribute, &self.target);
            if gain > best_gain {
                best_gain = gain;
                best = attribute;
            }
        }

        if best_gain <= self.min_gain {
            trace!(depth, class = majority, gain = best_gain, "id3 uninformative leaf");
            return TreeNode::leaf(majority);
        }

        debug!(
            attribute = best,
            gain = best_gain,
            depth,
            rows = rows.len(),
            "id3 split"
        );

        let remaining: Vec<&str> = attributes.iter().copied().filter(|&a| a != best).collect();
        let mut children = BTreeMap::new();
        for &value in domains.get(best).into_iter().flatten() {
            let subset: Vec<&Row> = rows
                .iter()
                .copied()
                .filter(|r| value_of(r, best) == value)
                .collect();
            let child = if subset.is_empty() {
                TreeNode::leaf(majority)
            } else {
                self.grow(&subset, &remaining, domains, depth + 1)
            };
            children.insert(value.to_string(), child);
        }

        TreeNode::Decision {
            attribute: best.to_string(),
            children,
        }
    }
}

/// Build an ID3 tree with default settings.
///
/// ```rust
/// use quarry::tree::{build_tree, Row};
///
/// let rows: Vec<Row> = [("sunny", "no"), ("rain", "yes"), ("sunny", "no")]
///     .iter()
///     .map(|(o, p)| {
///         [("outlook", *o), ("play", *p)]
///             .iter()
///             .map(|(k, v)| (k.to_string(), v.to_string()))
///             .collect()
///     })
///     .collect();
///
/// let tree = build_tree(&rows, &["outlook"], "play").unwrap();
/// assert_eq!(tree.attribute(), Some("outlook"));
/// ```
pub fn build_tree(rows: &[Row], attributes: &[&str], target: &str) -> Result<TreeNode> {
    Id3::new(target).fit(rows, attributes)
}

/// Class entropy of `rows`, in bits.
pub fn entropy(rows: &[Row], target: &str) -> Result<f64> {
    validate(rows, target, &[])?;
    let counts = class_counts(rows.iter().map(|r| value_of(r, target)));
    Ok(entropy_from_counts(counts.iter().map(|&(_, c)| c)))
}

/// Information gain of splitting `rows` on `attribute`.
pub fn information_gain(rows: &[Row], attribute: &str, target: &str) -> Result<f64> {
    Ok(split_report(rows, attribute, target)?.gain)
}

/// Per-value breakdown of splitting `rows` on `attribute`.
pub fn split_report(rows: &[Row], attribute: &str, target: &str) -> Result<AttributeSplit> {
    validate(rows, target, &[attribute])?;
    let refs: Vec<&Row> = rows.iter().collect();
    Ok(describe_split(&refs, attribute, target))
}

/// A [`split_report`] for every attribute, in the given order.
pub fn rank_attributes(
    rows: &[Row],
    attributes: &[&str],
    target: &str,
) -> Result<Vec<AttributeSplit>> {
    validate(rows, target, attributes)?;
    let refs: Vec<&Row> = rows.iter().collect();
    Ok(attributes
        .iter()
        .map(|&a| describe_split(&refs, a, target))
        .collect())
}

/// The attribute [`build_tree`] splits on at the root, with its gain.
///
/// The highest-gain candidate wins, the first one on a tie. `None` when
/// `attributes` is empty or no candidate gains more than the default
/// `min_gain`, which is exactly when [`build_tree`] returns a leaf.
pub fn root_attribute(
    rows: &[Row],
    attributes: &[&str],
    target: &str,
) -> Result<Option<(String, f64)>> {
    let ranked = rank_attributes(rows, attributes, target)?;
    let mut best: Option<(String, f64)> = None;
    for split in ranked {
        if best.as_ref().map_or(true, |(_, g)| split.gain > *g) {
            best = Some((split.attribute, split.gain));
        }
    }
    Ok(best.filter(|&(_, gain)| gain > DEFAULT_MIN_GAIN))
}

fn describe_split(rows: &[&Row], attribute: &str, target: &str) -> AttributeSplit {
    let total = rows.len();
    let parent = class_counts(rows.iter().map(|r| value_of(r, target)));
    let parent_entropy = entropy_from_counts(parent.iter().map(|&(_, c)| c));

    let mut partitions = Vec::new();
    let mut weighted_entropy = 0.0;
    for (value, subset) in partition(rows, attribute) {
        let counts = class_counts(subset.iter().map(|r| value_of(r, target)));
        let h = entropy_from_counts(counts.iter().map(|&(_, c)| c));
        let weight = subset.len() as f64 / total as f64;
        weighted_entropy += weight * h;
        partitions.push(Partition {
            value: value.to_string(),
            count: subset.len(),
            weight,
            entropy: h,
            class_counts: counts.into_iter().map(|(c, n)| (c.to_string(), n)).collect(),
        });
    }

    AttributeSplit {
        attribute: attribute.to_string(),
        parent_entropy,
        weighted_entropy,
        gain: non_negative(parent_entropy - weighted_entropy),
        partitions,
    }
}

fn gain_of(rows: &[&Row], attribute: &str, target: &str) -> f64 {
    let parent = class_counts(rows.iter().map(|r| value_of(r, target)));
    let children: Vec<Vec<usize>> = partition(rows, attribute)
        .into_iter()
        .map(|(_, subset)| {
            class_counts(subset.iter().map(|r| value_of(r, target)))
                .into_iter()
                .map(|(_, c)| c)
                .collect()
        })
        .collect();
    non_negative(
        entropy_from_counts(parent.into_iter().map(|(_, c)| c)) - conditional_entropy(&children),
    )
}

/// Rounding can leave an uninformative split slightly below zero.
fn non_negative(gain: f64) -> f64 {
    if gain > 0.0 {
        gain
    } else {
        0.0
    }
}

/// Group rows by their value of `attribute`, in order of first appearance.
fn partition<'r>(rows: &[&'r Row], attribute: &str) -> Vec<(&'r str, Vec<&'r Row>)> {
    let mut groups: Vec<(&str, Vec<&Row>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for &row in rows {
        let value = value_of(row, attribute);
        let slot = *index.entry(value).or_insert_with(|| {
            groups.push((value, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(row);
    }
    groups
}

/// Count labels, keeping the order in which each first appears.
fn class_counts<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        match index.get(label) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(label, counts.len());
                counts.push((label, 1));
            }
        }
    }
    counts
}

/// Most frequent class; the earliest one wins a tie.
fn majority<'a>(counts: &[(&'a str, usize)]) -> &'a str {
    let mut best = ("", 0usize);
    for &(class, n) in counts {
        if n > best.1 {
            best = (class, n);
        }
    }
    best.0
}

fn value_of<'r>(row: &'r Row, attribute: &str) -> &'r str {
    // Presence is checked up front by `validate`.
    row.get(attribute).map_or("", String::as_str)
}

fn validate(rows: &[Row], target: &str, attributes: &[&str]) -> Result<()> {
    if rows.is_empty() {
        return Err(Error::EmptyInput);
    }
    for (i, row) in rows.iter().enumerate() {
        for &attribute in std::iter::once(&target).chain(attributes) {
            if !row.contains_key(attribute) {
                return Err(Error::MissingAttribute {
                    row: i,
                    attribute: attribute.to_string(),
                });
            }
        }
    }
    Ok(())
}
