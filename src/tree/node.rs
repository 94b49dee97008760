//! Decision-tree node.

use super::Row;
use crate::error::{Error, Result};
use core::fmt;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A node in a categorical decision tree.
///
/// Children are keyed by attribute value and kept in sorted order, so two
/// trees built from the same input compare (and print) identically.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TreeNode {
    /// Terminal node carrying the predicted class.
    Leaf {
        /// Class label.
        class: String,
    },
    /// Internal node dispatching on the value of one attribute.
    Decision {
        /// Attribute tested at this node.
        attribute: String,
        /// One child per training value of `attribute`.
        children: BTreeMap<String, TreeNode>,
    },
}

impl TreeNode {
    /// Create a leaf.
    pub fn leaf(class: impl Into<String>) -> Self {
        TreeNode::Leaf {
            class: class.into(),
        }
    }

    /// Check if this is a leaf node.
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Get the class if this is a leaf node.
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            TreeNode::Leaf { class } => Some(class.as_str()),
            TreeNode::Decision { .. } => None,
        }
    }

    /// Attribute tested here, if this is a decision node.
    pub fn attribute(&self) -> Option<&str> {
        match self {
            TreeNode::Decision { attribute, .. } => Some(attribute.as_str()),
            TreeNode::Leaf { .. } => None,
        }
    }

    /// Number of decision levels below this node (0 for a leaf).
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Decision { children, .. } => {
                1 + children.values().map(TreeNode::depth).max().unwrap_or(0)
            }
        }
    }

    /// Number of leaves under (and including) this node.
    pub fn n_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Decision { children, .. } => children.values().map(TreeNode::n_leaves).sum(),
        }
    }

    /// Classify `row` by walking from this node to a leaf.
    ///
    /// Fails with [`Error::UnseenValue`] when the row holds a value the tree
    /// has no branch for, and [`Error::MissingAttribute`] (row index 0) when
    /// the row lacks a tested attribute.
    pub fn predict(&self, row: &Row) -> Result<&str> {
        self.predict_at(row, 0)
    }

    /// Classify every row, stopping at the first failure.
    pub fn predict_batch(&self, rows: &[Row]) -> Result<Vec<&str>> {
        rows.iter()
            .enumerate()
            .map(|(i, row)| self.predict_at(row, i))
            .collect()
    }

    fn predict_at(&self, row: &Row, index: usize) -> Result<&str> {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf { class } => return Ok(class.as_str()),
                TreeNode::Decision {
                    attribute,
                    children,
                } => {
                    let value = row.get(attribute).ok_or_else(|| Error::MissingAttribute {
                        row: index,
                        attribute: attribute.clone(),
                    })?;
                    node = children.get(value).ok_or_else(|| Error::UnseenValue {
                        attribute: attribute.clone(),
                        value: value.clone(),
                    })?;
                }
            }
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = " ".repeat(indent);
        match self {
            TreeNode::Leaf { class } => writeln!(f, "{pad}-> {class}"),
            TreeNode::Decision {
                attribute,
                children,
            } => {
                writeln!(f, "{pad}[{attribute}]")?;
                for (value, child) in children {
                    writeln!(f, "{pad}  If {attribute} == {value}:")?;
                    child.write_indented(f, indent + 4)?;
                }
                Ok(())
            }
        }
    }
}

/// Classify `row` with `tree`. See [`TreeNode::predict`].
pub fn predict<'t>(tree: &'t TreeNode, row: &Row) -> Result<&'t str> {
    tree.predict(row)
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
