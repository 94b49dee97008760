use thiserror::Error;

/// Result alias for `quarry`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the clustering and decision-tree primitives.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Input was empty.
    #[error("empty input provided")]
    EmptyInput,

    /// Vector dimension mismatch.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Invalid number of clusters requested.
    #[error("cannot create {requested} clusters from {n_items} items")]
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
        /// Number of items.
        n_items: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("point {row} has a non-finite value in dimension {dim}")]
    NonFinite {
        /// Index of the offending point.
        row: usize,
        /// Dimension holding the bad value.
        dim: usize,
    },

    /// A row does not carry an attribute the operation needs.
    #[error("row {row} has no attribute '{attribute}'")]
    MissingAttribute {
        /// Index of the offending row.
        row: usize,
        /// Attribute name.
        attribute: String,
    },

    /// A raw column holds both numbers and categories.
    #[error("column '{column}' mixes numeric and categorical values")]
    MixedColumn {
        /// Column name.
        column: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// Prediction hit a categorical value the tree never saw in training.
    #[error("value '{value}' for attribute '{attribute}' was not seen in training")]
    UnseenValue {
        /// Attribute being dispatched on.
        attribute: String,
        /// The unseen value.
        value: String,
    },

    /// A cluster lost all of its members and was reseeded.
    ///
    /// Informational: k-means records these and keeps going. See
    /// [`KmeansFit::ensure_no_degenerate`](crate::cluster::KmeansFit::ensure_no_degenerate).
    #[error("cluster {cluster} was empty at iteration {iteration} and was reinitialized")]
    DegenerateCluster {
        /// Cluster index.
        cluster: usize,
        /// 1-based iteration at which it emptied.
        iteration: usize,
    },
}

impl Error {
    /// True for the malformed-input family (empty, mismatched, or missing data
    /// and bad parameters).
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::EmptyInput
                | Error::DimensionMismatch { .. }
                | Error::InvalidClusterCount { .. }
                | Error::NonFinite { .. }
                | Error::MissingAttribute { .. }
                | Error::MixedColumn { .. }
                | Error::InvalidParameter { .. }
        )
    }
}
