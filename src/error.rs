/// Errors returned by the `autoopt` crate.
///
/// Every validation error is raised synchronously when a distribution,
/// pipeline, or registry entry is constructed. Once constructed, the
/// distribution queries never fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the lower bound is not strictly less than the upper bound.
    #[error("invalid bounds: min_value ({low}) must be smaller than max_value ({high})")]
    InvalidBounds {
        /// The lower bound value.
        low: f64,
        /// The upper bound value.
        high: f64,
    },

    /// Returned when a log-domain distribution is given a non-positive lower bound.
    #[error("invalid log bounds: min_value ({0}) must be positive for log-domain distributions")]
    InvalidLogBounds(f64),

    /// Returned when a normal-shaped distribution gets a non-positive scale.
    #[error("invalid scale: {0} must be positive and finite")]
    InvalidScale(f64),

    /// Returned when a quantization step is not positive.
    #[error("invalid step: q ({0}) must be positive and finite")]
    InvalidStep(f64),

    /// Returned when a choice distribution has no entries.
    #[error("choice distributions need at least one choice")]
    EmptyChoices,

    /// Returned when a weighted choice entry has a non-positive weight.
    #[error("invalid weight {weight} for choice at index {index}: weights must be positive")]
    InvalidWeight {
        /// Position of the offending entry in the input.
        index: usize,
        /// The rejected weight.
        weight: f64,
    },

    /// Returned when the weights of a choice distribution add up to infinity.
    #[error("invalid weights: their sum ({0}) must be finite")]
    InvalidWeightSum(f64),

    /// Returned when a node's input type doesn't match the pipeline's output type.
    #[error("can't add node '{node}': expected input type '{expected}' but got '{got}'")]
    TypeMismatch {
        /// The name of the node being added.
        node: String,
        /// The current output type of the pipeline.
        expected: String,
        /// The input type of the node.
        got: String,
    },

    /// Returned when a node name is registered twice.
    #[error("node '{0}' is already registered")]
    DuplicateNode(String),

    /// Returned when a node name has no registered factory.
    #[error("no node registered under the name '{0}'")]
    UnknownNode(String),

    /// Returned when a node fails while executing.
    #[error("node '{node}' failed: {reason}")]
    NodeFailed {
        /// The name of the failing node.
        node: String,
        /// The reason reported by the node.
        reason: String,
    },

    /// Returned when an optional capability can't be provided.
    ///
    /// [`PdfPlot::new`](crate::visualization::PdfPlot::new) turns it into `None`.
    #[error("unsupported capability: {0}")]
    UnsupportedCapability(&'static str),

    /// Returned when a task snapshot can't be encoded or decoded.
    #[cfg(feature = "serde")]
    #[error("storage error: {0}")]
    Storage(String),
}

/// Result type alias for `autoopt` operations.
pub type Result<T> = core::result::Result<T, Error>;
