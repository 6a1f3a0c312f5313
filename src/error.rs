use std::path::PathBuf;

use thiserror::Error;

/// Result type for argus operations
pub type Result<T> = std::result::Result<T, VizError>;

/// Main error type for the plot exporters
#[derive(Debug, Error)]
pub enum VizError {
    /// A metric or its validation counterpart is missing from the history
    #[error("Missing metric '{metric}' in training history")]
    MissingMetric {
        metric: String,
    },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        name: String,
        reason: String,
    },

    /// Invalid dimensions for operations
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        expected: String,
        actual: String,
    },

    /// A dataset split yielded no samples
    #[error("Empty split: {0}")]
    EmptySplit(String),

    /// Labels contain a single class, so rates cannot be normalised
    #[error("Degenerate labels: {0}")]
    DegenerateLabels(String),

    /// The drawing backend failed to produce an image
    #[error("Failed to render {path}: {reason}")]
    Render {
        path: PathBuf,
        reason: String,
    },

    /// IO errors (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper functions for common error patterns
impl VizError {
    pub fn missing_metric<S: Into<String>>(metric: S) -> Self {
        VizError::MissingMetric {
            metric: metric.into(),
        }
    }

    pub fn dimension_mismatch<S: Into<String>>(expected: S, actual: S) -> Self {
        VizError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn invalid_parameter<S: Into<String>>(name: S, reason: S) -> Self {
        VizError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
