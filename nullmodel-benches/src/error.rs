//! Benchmark setup error type.

use nullmodel_core::{DegreeSequenceError, GraphError, NullModelError};

/// Errors that may occur while preparing benchmark inputs.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// A synthetic configuration was out of range.
    #[error("invalid synthetic configuration: {reason}")]
    InvalidConfig {
        /// Which constraint was violated.
        reason: &'static str,
    },
    /// The synthetic degree sequence was rejected.
    #[error("degree sequence rejected: {0}")]
    DegreeSequence(#[from] DegreeSequenceError),
    /// The synthetic observed graph was malformed.
    #[error("observed graph rejected: {0}")]
    Graph(#[from] GraphError),
    /// Null-model configuration failed.
    #[error("null model configuration failed: {0}")]
    NullModel(#[from] NullModelError),
}
