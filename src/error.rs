//! Error types for orthogonalization.

use thiserror::Error;

/// Orthogonalization error types.
///
/// A vanishing residual is not an error at the kernel level: the kernels
/// return the residual norm and let the caller decide. Only
/// [`IncrementalBasis`](crate::IncrementalBasis) turns it into
/// [`OrthoError::DegenerateResidual`].
#[derive(Error, Debug)]
pub enum OrthoError {
    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Target vector length differs from the basis column length
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A column of a sequence basis has the wrong length
    #[error("Basis column {column} has length {got}, expected {expected}")]
    RaggedBasis {
        column: usize,
        expected: usize,
        got: usize,
    },

    /// Scratch buffer length differs from the basis column count
    #[error("{buffer} buffer holds {got} coefficients, basis has {expected} columns")]
    BufferMismatch {
        buffer: &'static str,
        expected: usize,
        got: usize,
    },

    /// Incremental basis has no free column left
    #[error("Basis is full: capacity of {capacity} columns reached")]
    CapacityExceeded { capacity: usize },

    /// Residual norm vanished or is not finite
    #[error("Degenerate residual for column {column}: norm {norm}")]
    DegenerateResidual { column: usize, norm: f64 },

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for orthogonalization operations.
pub type Result<T> = std::result::Result<T, OrthoError>;
