use thiserror::Error;

/// Custom error type for the NeuraConv toolkit.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum NeuraConvError {
    /// Bad enum value (activation / init name) or invalid hyper-parameter.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    /// Optimizer lookup of a layer name that was never registered.
    #[error("Layer '{name}' not found in registry")]
    NotFound { name: String },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Index out of bounds: index {index:?} for shape {shape:?}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    #[error("Failed to acquire {lock_type} lock: {reason}")]
    LockError { lock_type: String, reason: String },
}

impl NeuraConvError {
    /// Shorthand for a `ShapeMismatch` raised by `operation`.
    pub(crate) fn shape_mismatch(
        expected: impl Into<Vec<usize>>,
        actual: impl Into<Vec<usize>>,
        operation: &str,
    ) -> Self {
        NeuraConvError::ShapeMismatch {
            expected: expected.into(),
            actual: actual.into(),
            operation: operation.to_string(),
        }
    }
}
