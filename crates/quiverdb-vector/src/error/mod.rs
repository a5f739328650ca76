//! Error types for the vector crate.

use quiverdb_core::CoreError;
use thiserror::Error;

/// Errors that can occur when evaluating a distance kernel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistanceError {
    /// Dimension mismatch between the operands, or between an operand and its weights.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The dimension of the left operand.
        expected: usize,
        /// The dimension of the offending operand.
        actual: usize,
    },

    /// The kernel has no definition for this element kind.
    #[error("kernel '{kernel}' does not support {type_name}")]
    UnsupportedType {
        /// The kernel name.
        kernel: &'static str,
        /// The rejected type.
        type_name: String,
    },

    /// The kernel only accepts one fixed dimension.
    #[error("kernel '{kernel}' requires dimension {expected}, got {actual}")]
    InvalidDimension {
        /// The kernel name.
        kernel: &'static str,
        /// The required dimension.
        expected: usize,
        /// The actual dimension.
        actual: usize,
    },

    /// No kernel goes by this name.
    #[error("unknown distance kernel: {0}")]
    UnknownKernel(String),

    /// Error raised by a value operation.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl DistanceError {
    /// Create an unsupported type error.
    pub fn unsupported_type(kernel: &'static str, type_name: impl ToString) -> Self {
        Self::UnsupportedType { kernel, type_name: type_name.to_string() }
    }
}

/// Result alias for distance kernels.
pub type Result<T> = std::result::Result<T, DistanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = DistanceError::DimensionMismatch { expected: 3, actual: 4 };
        assert_eq!(err.to_string(), "dimension mismatch: expected 3, got 4");

        let err = DistanceError::unsupported_type("chisquared", "COMPLEX64_VEC(2)");
        assert_eq!(err.to_string(), "kernel 'chisquared' does not support COMPLEX64_VEC(2)");

        let err = DistanceError::InvalidDimension { kernel: "haversine", expected: 2, actual: 3 };
        assert!(err.to_string().contains("requires dimension 2"));
    }

    #[test]
    fn test_core_errors_are_wrapped() {
        let err: DistanceError = CoreError::DivisionByZero.into();
        assert!(matches!(err, DistanceError::Core(CoreError::DivisionByZero)));
    }
}
