//! Error types for the core crate.

use thiserror::Error;

/// Maximum length for value display in error messages.
const MAX_VALUE_DISPLAY_LEN: usize = 100;

/// Errors that can occur in the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Two vector operands (or a vector and its weights) differ in logical size.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// The logical size of the left operand.
        expected: usize,
        /// The logical size of the right operand.
        actual: usize,
    },

    /// A total ordering was requested between values that have none.
    #[error("cannot compare {left} with {right}")]
    UnsupportedComparison {
        /// Type of the left operand.
        left: String,
        /// Type of the right operand.
        right: String,
    },

    /// A conversion between kinds that has no defined meaning.
    #[error("cannot convert {from} to {to}")]
    InvalidConversion {
        /// The source type.
        from: String,
        /// The requested target type.
        to: String,
    },

    /// An operation that the given type does not support.
    #[error("operation '{operation}' is not supported for {type_name}")]
    UnsupportedOperation {
        /// The name of the operation.
        operation: &'static str,
        /// The offending type.
        type_name: String,
    },

    /// Integer division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Element or slice access beyond the logical size.
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds {
        /// The requested index (or slice end).
        index: usize,
        /// The logical size.
        len: usize,
    },

    /// A numeric value equal to the reserved null sentinel of its width.
    #[error("value is the reserved null sentinel of {type_name}")]
    ReservedSentinel {
        /// The type whose sentinel was hit.
        type_name: String,
    },

    /// A backing buffer that violates the layout of its kind.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// An unknown type name or ordinal.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// A value type mismatch occurred.
    #[error("type mismatch: expected {expected}, got {actual}{}", value.as_ref().map(|v| format!(" (value: {})", v)).unwrap_or_default())]
    TypeMismatch {
        /// The expected type.
        expected: String,
        /// The actual type.
        actual: String,
        /// The value that caused the mismatch (truncated for display).
        value: Option<String>,
    },

    /// An encoding or decoding error reported by a codec.
    #[error("encoding error: {0}")]
    Encoding(String),
}

impl CoreError {
    /// Creates a dimension mismatch error.
    #[must_use]
    pub const fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Creates an unsupported comparison error.
    #[must_use]
    pub fn unsupported_comparison(left: impl ToString, right: impl ToString) -> Self {
        Self::UnsupportedComparison { left: left.to_string(), right: right.to_string() }
    }

    /// Creates an invalid conversion error.
    #[must_use]
    pub fn invalid_conversion(from: impl ToString, to: impl ToString) -> Self {
        Self::InvalidConversion { from: from.to_string(), to: to.to_string() }
    }

    /// Creates an unsupported operation error.
    #[must_use]
    pub fn unsupported_operation(operation: &'static str, type_name: impl ToString) -> Self {
        Self::UnsupportedOperation { operation, type_name: type_name.to_string() }
    }

    /// Creates a type mismatch error without a value.
    #[must_use]
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch { expected: expected.into(), actual: actual.into(), value: None }
    }

    /// Creates a type mismatch error with a value for debugging.
    ///
    /// The value is truncated to 100 characters for display.
    #[must_use]
    pub fn type_mismatch_with_value(
        expected: impl Into<String>,
        actual: impl Into<String>,
        value: impl std::fmt::Display,
    ) -> Self {
        let value_str = value.to_string();
        let truncated = match value_str.char_indices().nth(MAX_VALUE_DISPLAY_LEN) {
            Some((cut, _)) => format!("{}...", &value_str[..cut]),
            None => value_str,
        };
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
            value: Some(truncated),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_mismatch_message() {
        let err = CoreError::dimension_mismatch(3, 4);
        assert_eq!(err.to_string(), "dimension mismatch: expected 3, got 4");
    }

    #[test]
    fn type_mismatch_truncates_long_values() {
        let long = "x".repeat(250);
        let err = CoreError::type_mismatch_with_value("INTEGER", "STRING", long);
        match err {
            CoreError::TypeMismatch { value: Some(v), .. } => {
                assert_eq!(v.len(), MAX_VALUE_DISPLAY_LEN + 3);
                assert!(v.ends_with("..."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn type_mismatch_without_value() {
        let err = CoreError::type_mismatch("DOUBLE", "STRING");
        assert_eq!(err.to_string(), "type mismatch: expected DOUBLE, got STRING");
    }
}
