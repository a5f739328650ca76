//! `QuiverDB` Core
//!
//! This crate provides the value types that flow through `QuiverDB`: typed
//! scalars, complex numbers and fixed-dimension vectors, together with the
//! type registry that identifies them durably.
//!
//! # Overview
//!
//! - **Type registry**: [`Type`] and [`TypeDescriptor`], the stable
//!   `(ordinal, logical size)` identity of every concrete kind
//! - **Values**: the [`Value`] union over booleans, integer and floating
//!   widths, dates, strings, byte strings, UUIDs, complex numbers and vectors
//! - **Vectors**: [`VectorValue`], with elementwise arithmetic under a shared
//!   promotion lattice and built-in unweighted distances
//! - **Numeric kernel**: the [`Element`] trait family that every width shares
//!
//! # Example
//!
//! ```
//! use quiverdb_core::{CoreError, IntValue, Type, Value, VectorValue};
//!
//! // Narrowing truncates in two's complement
//! assert_eq!(IntValue::new(200).as_byte().as_int().value(), -56);
//!
//! // Mixed element kinds promote before an elementwise operation
//! let ints = VectorValue::from(vec![1_i32, 2, 3]);
//! let floats = VectorValue::from(vec![0.5_f32, 0.5, 0.5]);
//! let sum = ints.add(&floats).unwrap();
//! assert_eq!(sum.value_type(), Type::FloatVector(3));
//!
//! // Every binary vector operation checks dimensions
//! let short = VectorValue::from(vec![1.0_f64, 2.0]);
//! assert_eq!(ints.l2(&short), Err(CoreError::dimension_mismatch(3, 2)));
//!
//! // Scalars promote too
//! let v = Value::from(2_i32).mul(&Value::from(1.5_f64)).unwrap();
//! assert_eq!(v, Value::from(3.0_f64));
//! ```
//!
//! # Modules
//!
//! - [`types`] - The type registry ([`Type`], [`TypeDescriptor`])
//! - [`values`] - Scalar, complex and vector values
//! - [`kernels`] - Scalar reference kernels over primitive slices
//! - [`encoding`] - The codec contract for external serialization
//! - [`error`] - Error types ([`CoreError`])

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod encoding;
pub mod error;
pub mod kernels;
pub mod types;
pub mod values;

// Re-export commonly used types
pub use error::CoreError;
pub use types::{Type, TypeDescriptor};
pub use values::{
    BooleanValue, ByteStringValue, ByteValue, Complex32Value, Complex64Value, ComplexValue,
    DateValue, DoubleValue, Element, FloatValue, IntValue, LongValue, NumericKind, RealValue,
    ShortValue, StringValue, UuidValue, Value, VectorValue,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn values_are_send_and_sync() {
        assert_send_sync::<Value>();
        assert_send_sync::<VectorValue>();
        assert_send_sync::<Complex64Value>();
        assert_send_sync::<Type>();
        assert_send_sync::<CoreError>();
    }
}
