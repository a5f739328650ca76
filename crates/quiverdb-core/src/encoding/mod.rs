//! The serialization boundary.
//!
//! Byte layouts belong to the storage and wire layers, not to this crate.
//! What the core provides is:
//!
//! - [`ValueCodec`] - the trait a byte format implements
//! - [`verify_decoded`] - checks a decoded value against its declared type
//! - `serde` derives on every value and on [`Type`](crate::types::Type), so
//!   a codec can be built on any serde format
//!
//! # Example
//!
//! ```
//! use quiverdb_core::encoding::verify_decoded;
//! use quiverdb_core::{Type, Value};
//!
//! let decoded = Value::from(7_i32);
//! assert!(verify_decoded(decoded.clone(), &Type::Int).is_ok());
//! assert!(verify_decoded(decoded, &Type::Long).is_err());
//! ```

mod traits;

#[cfg(test)]
mod proptest_tests;

pub use traits::{verify_decoded, ValueCodec};

#[cfg(test)]
pub(crate) mod json {
    //! A `serde_json` codec used by the tests.

    use super::{verify_decoded, ValueCodec};
    use crate::error::CoreError;
    use crate::types::Type;
    use crate::values::Value;

    pub(crate) struct JsonCodec;

    impl ValueCodec for JsonCodec {
        fn encode(&self, value: &Value) -> Result<Vec<u8>, CoreError> {
            value.check_storable()?;
            serde_json::to_vec(value).map_err(|e| CoreError::Encoding(e.to_string()))
        }

        fn decode(&self, bytes: &[u8], ty: &Type) -> Result<Value, CoreError> {
            let value = serde_json::from_slice(bytes).map_err(|e| CoreError::Encoding(e.to_string()))?;
            verify_decoded(value, ty)
        }
    }
}
