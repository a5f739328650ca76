//! The contract between values and an external byte format.

use crate::error::CoreError;
use crate::types::Type;
use crate::values::Value;

/// A byte format for [`Value`]s.
///
/// The core defines no layout of its own. Implementations decode against
/// the [`Type`] recorded next to the bytes, typically rebuilt from a stored
/// [`TypeDescriptor`](crate::types::TypeDescriptor).
pub trait ValueCodec {
    /// Encode a value to bytes.
    ///
    /// Implementations must call [`Value::check_storable`] first.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ReservedSentinel`] for null sentinels, or an
    /// [`CoreError::Encoding`] error if the format cannot represent the value.
    fn encode(&self, value: &Value) -> Result<Vec<u8>, CoreError>;

    /// Decode a value of type `ty` from bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are malformed or do not hold a `ty`.
    fn decode(&self, bytes: &[u8], ty: &Type) -> Result<Value, CoreError>;
}

/// Checks that a decoded value is an instance of its declared type.
///
/// # Errors
///
/// Returns [`CoreError::TypeMismatch`] naming both types and the value.
pub fn verify_decoded(value: Value, ty: &Type) -> Result<Value, CoreError> {
    if value.conforms_to(ty) {
        Ok(value)
    } else {
        Err(CoreError::type_mismatch_with_value(
            ty.to_string(),
            value.value_type().to_string(),
            &value,
        ))
    }
}
