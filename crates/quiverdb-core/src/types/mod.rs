//! The type registry.
//!
//! Every concrete value kind is identified by a [`Type`]. The pair returned by
//! [`Type::descriptor`] (ordinal plus logical size) is what external
//! persistence stores, so ordinals are append-only: a new kind always gets the
//! next free ordinal and existing ordinals are never reassigned.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::values::{NumericKind, Value, VectorValue};

/// The durable identity of a concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// The stable ordinal of the type.
    pub ordinal: u32,
    /// The number of semantic elements, `None` where it varies per value.
    pub logical_size: Option<usize>,
}

/// A concrete value type.
///
/// Vector variants carry their dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    /// A boolean.
    Boolean,
    /// An 8-bit signed integer.
    Byte,
    /// A 16-bit signed integer.
    Short,
    /// A 32-bit signed integer.
    Int,
    /// A 64-bit signed integer.
    Long,
    /// Milliseconds since the Unix epoch.
    Date,
    /// A 32-bit float.
    Float,
    /// A 64-bit float.
    Double,
    /// A UTF-8 string.
    String,
    /// A complex number with 32-bit components.
    Complex32,
    /// A complex number with 64-bit components.
    Complex64,
    /// A vector of 32-bit integers.
    IntVector(usize),
    /// A vector of 64-bit integers.
    LongVector(usize),
    /// A vector of 32-bit floats.
    FloatVector(usize),
    /// A vector of 64-bit floats.
    DoubleVector(usize),
    /// A vector of booleans.
    BooleanVector(usize),
    /// A vector of complex numbers with 32-bit components.
    Complex32Vector(usize),
    /// A vector of complex numbers with 64-bit components.
    Complex64Vector(usize),
    /// An opaque byte string.
    ByteString,
    /// A 128-bit UUID.
    Uuid,
    /// A vector of 16-bit integers.
    ShortVector(usize),
    /// A vector of half-precision floats.
    HalfVector(usize),
    /// A vector of 8-bit integers.
    ByteVector(usize),
}

impl Type {
    /// Returns the type for an ordinal.
    ///
    /// `logical_size` is only consulted for vector ordinals.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownType`] if no type has this ordinal.
    pub fn for_ordinal(ordinal: u32, logical_size: usize) -> Result<Self, CoreError> {
        let ty = match ordinal {
            0 => Self::Boolean,
            1 => Self::Byte,
            2 => Self::Short,
            3 => Self::Int,
            4 => Self::Long,
            5 => Self::Date,
            6 => Self::Float,
            7 => Self::Double,
            8 => Self::String,
            9 => Self::Complex32,
            10 => Self::Complex64,
            11 => Self::IntVector(logical_size),
            12 => Self::LongVector(logical_size),
            13 => Self::FloatVector(logical_size),
            14 => Self::DoubleVector(logical_size),
            15 => Self::BooleanVector(logical_size),
            16 => Self::Complex32Vector(logical_size),
            17 => Self::Complex64Vector(logical_size),
            18 => Self::ByteString,
            19 => Self::Uuid,
            20 => Self::ShortVector(logical_size),
            21 => Self::HalfVector(logical_size),
            22 => Self::ByteVector(logical_size),
            other => return Err(CoreError::UnknownType(format!("ordinal {other}"))),
        };
        Ok(ty)
    }

    /// Returns the type for a name, ignoring case.
    ///
    /// Both the short vector names (`FLOAT_VEC`) and the long ones
    /// (`FLOAT_VECTOR`) are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownType`] if the name is not recognised.
    pub fn for_name(name: &str, logical_size: usize) -> Result<Self, CoreError> {
        let ty = match name.to_ascii_uppercase().as_str() {
            "BOOLEAN" | "BOOL" => Self::Boolean,
            "BYTE" => Self::Byte,
            "SHORT" => Self::Short,
            "INT" | "INTEGER" => Self::Int,
            "LONG" => Self::Long,
            "DATE" => Self::Date,
            "FLOAT" => Self::Float,
            "DOUBLE" => Self::Double,
            "STRING" => Self::String,
            "COMPLEX32" => Self::Complex32,
            "COMPLEX64" => Self::Complex64,
            "INT_VEC" | "INTEGER_VECTOR" => Self::IntVector(logical_size),
            "LONG_VEC" | "LONG_VECTOR" => Self::LongVector(logical_size),
            "FLOAT_VEC" | "FLOAT_VECTOR" => Self::FloatVector(logical_size),
            "DOUBLE_VEC" | "DOUBLE_VECTOR" => Self::DoubleVector(logical_size),
            "BOOL_VEC" | "BOOLEAN_VECTOR" => Self::BooleanVector(logical_size),
            "COMPLEX32_VEC" | "COMPLEX32_VECTOR" => Self::Complex32Vector(logical_size),
            "COMPLEX64_VEC" | "COMPLEX64_VECTOR" => Self::Complex64Vector(logical_size),
            "BYTESTRING" | "BYTE_STRING" => Self::ByteString,
            "UUID" => Self::Uuid,
            "SHORT_VEC" | "SHORT_VECTOR" => Self::ShortVector(logical_size),
            "HALF_VEC" | "HALF_VECTOR" => Self::HalfVector(logical_size),
            "BYTE_VEC" | "BYTE_VECTOR" => Self::ByteVector(logical_size),
            _ => return Err(CoreError::UnknownType(name.to_owned())),
        };
        Ok(ty)
    }

    /// The stable ordinal of this type.
    #[must_use]
    pub const fn ordinal(&self) -> u32 {
        match self {
            Self::Boolean => 0,
            Self::Byte => 1,
            Self::Short => 2,
            Self::Int => 3,
            Self::Long => 4,
            Self::Date => 5,
            Self::Float => 6,
            Self::Double => 7,
            Self::String => 8,
            Self::Complex32 => 9,
            Self::Complex64 => 10,
            Self::IntVector(_) => 11,
            Self::LongVector(_) => 12,
            Self::FloatVector(_) => 13,
            Self::DoubleVector(_) => 14,
            Self::BooleanVector(_) => 15,
            Self::Complex32Vector(_) => 16,
            Self::Complex64Vector(_) => 17,
            Self::ByteString => 18,
            Self::Uuid => 19,
            Self::ShortVector(_) => 20,
            Self::HalfVector(_) => 21,
            Self::ByteVector(_) => 22,
        }
    }

    /// The canonical name of this type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "BOOLEAN",
            Self::Byte => "BYTE",
            Self::Short => "SHORT",
            Self::Int => "INTEGER",
            Self::Long => "LONG",
            Self::Date => "DATE",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::String => "STRING",
            Self::Complex32 => "COMPLEX32",
            Self::Complex64 => "COMPLEX64",
            Self::IntVector(_) => "INT_VEC",
            Self::LongVector(_) => "LONG_VEC",
            Self::FloatVector(_) => "FLOAT_VEC",
            Self::DoubleVector(_) => "DOUBLE_VEC",
            Self::BooleanVector(_) => "BOOL_VEC",
            Self::Complex32Vector(_) => "COMPLEX32_VEC",
            Self::Complex64Vector(_) => "COMPLEX64_VEC",
            Self::ByteString => "BYTESTRING",
            Self::Uuid => "UUID",
            Self::ShortVector(_) => "SHORT_VEC",
            Self::HalfVector(_) => "HALF_VEC",
            Self::ByteVector(_) => "BYTE_VEC",
        }
    }

    /// The number of semantic elements of a value of this type.
    ///
    /// Returns `None` for strings and byte strings, whose size varies per value.
    #[must_use]
    pub const fn logical_size(&self) -> Option<usize> {
        match self {
            Self::String | Self::ByteString => None,
            Self::IntVector(d)
            | Self::LongVector(d)
            | Self::FloatVector(d)
            | Self::DoubleVector(d)
            | Self::BooleanVector(d)
            | Self::Complex32Vector(d)
            | Self::Complex64Vector(d)
            | Self::ShortVector(d)
            | Self::HalfVector(d)
            | Self::ByteVector(d) => Some(*d),
            _ => Some(1),
        }
    }

    /// The number of bytes a value of this type occupies, `None` if it varies.
    #[must_use]
    pub const fn physical_size(&self) -> Option<usize> {
        let size = match self {
            Self::String | Self::ByteString => return None,
            Self::Boolean | Self::Byte => 1,
            Self::Short => 2,
            Self::Int | Self::Float => 4,
            Self::Long | Self::Date | Self::Double | Self::Complex32 => 8,
            Self::Complex64 | Self::Uuid => 16,
            Self::BooleanVector(d) | Self::ByteVector(d) => *d,
            Self::ShortVector(d) | Self::HalfVector(d) => 2 * *d,
            Self::IntVector(d) | Self::FloatVector(d) => 4 * *d,
            Self::LongVector(d) | Self::DoubleVector(d) | Self::Complex32Vector(d) => 8 * *d,
            Self::Complex64Vector(d) => 16 * *d,
        };
        Some(size)
    }

    /// The durable `(ordinal, logical size)` pair of this type.
    #[must_use]
    pub const fn descriptor(&self) -> TypeDescriptor {
        TypeDescriptor { ordinal: self.ordinal(), logical_size: self.logical_size() }
    }

    /// Returns `true` for vector types.
    #[must_use]
    pub const fn is_vector(&self) -> bool {
        self.vector_kind().is_some()
    }

    /// Returns `true` for types whose values support arithmetic.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        match self {
            Self::Byte
            | Self::Short
            | Self::Int
            | Self::Long
            | Self::Float
            | Self::Double
            | Self::Complex32
            | Self::Complex64 => true,
            _ => matches!(self.vector_kind(), Some(kind) if !matches!(kind, NumericKind::Boolean)),
        }
    }

    /// Returns `true` for complex scalars and complex vectors.
    #[must_use]
    pub const fn is_complex(&self) -> bool {
        matches!(
            self,
            Self::Complex32 | Self::Complex64 | Self::Complex32Vector(_) | Self::Complex64Vector(_)
        )
    }

    /// The element kind of a vector type.
    #[must_use]
    pub const fn vector_kind(&self) -> Option<NumericKind> {
        let kind = match self {
            Self::BooleanVector(_) => NumericKind::Boolean,
            Self::ByteVector(_) => NumericKind::Byte,
            Self::ShortVector(_) => NumericKind::Short,
            Self::IntVector(_) => NumericKind::Int,
            Self::LongVector(_) => NumericKind::Long,
            Self::HalfVector(_) => NumericKind::Half,
            Self::FloatVector(_) => NumericKind::Float,
            Self::DoubleVector(_) => NumericKind::Double,
            Self::Complex32Vector(_) => NumericKind::Complex32,
            Self::Complex64Vector(_) => NumericKind::Complex64,
            _ => return None,
        };
        Some(kind)
    }

    /// The scalar type of a single vector element.
    ///
    /// Half-precision elements surface as [`Type::Float`].
    #[must_use]
    pub const fn element_type(&self) -> Option<Self> {
        match self.vector_kind() {
            Some(kind) => Some(kind.scalar_type()),
            None => None,
        }
    }

    /// The zero value of this type.
    #[must_use]
    pub fn default_value(&self) -> Value {
        match self.vector_kind() {
            Some(kind) => Value::Vector(VectorValue::zeros(kind, self.logical_size().unwrap_or(0))),
            None => Value::default_for_scalar(*self),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.vector_kind().and(self.logical_size()) {
            Some(d) => write!(f, "{}({d})", self.name()),
            None => f.write_str(self.name()),
        }
    }
}
