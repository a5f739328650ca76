//! Scalar and vector values.
//!
//! [`Value`] is the closed union of every concrete value kind. Values are
//! immutable; arithmetic and conversions build new values.
//!
//! # Equality and ordering
//!
//! `==` requires the same variant and bit-identical payloads, so
//! `Value::from(1_i32) != Value::from(1_i64)` and `NaN == NaN`. A total
//! order ([`Value::compare`]) only exists within one comparable family:
//! real numerics (across widths), booleans, dates, strings, byte strings,
//! UUIDs, and vectors of one real element kind.

mod complex;
mod element;
mod real;
mod scalar;
pub mod vector;

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::Type;

pub use complex::{Complex32Value, Complex64Value, ComplexValue};
pub(crate) use element::BinaryOp;
pub use element::{Arith, Element, Float, NumericKind, RealWidth};
pub use real::{
    ByteValue, DoubleValue, FloatValue, IntValue, LongValue, RealValue, ShortValue,
};
pub use scalar::{BooleanValue, ByteStringValue, DateValue, StringValue, UuidValue};
pub use vector::{ComplexLane, ComplexVector, Lane, PrimitiveVector, VectorValue};

/// A value of any concrete type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// A boolean.
    Boolean(BooleanValue),
    /// An 8-bit integer.
    Byte(ByteValue),
    /// A 16-bit integer.
    Short(ShortValue),
    /// A 32-bit integer.
    Int(IntValue),
    /// A 64-bit integer.
    Long(LongValue),
    /// Milliseconds since the Unix epoch.
    Date(DateValue),
    /// A 32-bit float.
    Float(FloatValue),
    /// A 64-bit float.
    Double(DoubleValue),
    /// A UTF-8 string.
    String(StringValue),
    /// A complex number with 32-bit components.
    Complex32(Complex32Value),
    /// A complex number with 64-bit components.
    Complex64(Complex64Value),
    /// An opaque byte string.
    ByteString(ByteStringValue),
    /// A UUID.
    Uuid(UuidValue),
    /// A fixed-dimension vector.
    Vector(VectorValue),
}

impl Value {
    /// The concrete type of this value.
    #[must_use]
    pub fn value_type(&self) -> Type {
        match self {
            Self::Boolean(_) => Type::Boolean,
            Self::Byte(_) => Type::Byte,
            Self::Short(_) => Type::Short,
            Self::Int(_) => Type::Int,
            Self::Long(_) => Type::Long,
            Self::Date(_) => Type::Date,
            Self::Float(_) => Type::Float,
            Self::Double(_) => Type::Double,
            Self::String(_) => Type::String,
            Self::Complex32(_) => Type::Complex32,
            Self::Complex64(_) => Type::Complex64,
            Self::ByteString(_) => Type::ByteString,
            Self::Uuid(_) => Type::Uuid,
            Self::Vector(v) => v.value_type(),
        }
    }

    /// The number of semantic elements.
    ///
    /// Characters for strings, bytes for byte strings, the dimension for
    /// vectors and 1 for everything else.
    #[must_use]
    pub fn logical_size(&self) -> usize {
        match self {
            Self::String(s) => s.logical_size(),
            Self::ByteString(b) => b.logical_size(),
            Self::Vector(v) => v.logical_size(),
            _ => 1,
        }
    }

    /// Returns `true` if this value is an instance of `ty`.
    ///
    /// Vector types must match in dimension as well as element kind.
    #[must_use]
    pub fn conforms_to(&self, ty: &Type) -> bool {
        self.value_type() == *ty
    }

    /// The numeric kind of a numeric or boolean scalar.
    ///
    /// Returns `None` for vectors and non-numeric scalars.
    #[must_use]
    pub const fn numeric_kind(&self) -> Option<NumericKind> {
        let kind = match self {
            Self::Boolean(_) => NumericKind::Boolean,
            Self::Byte(_) => NumericKind::Byte,
            Self::Short(_) => NumericKind::Short,
            Self::Int(_) => NumericKind::Int,
            Self::Long(_) => NumericKind::Long,
            Self::Float(_) => NumericKind::Float,
            Self::Double(_) => NumericKind::Double,
            Self::Complex32(_) => NumericKind::Complex32,
            Self::Complex64(_) => NumericKind::Complex64,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns `true` for boolean, real and complex scalars.
    #[inline]
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        self.numeric_kind().is_some()
    }

    /// Returns the value as a boolean if it is one.
    #[inline]
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(b.value()),
            _ => None,
        }
    }

    /// Returns the value as a string slice if it is one.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the value as a vector if it is one.
    #[inline]
    #[must_use]
    pub const fn as_vector(&self) -> Option<&VectorValue> {
        match self {
            Self::Vector(v) => Some(v),
            _ => None,
        }
    }

    /// Converts a numeric scalar to lane type `T`.
    ///
    /// Booleans read as 0 or 1 and complex numbers contribute their real part.
    pub(crate) fn lane<T: Element>(&self) -> Result<T, CoreError> {
        let lane = match self {
            Self::Boolean(b) => T::cast(b.value()),
            Self::Byte(v) => T::cast(v.value()),
            Self::Short(v) => T::cast(v.value()),
            Self::Int(v) => T::cast(v.value()),
            Self::Long(v) => T::cast(v.value()),
            Self::Float(v) => T::cast(v.value()),
            Self::Double(v) => T::cast(v.value()),
            Self::Complex32(z) => T::cast(z.re()),
            Self::Complex64(z) => T::cast(z.re()),
            other => {
                return Err(CoreError::invalid_conversion(
                    other.value_type(),
                    T::KIND.scalar_type(),
                ))
            }
        };
        Ok(lane)
    }

    /// Converts to a byte, truncating wider values.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConversion`] for non-numeric values.
    pub fn as_byte(&self) -> Result<ByteValue, CoreError> {
        self.lane().map(RealValue::new)
    }

    /// Converts to a short, truncating wider values.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConversion`] for non-numeric values.
    pub fn as_short(&self) -> Result<ShortValue, CoreError> {
        self.lane().map(RealValue::new)
    }

    /// Converts to an int.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConversion`] for non-numeric values.
    pub fn as_int(&self) -> Result<IntValue, CoreError> {
        self.lane().map(RealValue::new)
    }

    /// Converts to a long.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConversion`] for non-numeric values.
    pub fn as_long(&self) -> Result<LongValue, CoreError> {
        self.lane().map(RealValue::new)
    }

    /// Converts to a float.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConversion`] for non-numeric values.
    pub fn as_float(&self) -> Result<FloatValue, CoreError> {
        self.lane().map(RealValue::new)
    }

    /// Converts to a double.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConversion`] for non-numeric values.
    pub fn as_double(&self) -> Result<DoubleValue, CoreError> {
        self.lane().map(RealValue::new)
    }

    /// Converts to a complex number; real values get a zero imaginary part.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConversion`] for non-numeric values.
    pub fn as_complex32(&self) -> Result<Complex32Value, CoreError> {
        match self {
            Self::Complex32(z) => Ok(*z),
            Self::Complex64(z) => Ok(z.cast()),
            other => other.lane().map(ComplexValue::from_real),
        }
    }

    /// Converts to a complex number; real values get a zero imaginary part.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConversion`] for non-numeric values.
    pub fn as_complex64(&self) -> Result<Complex64Value, CoreError> {
        match self {
            Self::Complex32(z) => Ok(z.cast()),
            Self::Complex64(z) => Ok(*z),
            other => other.lane().map(ComplexValue::from_real),
        }
    }

    /// The total order within a comparable family.
    ///
    /// Two integer widths compare exactly; if either side is a float, both
    /// compare by the IEEE total order on `f64`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnsupportedComparison`] across families and for
    /// complex values.
    pub fn compare(&self, other: &Self) -> Result<Ordering, CoreError> {
        let unsupported = || CoreError::unsupported_comparison(self.value_type(), other.value_type());
        match (self, other) {
            (Self::Boolean(a), Self::Boolean(b)) => Ok(a.cmp(b)),
            (Self::Date(a), Self::Date(b)) => Ok(a.cmp(b)),
            (Self::String(a), Self::String(b)) => Ok(a.cmp(b)),
            (Self::ByteString(a), Self::ByteString(b)) => Ok(a.cmp(b)),
            (Self::Uuid(a), Self::Uuid(b)) => Ok(a.cmp(b)),
            (Self::Vector(a), Self::Vector(b)) => a.compare(b),
            _ => match (self.real_kind(), other.real_kind()) {
                (Some(a), Some(b)) if a.is_integral() && b.is_integral() => {
                    Ok(self.lane::<i64>()?.cmp(&other.lane::<i64>()?))
                }
                (Some(_), Some(_)) => Ok(f64::total_cmp(&self.lane::<f64>()?, &other.lane::<f64>()?)),
                _ => Err(unsupported()),
            },
        }
    }

    /// Returns `true` for the same variant with a bit-identical payload.
    #[must_use]
    pub fn is_equal(&self, other: &Self) -> bool {
        self == other
    }

    /// `self + other` after promotion.
    ///
    /// A vector operand makes the result a vector; a scalar is broadcast.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnsupportedOperation`] for non-numeric operands
    /// and [`CoreError::DimensionMismatch`] for vectors of different sizes.
    pub fn add(&self, other: &Self) -> Result<Self, CoreError> {
        self.binary(other, BinaryOp::Add)
    }

    /// `self - other` after promotion.
    ///
    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn sub(&self, other: &Self) -> Result<Self, CoreError> {
        self.binary(other, BinaryOp::Sub)
    }

    /// `self * other` after promotion.
    ///
    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn mul(&self, other: &Self) -> Result<Self, CoreError> {
        self.binary(other, BinaryOp::Mul)
    }

    /// `self / other` after promotion.
    ///
    /// # Errors
    ///
    /// See [`add`](Self::add); integer division by zero returns
    /// [`CoreError::DivisionByZero`].
    pub fn div(&self, other: &Self) -> Result<Self, CoreError> {
        self.binary(other, BinaryOp::Div)
    }

    /// Returns `true` if this is the reserved null sentinel of its width.
    #[must_use]
    pub fn is_null_sentinel(&self) -> bool {
        match self {
            Self::Byte(v) => v.is_null_sentinel(),
            Self::Short(v) => v.is_null_sentinel(),
            Self::Int(v) => v.is_null_sentinel(),
            Self::Long(v) => v.is_null_sentinel(),
            Self::Float(v) => v.is_null_sentinel(),
            Self::Double(v) => v.is_null_sentinel(),
            Self::Date(d) => d.is_null_sentinel(),
            _ => false,
        }
    }

    /// Checks that this value may be handed to storage.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ReservedSentinel`] for a null sentinel.
    pub fn check_storable(&self) -> Result<(), CoreError> {
        if self.is_null_sentinel() {
            return Err(CoreError::ReservedSentinel { type_name: self.value_type().to_string() });
        }
        Ok(())
    }

    pub(crate) fn default_for_scalar(ty: Type) -> Self {
        match ty {
            Type::Boolean => Self::Boolean(BooleanValue::FALSE),
            Type::Byte => Self::Byte(ByteValue::ZERO),
            Type::Short => Self::Short(ShortValue::ZERO),
            Type::Int => Self::Int(IntValue::ZERO),
            Type::Long => Self::Long(LongValue::ZERO),
            Type::Date => Self::Date(DateValue::EPOCH),
            Type::Float => Self::Float(FloatValue::ZERO),
            Type::Double => Self::Double(DoubleValue::ZERO),
            Type::String => Self::String(StringValue::new("")),
            Type::Complex32 => Self::Complex32(Complex32Value::ZERO),
            Type::Complex64 => Self::Complex64(Complex64Value::ZERO),
            Type::ByteString => Self::ByteString(ByteStringValue::new(Vec::new())),
            Type::Uuid => Self::Uuid(UuidValue::new(Uuid::nil())),
            vector => vector.default_value(),
        }
    }

    /// The kind of a real numeric scalar; booleans and complex numbers are
    /// excluded.
    fn real_kind(&self) -> Option<NumericKind> {
        self.numeric_kind().filter(|k| !k.is_complex() && *k != NumericKind::Boolean)
    }

    fn binary(&self, other: &Self, op: BinaryOp) -> Result<Self, CoreError> {
        let vector_op = |a: &VectorValue, b: &VectorValue| match op {
            BinaryOp::Add => a.add(b),
            BinaryOp::Sub => a.sub(b),
            BinaryOp::Mul => a.mul(b),
            BinaryOp::Div => a.div(b),
        };
        match (self, other) {
            (Self::Vector(a), Self::Vector(b)) => vector_op(a, b).map(Self::Vector),
            (Self::Vector(a), scalar) => {
                let result = match op {
                    BinaryOp::Add => a.add_scalar(scalar),
                    BinaryOp::Sub => a.sub_scalar(scalar),
                    BinaryOp::Mul => a.mul_scalar(scalar),
                    BinaryOp::Div => a.div_scalar(scalar),
                };
                result.map(Self::Vector)
            }
            (scalar, Self::Vector(b)) => {
                let kind = scalar
                    .numeric_kind()
                    .ok_or_else(|| CoreError::unsupported_operation(op.name(), scalar.value_type()))?;
                let filled = VectorValue::from_values(kind, &vec![scalar.clone(); b.logical_size()])?;
                vector_op(&filled, b).map(Self::Vector)
            }
            (a, b) => a.scalar_binary(b, op),
        }
    }

    fn scalar_binary(&self, other: &Self, op: BinaryOp) -> Result<Self, CoreError> {
        let kind_of = |v: &Self| {
            v.numeric_kind().ok_or_else(|| CoreError::unsupported_operation(op.name(), v.value_type()))
        };
        let kind = kind_of(self)?.promote(kind_of(other)?);
        let value = match kind {
            NumericKind::Byte => Self::Byte(self.real_binary(other, op)?),
            NumericKind::Short => Self::Short(self.real_binary(other, op)?),
            NumericKind::Int | NumericKind::Boolean => Self::Int(self.real_binary(other, op)?),
            NumericKind::Long => Self::Long(self.real_binary(other, op)?),
            NumericKind::Half | NumericKind::Float => Self::Float(self.real_binary(other, op)?),
            NumericKind::Double => Self::Double(self.real_binary(other, op)?),
            NumericKind::Complex32 => {
                Self::Complex32(op.apply_complex(self.as_complex32()?, other.as_complex32()?))
            }
            NumericKind::Complex64 => {
                Self::Complex64(op.apply_complex(self.as_complex64()?, other.as_complex64()?))
            }
        };
        Ok(value)
    }

    fn real_binary<T: RealWidth>(&self, other: &Self, op: BinaryOp) -> Result<RealValue<T>, CoreError> {
        op.apply(self.lane::<T>()?, other.lane::<T>()?).map(RealValue::new)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(v) => v.fmt(f),
            Self::Byte(v) => v.fmt(f),
            Self::Short(v) => v.fmt(f),
            Self::Int(v) => v.fmt(f),
            Self::Long(v) => v.fmt(f),
            Self::Date(v) => v.fmt(f),
            Self::Float(v) => v.fmt(f),
            Self::Double(v) => v.fmt(f),
            Self::String(v) => v.fmt(f),
            Self::Complex32(v) => v.fmt(f),
            Self::Complex64(v) => v.fmt(f),
            Self::ByteString(v) => v.fmt(f),
            Self::Uuid(v) => v.fmt(f),
            Self::Vector(v) => v.fmt(f),
        }
    }
}

macro_rules! value_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for Value {
                #[inline]
                fn from(value: $source) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

value_from! {
    bool => Boolean,
    BooleanValue => Boolean,
    i8 => Byte,
    ByteValue => Byte,
    i16 => Short,
    ShortValue => Short,
    i32 => Int,
    IntValue => Int,
    i64 => Long,
    LongValue => Long,
    f32 => Float,
    FloatValue => Float,
    f64 => Double,
    DoubleValue => Double,
    DateValue => Date,
    &str => String,
    String => String,
    StringValue => String,
    Complex32Value => Complex32,
    Complex64Value => Complex64,
    Vec<u8> => ByteString,
    ByteStringValue => ByteString,
    Uuid => Uuid,
    UuidValue => Uuid,
    VectorValue => Vector,
}
