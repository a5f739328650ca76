//! The generic numeric element kernel.
//!
//! Every numeric width shares one implementation of conversion, promotion
//! and arithmetic, parameterized by the [`Element`] trait. Integer lanes wrap
//! in two's complement, floating lanes follow IEEE-754.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use half::f16;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Type;
use crate::values::complex::ComplexValue;

/// The numeric kind of a scalar or of a vector's elements.
///
/// Ordered from narrowest to widest within the integral, floating and
/// complex groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericKind {
    /// `bool`, arithmetically 0 or 1.
    Boolean,
    /// `i8`.
    Byte,
    /// `i16`.
    Short,
    /// `i32`.
    Int,
    /// `i64`.
    Long,
    /// `f16`, only as a vector lane.
    Half,
    /// `f32`.
    Float,
    /// `f64`.
    Double,
    /// Two `f32` components.
    Complex32,
    /// Two `f64` components.
    Complex64,
}

impl NumericKind {
    /// Returns `true` for the complex kinds.
    #[must_use]
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::Complex32 | Self::Complex64)
    }

    /// Returns `true` for boolean and the integer widths.
    #[must_use]
    pub const fn is_integral(self) -> bool {
        matches!(self, Self::Boolean | Self::Byte | Self::Short | Self::Int | Self::Long)
    }

    /// The scalar type holding one element of this kind.
    #[must_use]
    pub const fn scalar_type(self) -> Type {
        match self {
            Self::Boolean => Type::Boolean,
            Self::Byte => Type::Byte,
            Self::Short => Type::Short,
            Self::Int => Type::Int,
            Self::Long => Type::Long,
            Self::Half | Self::Float => Type::Float,
            Self::Double => Type::Double,
            Self::Complex32 => Type::Complex32,
            Self::Complex64 => Type::Complex64,
        }
    }

    /// The vector type with elements of this kind.
    #[must_use]
    pub const fn vector_type(self, dimension: usize) -> Type {
        match self {
            Self::Boolean => Type::BooleanVector(dimension),
            Self::Byte => Type::ByteVector(dimension),
            Self::Short => Type::ShortVector(dimension),
            Self::Int => Type::IntVector(dimension),
            Self::Long => Type::LongVector(dimension),
            Self::Half => Type::HalfVector(dimension),
            Self::Float => Type::FloatVector(dimension),
            Self::Double => Type::DoubleVector(dimension),
            Self::Complex32 => Type::Complex32Vector(dimension),
            Self::Complex64 => Type::Complex64Vector(dimension),
        }
    }

    /// The kind two operands are brought to before an arithmetic operation.
    ///
    /// Boolean counts as `Int`. A complex operand makes the result complex;
    /// it is `Complex64` if either side needs 64-bit precision. Half only
    /// survives when both sides are half.
    #[must_use]
    pub const fn promote(self, other: Self) -> Self {
        if self as u8 == other as u8 {
            return match self {
                Self::Boolean => Self::Int,
                same => same,
            };
        }
        let (a, b) = (self.arithmetic(), other.arithmetic());
        if a.is_complex() || b.is_complex() {
            return match (a, b) {
                (Self::Complex64 | Self::Long | Self::Double, _)
                | (_, Self::Complex64 | Self::Long | Self::Double) => Self::Complex64,
                _ => Self::Complex32,
            };
        }
        match (a, b) {
            (Self::Double, _) | (_, Self::Double) => Self::Double,
            (Self::Half | Self::Float, _) | (_, Self::Half | Self::Float) => Self::Float,
            (Self::Long, _) | (_, Self::Long) => Self::Long,
            (Self::Int, _) | (_, Self::Int) => Self::Int,
            (Self::Short, _) | (_, Self::Short) => Self::Short,
            _ => Self::Byte,
        }
    }

    /// Like [`promote`](Self::promote) but keeps equal kinds, boolean included.
    ///
    /// Used where operands are compared rather than combined.
    #[must_use]
    pub const fn unify(self, other: Self) -> Self {
        if self as u8 == other as u8 {
            self
        } else {
            self.promote(other)
        }
    }

    /// The kind of `sum`, `norm2` and `dot` results.
    #[must_use]
    pub const fn aggregate(self) -> Self {
        match self {
            Self::Boolean | Self::Long | Self::Double => Self::Double,
            Self::Byte | Self::Short | Self::Int | Self::Half | Self::Float => Self::Float,
            complex => complex,
        }
    }

    /// The kind of `sqrt` and `pow` results.
    #[must_use]
    pub const fn floating(self) -> Self {
        match self {
            Self::Boolean | Self::Long => Self::Double,
            Self::Byte | Self::Short | Self::Int => Self::Float,
            other => other,
        }
    }

    /// The real kind of one component of this kind.
    #[must_use]
    pub const fn real_part(self) -> Self {
        match self {
            Self::Complex32 => Self::Float,
            Self::Complex64 => Self::Double,
            other => other,
        }
    }

    const fn arithmetic(self) -> Self {
        match self {
            Self::Boolean => Self::Int,
            other => other,
        }
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A primitive lane type.
pub trait Element:
    Copy + PartialEq + PartialOrd + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// The kind of this lane.
    const KIND: NumericKind;
    /// Additive identity.
    const ZERO: Self;
    /// Multiplicative identity.
    const ONE: Self;

    /// Widens to `f64`.
    fn to_f64(self) -> f64;

    /// Converts to `i64`, saturating for floats.
    fn to_i64(self) -> i64;

    /// Narrows from `f64`.
    ///
    /// Integer targets saturate to the `i32` range first and then truncate.
    fn from_f64(value: f64) -> Self;

    /// Narrows from `i64`, truncating in two's complement.
    fn from_i64(value: i64) -> Self;

    /// The raw bit pattern, used for equality.
    fn bits(self) -> u64;

    /// A total order: numeric for integers, IEEE total order for floats.
    fn total_cmp(self, other: Self) -> Ordering;

    /// Converts any other lane into this one.
    #[inline]
    fn cast<U: Element>(value: U) -> Self {
        if U::KIND.is_integral() {
            Self::from_i64(value.to_i64())
        } else {
            Self::from_f64(value.to_f64())
        }
    }
}

/// Lanes that support arithmetic.
pub trait Arith: Element {
    /// Addition, wrapping for integers.
    fn lane_add(self, rhs: Self) -> Self;
    /// Subtraction, wrapping for integers.
    fn lane_sub(self, rhs: Self) -> Self;
    /// Multiplication, wrapping for integers.
    fn lane_mul(self, rhs: Self) -> Self;
    /// Division.
    ///
    /// # Errors
    ///
    /// Integer lanes return [`CoreError::DivisionByZero`] for a zero divisor.
    fn lane_div(self, rhs: Self) -> Result<Self, CoreError>;
    /// Negation, wrapping for integers.
    fn lane_neg(self) -> Self;
    /// Absolute value, wrapping for integers.
    fn lane_abs(self) -> Self;
}

/// Scalar widths with a reserved null sentinel.
pub trait RealWidth: Arith {
    /// The scalar type of this width.
    const TYPE: Type;
    /// The machine minimum, reserved by storage to mean "no value".
    const NULL_SENTINEL: Self;
    /// The smallest storable value.
    const MIN_VALUE: Self;
    /// The largest value.
    const MAX_VALUE: Self;
}

/// The floating-point component types of complex numbers.
pub trait Float:
    RealWidth
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Not a number.
    const NAN: Self;
    /// Positive infinity.
    const INFINITY: Self;

    /// Absolute value.
    fn abs(self) -> Self;

    /// Square root.
    fn sqrt(self) -> Self;
}

macro_rules! integer_element {
    ($t:ty, $kind:ident, $from_f64:expr) => {
        impl Element for $t {
            const KIND: NumericKind = NumericKind::$kind;
            const ZERO: Self = 0;
            const ONE: Self = 1;

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn to_i64(self) -> i64 {
                i64::from(self)
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                $from_f64(value)
            }

            #[inline]
            fn from_i64(value: i64) -> Self {
                value as $t
            }

            #[inline]
            fn bits(self) -> u64 {
                self as u64
            }

            #[inline]
            fn total_cmp(self, other: Self) -> Ordering {
                self.cmp(&other)
            }
        }

        impl Arith for $t {
            #[inline]
            fn lane_add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            #[inline]
            fn lane_sub(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }

            #[inline]
            fn lane_mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }

            #[inline]
            fn lane_div(self, rhs: Self) -> Result<Self, CoreError> {
                if rhs == 0 {
                    return Err(CoreError::DivisionByZero);
                }
                Ok(self.wrapping_div(rhs))
            }

            #[inline]
            fn lane_neg(self) -> Self {
                self.wrapping_neg()
            }

            #[inline]
            fn lane_abs(self) -> Self {
                self.wrapping_abs()
            }
        }

        impl RealWidth for $t {
            const TYPE: Type = Type::$kind;
            const NULL_SENTINEL: Self = <$t>::MIN;
            const MIN_VALUE: Self = <$t>::MIN + 1;
            const MAX_VALUE: Self = <$t>::MAX;
        }
    };
}

integer_element!(i8, Byte, |v: f64| (v as i32) as i8);
integer_element!(i16, Short, |v: f64| (v as i32) as i16);
integer_element!(i32, Int, |v: f64| v as i32);
integer_element!(i64, Long, |v: f64| v as i64);

macro_rules! float_element {
    ($t:ty, $kind:ident, $min_value:expr) => {
        impl Element for $t {
            const KIND: NumericKind = NumericKind::$kind;
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;

            #[inline]
            fn to_f64(self) -> f64 {
                f64::from(self)
            }

            #[inline]
            fn to_i64(self) -> i64 {
                self as i64
            }

            #[inline]
            #[allow(clippy::cast_possible_truncation)]
            fn from_f64(value: f64) -> Self {
                value as $t
            }

            #[inline]
            fn from_i64(value: i64) -> Self {
                value as $t
            }

            #[inline]
            fn bits(self) -> u64 {
                u64::from(self.to_bits())
            }

            #[inline]
            fn total_cmp(self, other: Self) -> Ordering {
                <$t>::total_cmp(&self, &other)
            }
        }

        impl Arith for $t {
            #[inline]
            fn lane_add(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline]
            fn lane_sub(self, rhs: Self) -> Self {
                self - rhs
            }

            #[inline]
            fn lane_mul(self, rhs: Self) -> Self {
                self * rhs
            }

            #[inline]
            fn lane_div(self, rhs: Self) -> Result<Self, CoreError> {
                Ok(self / rhs)
            }

            #[inline]
            fn lane_neg(self) -> Self {
                -self
            }

            #[inline]
            fn lane_abs(self) -> Self {
                <$t>::abs(self)
            }
        }

        impl RealWidth for $t {
            const TYPE: Type = Type::$kind;
            const NULL_SENTINEL: Self = <$t>::MIN;
            const MIN_VALUE: Self = $min_value;
            const MAX_VALUE: Self = <$t>::MAX;
        }

        impl Float for $t {
            const NAN: Self = <$t>::NAN;
            const INFINITY: Self = <$t>::INFINITY;

            #[inline]
            fn abs(self) -> Self {
                <$t>::abs(self)
            }

            #[inline]
            fn sqrt(self) -> Self {
                <$t>::sqrt(self)
            }
        }
    };
}

// One ulp above MIN.
float_element!(f32, Float, -3.402_823_3e38_f32);
float_element!(f64, Double, -1.797_693_134_862_315_5e308_f64);

impl Element for bool {
    const KIND: NumericKind = NumericKind::Boolean;
    const ZERO: Self = false;
    const ONE: Self = true;

    #[inline]
    fn to_f64(self) -> f64 {
        if self {
            1.0
        } else {
            0.0
        }
    }

    #[inline]
    fn to_i64(self) -> i64 {
        i64::from(self)
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value != 0.0
    }

    #[inline]
    fn from_i64(value: i64) -> Self {
        value != 0
    }

    #[inline]
    fn bits(self) -> u64 {
        u64::from(self)
    }

    #[inline]
    fn total_cmp(self, other: Self) -> Ordering {
        self.cmp(&other)
    }
}

impl Element for f16 {
    const KIND: NumericKind = NumericKind::Half;
    const ZERO: Self = f16::ZERO;
    const ONE: Self = f16::ONE;

    #[inline]
    fn to_f64(self) -> f64 {
        f16::to_f64(self)
    }

    #[inline]
    fn to_i64(self) -> i64 {
        f16::to_f32(self) as i64
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        f16::from_f64(value)
    }

    #[inline]
    fn from_i64(value: i64) -> Self {
        f16::from_f64(value as f64)
    }

    #[inline]
    fn bits(self) -> u64 {
        u64::from(self.to_bits())
    }

    #[inline]
    fn total_cmp(self, other: Self) -> Ordering {
        f32::total_cmp(&f16::to_f32(self), &f16::to_f32(other))
    }
}

impl Arith for f16 {
    #[inline]
    fn lane_add(self, rhs: Self) -> Self {
        f16::from_f32(self.to_f32() + rhs.to_f32())
    }

    #[inline]
    fn lane_sub(self, rhs: Self) -> Self {
        f16::from_f32(self.to_f32() - rhs.to_f32())
    }

    #[inline]
    fn lane_mul(self, rhs: Self) -> Self {
        f16::from_f32(self.to_f32() * rhs.to_f32())
    }

    #[inline]
    fn lane_div(self, rhs: Self) -> Result<Self, CoreError> {
        Ok(f16::from_f32(self.to_f32() / rhs.to_f32()))
    }

    #[inline]
    fn lane_neg(self) -> Self {
        -self
    }

    #[inline]
    fn lane_abs(self) -> Self {
        f16::from_f32(self.to_f32().abs())
    }
}

/// An elementwise binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub(crate) const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
        }
    }

    #[inline]
    pub(crate) fn apply<T: Arith>(self, a: T, b: T) -> Result<T, CoreError> {
        match self {
            Self::Add => Ok(a.lane_add(b)),
            Self::Sub => Ok(a.lane_sub(b)),
            Self::Mul => Ok(a.lane_mul(b)),
            Self::Div => a.lane_div(b),
        }
    }

    #[inline]
    pub(crate) fn apply_complex<F: Float>(
        self,
        a: ComplexValue<F>,
        b: ComplexValue<F>,
    ) -> ComplexValue<F> {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
        }
    }
}
