//! Real scalar values of every integer and floating width.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::values::complex::{Complex32Value, Complex64Value};
use crate::values::element::{Arith, Element, RealWidth};

/// A real scalar of width `T`.
///
/// Equality is bitwise: `NaN == NaN` and `0.0 != -0.0`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RealValue<T>(T);

/// An 8-bit integer value.
pub type ByteValue = RealValue<i8>;
/// A 16-bit integer value.
pub type ShortValue = RealValue<i16>;
/// A 32-bit integer value.
pub type IntValue = RealValue<i32>;
/// A 64-bit integer value.
pub type LongValue = RealValue<i64>;
/// A 32-bit float value.
pub type FloatValue = RealValue<f32>;
/// A 64-bit float value.
pub type DoubleValue = RealValue<f64>;

impl<T: RealWidth> RealValue<T> {
    /// The smallest storable value, one unit above [`Self::NULL_SENTINEL`].
    pub const MIN_VALUE: Self = Self(T::MIN_VALUE);
    /// The largest value.
    pub const MAX_VALUE: Self = Self(T::MAX_VALUE);
    /// Zero.
    pub const ZERO: Self = Self(T::ZERO);
    /// One.
    pub const ONE: Self = Self(T::ONE);
    /// The machine minimum, which storage reads as "no value".
    pub const NULL_SENTINEL: Self = Self(T::NULL_SENTINEL);

    /// Wraps a value.
    ///
    /// This does not reject the null sentinel; use [`checked`](Self::checked)
    /// for values headed to storage.
    #[inline]
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    /// Wraps a value, rejecting the null sentinel.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ReservedSentinel`] if `value` is the machine minimum.
    pub fn checked(value: T) -> Result<Self, CoreError> {
        let wrapped = Self(value);
        if wrapped.is_null_sentinel() {
            return Err(CoreError::ReservedSentinel { type_name: T::TYPE.to_string() });
        }
        Ok(wrapped)
    }

    /// The wrapped value.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> T {
        self.0
    }

    /// Returns `true` if this is the reserved null sentinel.
    #[inline]
    #[must_use]
    pub fn is_null_sentinel(&self) -> bool {
        self.0.bits() == T::NULL_SENTINEL.bits()
    }

    /// Converts to another real width.
    ///
    /// Integers truncate in two's complement; floats narrowing to integers
    /// saturate to the `i32` range first.
    #[inline]
    #[must_use]
    pub fn cast<U: RealWidth>(self) -> RealValue<U> {
        RealValue(U::cast(self.0))
    }

    /// Converts to a byte.
    #[must_use]
    pub fn as_byte(self) -> ByteValue {
        self.cast()
    }

    /// Converts to a short.
    #[must_use]
    pub fn as_short(self) -> ShortValue {
        self.cast()
    }

    /// Converts to an int.
    #[must_use]
    pub fn as_int(self) -> IntValue {
        self.cast()
    }

    /// Converts to a long.
    #[must_use]
    pub fn as_long(self) -> LongValue {
        self.cast()
    }

    /// Converts to a float.
    #[must_use]
    pub fn as_float(self) -> FloatValue {
        self.cast()
    }

    /// Converts to a double.
    #[must_use]
    pub fn as_double(self) -> DoubleValue {
        self.cast()
    }

    /// Converts to a complex number with a zero imaginary part.
    #[must_use]
    pub fn as_complex32(self) -> Complex32Value {
        Complex32Value::from_real(f32::cast(self.0))
    }

    /// Converts to a complex number with a zero imaginary part.
    #[must_use]
    pub fn as_complex64(self) -> Complex64Value {
        Complex64Value::from_real(f64::cast(self.0))
    }

    /// Division.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DivisionByZero`] for an integer zero divisor.
    pub fn checked_div(self, rhs: Self) -> Result<Self, CoreError> {
        self.0.lane_div(rhs.0).map(Self)
    }

    /// The absolute value; `MIN` stays `MIN` for integers.
    #[must_use]
    pub fn abs(self) -> Self {
        Self(self.0.lane_abs())
    }

    /// Compares numerically with a value of any real width.
    ///
    /// Two integers compare exactly; otherwise both sides are compared by the
    /// IEEE total order on `f64`.
    #[must_use]
    pub fn compare<U: RealWidth>(&self, other: &RealValue<U>) -> Ordering {
        if T::KIND.is_integral() && U::KIND.is_integral() {
            self.0.to_i64().cmp(&other.0.to_i64())
        } else {
            f64::total_cmp(&self.0.to_f64(), &other.0.to_f64())
        }
    }

    /// `self^x` in double precision.
    #[must_use]
    pub fn pow(self, x: f64) -> DoubleValue {
        self.map_f64(|v| v.powf(x))
    }

    /// `self^n` in double precision.
    #[must_use]
    pub fn powi(self, n: i32) -> DoubleValue {
        self.map_f64(|v| v.powi(n))
    }

    /// The square root in double precision.
    #[must_use]
    pub fn sqrt(self) -> DoubleValue {
        self.map_f64(f64::sqrt)
    }

    /// `e^self`.
    #[must_use]
    pub fn exp(self) -> DoubleValue {
        self.map_f64(f64::exp)
    }

    /// The natural logarithm.
    #[must_use]
    pub fn ln(self) -> DoubleValue {
        self.map_f64(f64::ln)
    }

    /// The sine.
    #[must_use]
    pub fn sin(self) -> DoubleValue {
        self.map_f64(f64::sin)
    }

    /// The cosine.
    #[must_use]
    pub fn cos(self) -> DoubleValue {
        self.map_f64(f64::cos)
    }

    /// The tangent.
    #[must_use]
    pub fn tan(self) -> DoubleValue {
        self.map_f64(f64::tan)
    }

    /// The arc tangent.
    #[must_use]
    pub fn atan(self) -> DoubleValue {
        self.map_f64(f64::atan)
    }

    #[inline]
    fn map_f64(self, f: impl Fn(f64) -> f64) -> DoubleValue {
        RealValue(f(self.0.to_f64()))
    }
}

impl<T: RealWidth> PartialEq for RealValue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.bits() == other.0.bits()
    }
}

impl<T: RealWidth> Eq for RealValue<T> {}

impl<T: RealWidth> Hash for RealValue<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.bits().hash(state);
    }
}

impl<T: RealWidth> PartialOrd for RealValue<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: RealWidth> Ord for RealValue<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(other.0)
    }
}

impl<T: RealWidth> Add for RealValue<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.lane_add(rhs.0))
    }
}

impl<T: RealWidth> Sub for RealValue<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.lane_sub(rhs.0))
    }
}

impl<T: RealWidth> Mul for RealValue<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self(self.0.lane_mul(rhs.0))
    }
}

impl<T: RealWidth> Neg for RealValue<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(self.0.lane_neg())
    }
}

impl<T: RealWidth> From<T> for RealValue<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T: fmt::Display> fmt::Display for RealValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
