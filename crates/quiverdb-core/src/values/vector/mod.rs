//! Fixed-dimension vector values.
//!
//! A [`VectorValue`] owns one flat buffer of a single element kind. Its
//! dimension is fixed at construction; operations that change shape
//! ([`slice`](VectorValue::slice)) build new vectors. Complex vectors store
//! interleaved `[re, im]` pairs.
//!
//! Operands of different element kinds are promoted to a shared kind (see
//! [`NumericKind::promote`]) before any elementwise operation, and every
//! binary operation checks dimensions first.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use half::f16;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Type;
use crate::values::complex::ComplexValue;
use crate::values::element::{Element, Float, NumericKind};
use crate::values::Value;

pub use buffer::{ComplexVector, PrimitiveVector};

/// Expands `$real` once per real variant and `$complex` once per complex one.
macro_rules! with_lanes {
    ($vector:expr, $lanes:ident => $real:expr, $pairs:ident => $complex:expr $(,)?) => {
        match $vector {
            VectorValue::Boolean($lanes) => $real,
            VectorValue::Byte($lanes) => $real,
            VectorValue::Short($lanes) => $real,
            VectorValue::Int($lanes) => $real,
            VectorValue::Long($lanes) => $real,
            VectorValue::Half($lanes) => $real,
            VectorValue::Float($lanes) => $real,
            VectorValue::Double($lanes) => $real,
            VectorValue::Complex32($pairs) => $complex,
            VectorValue::Complex64($pairs) => $complex,
        }
    };
}

/// Like `with_lanes!` over two vectors of the same kind; `$other` handles
/// differing kinds.
macro_rules! with_pair {
    ($a:expr, $b:expr, ($x:ident, $y:ident) => $real:expr,
     ($p:ident, $q:ident) => $complex:expr, _ => $other:expr $(,)?) => {
        match ($a, $b) {
            (VectorValue::Boolean($x), VectorValue::Boolean($y)) => $real,
            (VectorValue::Byte($x), VectorValue::Byte($y)) => $real,
            (VectorValue::Short($x), VectorValue::Short($y)) => $real,
            (VectorValue::Int($x), VectorValue::Int($y)) => $real,
            (VectorValue::Long($x), VectorValue::Long($y)) => $real,
            (VectorValue::Half($x), VectorValue::Half($y)) => $real,
            (VectorValue::Float($x), VectorValue::Float($y)) => $real,
            (VectorValue::Double($x), VectorValue::Double($y)) => $real,
            (VectorValue::Complex32($p), VectorValue::Complex32($q)) => $complex,
            (VectorValue::Complex64($p), VectorValue::Complex64($q)) => $complex,
            _ => $other,
        }
    };
}

/// `with_pair!` without booleans, for lanes that need arithmetic.
macro_rules! with_arith_pair {
    ($a:expr, $b:expr, ($x:ident, $y:ident) => $real:expr,
     ($p:ident, $q:ident) => $complex:expr, _ => $other:expr $(,)?) => {
        match ($a, $b) {
            (VectorValue::Byte($x), VectorValue::Byte($y)) => $real,
            (VectorValue::Short($x), VectorValue::Short($y)) => $real,
            (VectorValue::Int($x), VectorValue::Int($y)) => $real,
            (VectorValue::Long($x), VectorValue::Long($y)) => $real,
            (VectorValue::Half($x), VectorValue::Half($y)) => $real,
            (VectorValue::Float($x), VectorValue::Float($y)) => $real,
            (VectorValue::Double($x), VectorValue::Double($y)) => $real,
            (VectorValue::Complex32($p), VectorValue::Complex32($q)) => $complex,
            (VectorValue::Complex64($p), VectorValue::Complex64($q)) => $complex,
            _ => $other,
        }
    };
}

mod arith;
mod buffer;
mod metrics;

/// A fixed-dimension vector of one element kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VectorValue {
    /// Boolean lanes.
    Boolean(PrimitiveVector<bool>),
    /// 8-bit integer lanes.
    Byte(PrimitiveVector<i8>),
    /// 16-bit integer lanes.
    Short(PrimitiveVector<i16>),
    /// 32-bit integer lanes.
    Int(PrimitiveVector<i32>),
    /// 64-bit integer lanes.
    Long(PrimitiveVector<i64>),
    /// Half-precision lanes.
    Half(PrimitiveVector<f16>),
    /// 32-bit float lanes.
    Float(PrimitiveVector<f32>),
    /// 64-bit float lanes.
    Double(PrimitiveVector<f64>),
    /// Complex elements with 32-bit components.
    Complex32(ComplexVector<f32>),
    /// Complex elements with 64-bit components.
    Complex64(ComplexVector<f64>),
}

/// Primitive lane types that back a [`VectorValue`] variant.
pub trait Lane: Element {
    /// Wraps lanes in their variant.
    fn wrap(lanes: PrimitiveVector<Self>) -> VectorValue;

    /// The lanes of `vector` if it has this lane type.
    fn borrow_from(vector: &VectorValue) -> Option<&PrimitiveVector<Self>>;
}

/// Component types that back a complex [`VectorValue`] variant.
pub trait ComplexLane: Float {
    /// Wraps complex elements in their variant.
    fn wrap(pairs: ComplexVector<Self>) -> VectorValue;

    /// The elements of `vector` if it has this component type.
    fn borrow_from(vector: &VectorValue) -> Option<&ComplexVector<Self>>;
}

macro_rules! lane {
    ($t:ty, $variant:ident) => {
        impl Lane for $t {
            fn wrap(lanes: PrimitiveVector<Self>) -> VectorValue {
                VectorValue::$variant(lanes)
            }

            fn borrow_from(vector: &VectorValue) -> Option<&PrimitiveVector<Self>> {
                match vector {
                    VectorValue::$variant(lanes) => Some(lanes),
                    _ => None,
                }
            }
        }
    };
}

lane!(bool, Boolean);
lane!(i8, Byte);
lane!(i16, Short);
lane!(i32, Int);
lane!(i64, Long);
lane!(f16, Half);
lane!(f32, Float);
lane!(f64, Double);

macro_rules! complex_lane {
    ($t:ty, $variant:ident) => {
        impl ComplexLane for $t {
            fn wrap(pairs: ComplexVector<Self>) -> VectorValue {
                VectorValue::$variant(pairs)
            }

            fn borrow_from(vector: &VectorValue) -> Option<&ComplexVector<Self>> {
                match vector {
                    VectorValue::$variant(pairs) => Some(pairs),
                    _ => None,
                }
            }
        }
    };
}

complex_lane!(f32, Complex32);
complex_lane!(f64, Complex64);

impl VectorValue {
    /// A vector of `dimension` zeros.
    #[must_use]
    pub fn zeros(kind: NumericKind, dimension: usize) -> Self {
        match kind {
            NumericKind::Boolean => Self::Boolean(PrimitiveVector::zeros(dimension)),
            NumericKind::Byte => Self::Byte(PrimitiveVector::zeros(dimension)),
            NumericKind::Short => Self::Short(PrimitiveVector::zeros(dimension)),
            NumericKind::Int => Self::Int(PrimitiveVector::zeros(dimension)),
            NumericKind::Long => Self::Long(PrimitiveVector::zeros(dimension)),
            NumericKind::Half => Self::Half(PrimitiveVector::zeros(dimension)),
            NumericKind::Float => Self::Float(PrimitiveVector::zeros(dimension)),
            NumericKind::Double => Self::Double(PrimitiveVector::zeros(dimension)),
            NumericKind::Complex32 => Self::Complex32(ComplexVector::zeros(dimension)),
            NumericKind::Complex64 => Self::Complex64(ComplexVector::zeros(dimension)),
        }
    }

    /// Builds a vector of `kind` from numbers of any lane type.
    ///
    /// Each number is coerced as by the scalar conversions; complex kinds get
    /// zero imaginary parts.
    #[must_use]
    pub fn from_numbers<T: Element>(kind: NumericKind, numbers: &[T]) -> Self {
        fn lanes<U: Lane, T: Element>(numbers: &[T]) -> VectorValue {
            U::wrap(numbers.iter().map(|&x| U::cast(x)).collect())
        }
        fn pairs<F: ComplexLane, T: Element>(numbers: &[T]) -> VectorValue {
            F::wrap(numbers.iter().map(|&x| ComplexValue::from_real(F::cast(x))).collect())
        }
        match kind {
            NumericKind::Boolean => lanes::<bool, T>(numbers),
            NumericKind::Byte => lanes::<i8, T>(numbers),
            NumericKind::Short => lanes::<i16, T>(numbers),
            NumericKind::Int => lanes::<i32, T>(numbers),
            NumericKind::Long => lanes::<i64, T>(numbers),
            NumericKind::Half => lanes::<f16, T>(numbers),
            NumericKind::Float => lanes::<f32, T>(numbers),
            NumericKind::Double => lanes::<f64, T>(numbers),
            NumericKind::Complex32 => pairs::<f32, T>(numbers),
            NumericKind::Complex64 => pairs::<f64, T>(numbers),
        }
    }

    /// Builds a vector of `kind` from scalar values.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConversion`] if any value is not numeric.
    pub fn from_values(kind: NumericKind, values: &[Value]) -> Result<Self, CoreError> {
        if kind.is_complex() {
            let pairs = values.iter().map(Value::as_complex64).collect::<Result<Vec<_>, _>>()?;
            return Ok(Self::from_complex(pairs).cast(kind));
        }
        let integral = values.iter().all(|v| v.numeric_kind().is_some_and(NumericKind::is_integral));
        if integral {
            // Keeps 64-bit integers exact.
            let lanes = values.iter().map(Value::lane::<i64>).collect::<Result<Vec<_>, _>>()?;
            return Ok(Self::from_numbers(kind, &lanes));
        }
        let lanes = values.iter().map(Value::lane::<f64>).collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_numbers(kind, &lanes))
    }

    /// Builds a complex vector from its elements.
    #[must_use]
    pub fn from_complex<F: ComplexLane>(elements: Vec<ComplexValue<F>>) -> Self {
        F::wrap(elements.into_iter().collect())
    }

    /// The element kind.
    #[must_use]
    pub const fn kind(&self) -> NumericKind {
        match self {
            Self::Boolean(_) => NumericKind::Boolean,
            Self::Byte(_) => NumericKind::Byte,
            Self::Short(_) => NumericKind::Short,
            Self::Int(_) => NumericKind::Int,
            Self::Long(_) => NumericKind::Long,
            Self::Half(_) => NumericKind::Half,
            Self::Float(_) => NumericKind::Float,
            Self::Double(_) => NumericKind::Double,
            Self::Complex32(_) => NumericKind::Complex32,
            Self::Complex64(_) => NumericKind::Complex64,
        }
    }

    /// The vector type, including the dimension.
    #[must_use]
    pub fn value_type(&self) -> Type {
        self.kind().vector_type(self.logical_size())
    }

    /// The dimension.
    #[must_use]
    pub fn logical_size(&self) -> usize {
        with_lanes!(self, lanes => lanes.len(), pairs => pairs.len())
    }

    /// Returns `true` for a zero-dimensional vector.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.logical_size() == 0
    }

    /// Returns `true` for complex vectors.
    #[must_use]
    pub const fn is_complex(&self) -> bool {
        self.kind().is_complex()
    }

    /// The lanes, if this vector has lane type `T`.
    #[must_use]
    pub fn lanes<T: Lane>(&self) -> Option<&[T]> {
        T::borrow_from(self).map(PrimitiveVector::as_slice)
    }

    /// The interleaved `[re, im]` buffer, if this vector has component type `F`.
    #[must_use]
    pub fn interleaved<F: ComplexLane>(&self) -> Option<&[F]> {
        F::borrow_from(self).map(ComplexVector::as_interleaved)
    }

    /// The elements as `f64`, borrowed when already double precision.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConversion`] for complex vectors.
    pub fn to_f64_lanes(&self) -> Result<Cow<'_, [f64]>, CoreError> {
        match self {
            Self::Double(lanes) => Ok(Cow::Borrowed(lanes.as_slice())),
            other => with_lanes!(
                other,
                lanes => Ok(Cow::Owned(lanes.iter().map(Element::to_f64).collect())),
                _pairs => Err(CoreError::invalid_conversion(self.value_type(), "DOUBLE_VEC")),
            ),
        }
    }

    /// The element at `index`.
    ///
    /// Half-precision elements are returned as floats.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IndexOutOfBounds`] past the last element.
    pub fn get(&self, index: usize) -> Result<Value, CoreError> {
        let out_of_bounds = || CoreError::IndexOutOfBounds { index, len: self.logical_size() };
        let value = match self {
            Self::Boolean(v) => v.as_slice().get(index).map(|&x| Value::from(x)),
            Self::Byte(v) => v.as_slice().get(index).map(|&x| Value::from(x)),
            Self::Short(v) => v.as_slice().get(index).map(|&x| Value::from(x)),
            Self::Int(v) => v.as_slice().get(index).map(|&x| Value::from(x)),
            Self::Long(v) => v.as_slice().get(index).map(|&x| Value::from(x)),
            Self::Half(v) => v.as_slice().get(index).map(|&x| Value::from(x.to_f32())),
            Self::Float(v) => v.as_slice().get(index).map(|&x| Value::from(x)),
            Self::Double(v) => v.as_slice().get(index).map(|&x| Value::from(x)),
            Self::Complex32(v) => v.get(index).map(Value::Complex32),
            Self::Complex64(v) => v.get(index).map(Value::Complex64),
        };
        value.ok_or_else(out_of_bounds)
    }

    /// Returns `true` if the element at `index` is non-zero.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IndexOutOfBounds`] past the last element.
    pub fn get_as_bool(&self, index: usize) -> Result<bool, CoreError> {
        let nonzero = with_lanes!(
            self,
            lanes => lanes.as_slice().get(index).map(|&x| !is_zero(x)),
            pairs => pairs.get(index).map(|z| !is_complex_zero(z)),
        );
        nonzero.ok_or(CoreError::IndexOutOfBounds { index, len: self.logical_size() })
    }

    /// A new vector holding `len` elements starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IndexOutOfBounds`] if the range ends past the
    /// last element.
    pub fn slice(&self, start: usize, len: usize) -> Result<Self, CoreError> {
        let size = self.logical_size();
        let end = start.checked_add(len).filter(|&end| end <= size).ok_or(
            CoreError::IndexOutOfBounds { index: start.saturating_add(len), len: size },
        )?;
        let sliced = match self {
            Self::Complex32(v) => {
                Self::Complex32(v.iter().skip(start).take(end - start).collect())
            }
            Self::Complex64(v) => {
                Self::Complex64(v.iter().skip(start).take(end - start).collect())
            }
            Self::Boolean(v) => Self::Boolean(PrimitiveVector::new(&v.as_slice()[start..end])),
            Self::Byte(v) => Self::Byte(PrimitiveVector::new(&v.as_slice()[start..end])),
            Self::Short(v) => Self::Short(PrimitiveVector::new(&v.as_slice()[start..end])),
            Self::Int(v) => Self::Int(PrimitiveVector::new(&v.as_slice()[start..end])),
            Self::Long(v) => Self::Long(PrimitiveVector::new(&v.as_slice()[start..end])),
            Self::Half(v) => Self::Half(PrimitiveVector::new(&v.as_slice()[start..end])),
            Self::Float(v) => Self::Float(PrimitiveVector::new(&v.as_slice()[start..end])),
            Self::Double(v) => Self::Double(PrimitiveVector::new(&v.as_slice()[start..end])),
        };
        Ok(sliced)
    }

    /// A deep copy with its own buffer.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Returns `true` if every element is zero.
    #[must_use]
    pub fn all_zeros(&self) -> bool {
        with_lanes!(
            self,
            lanes => lanes.iter().all(is_zero),
            pairs => pairs.iter().all(is_complex_zero),
        )
    }

    /// Returns `true` if every element is one.
    #[must_use]
    pub fn all_ones(&self) -> bool {
        with_lanes!(
            self,
            lanes => lanes.iter().all(|x| x == one_like(x)),
            pairs => pairs.iter().all(|z| z == ComplexValue::from_real(one_like(z.re()))),
        )
    }

    /// Converts every element to `kind`.
    ///
    /// Real-to-complex conversion zeroes the imaginary parts; complex-to-real
    /// keeps the real parts.
    #[must_use]
    pub fn cast(&self, kind: NumericKind) -> Self {
        if kind == self.kind() {
            return self.clone();
        }
        fn pairs<F: ComplexLane, G: Float>(pairs: &ComplexVector<G>) -> VectorValue {
            F::wrap(pairs.iter().map(ComplexValue::cast::<F>).collect())
        }
        match self {
            Self::Complex32(v) if kind.is_complex() => pairs::<f64, f32>(v),
            Self::Complex64(v) if kind.is_complex() => pairs::<f32, f64>(v),
            other => with_lanes!(
                other,
                lanes => Self::from_numbers(kind, lanes.as_slice()),
                pairs => Self::from_numbers(kind, &pairs.iter().map(|z| z.re()).collect::<Vec<_>>()),
            ),
        }
    }

    /// Borrows `self` if it already has `kind`, converts it otherwise.
    #[must_use]
    pub fn coerced(&self, kind: NumericKind) -> Cow<'_, Self> {
        if kind == self.kind() {
            Cow::Borrowed(self)
        } else {
            Cow::Owned(self.cast(kind))
        }
    }

    /// The real parts; a copy for real vectors.
    #[must_use]
    pub fn real_part(&self) -> Self {
        match self {
            Self::Complex32(v) => Self::Float(v.iter().map(|z| z.re()).collect()),
            Self::Complex64(v) => Self::Double(v.iter().map(|z| z.re()).collect()),
            real => real.clone(),
        }
    }

    /// The imaginary parts; zeros for real vectors.
    #[must_use]
    pub fn imaginary_part(&self) -> Self {
        match self {
            Self::Complex32(v) => Self::Float(v.iter().map(|z| z.im()).collect()),
            Self::Complex64(v) => Self::Double(v.iter().map(|z| z.im()).collect()),
            real => Self::zeros(real.kind(), real.logical_size()),
        }
    }

    /// Lexicographic order between vectors of the same real element kind.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnsupportedComparison`] for differing kinds or
    /// complex vectors.
    pub fn compare(&self, other: &Self) -> Result<Ordering, CoreError> {
        fn lexicographic<T: Element>(a: &PrimitiveVector<T>, b: &PrimitiveVector<T>) -> Ordering {
            a.iter()
                .zip(b.iter())
                .map(|(x, y)| x.total_cmp(y))
                .find(|ord| ord.is_ne())
                .unwrap_or_else(|| a.len().cmp(&b.len()))
        }
        with_pair!(
            self,
            other,
            (a, b) => Ok(lexicographic(a, b)),
            (_a, _b) => Err(CoreError::unsupported_comparison(self.value_type(), other.value_type())),
            _ => Err(CoreError::unsupported_comparison(self.value_type(), other.value_type())),
        )
    }

    /// Returns `true` if both vectors have the same kind and identical bits.
    #[must_use]
    pub fn is_equal(&self, other: &Self) -> bool {
        self == other
    }

    pub(crate) fn check_dimension(&self, other: &Self) -> Result<(), CoreError> {
        let (expected, actual) = (self.logical_size(), other.logical_size());
        if expected != actual {
            return Err(CoreError::dimension_mismatch(expected, actual));
        }
        Ok(())
    }
}

fn is_zero<T: Element>(x: T) -> bool {
    x == T::ZERO
}

fn one_like<T: Element>(_: T) -> T {
    T::ONE
}

fn is_complex_zero<F: Float>(z: ComplexValue<F>) -> bool {
    z == ComplexValue::ZERO
}

impl<T: Lane> From<Vec<T>> for VectorValue {
    fn from(lanes: Vec<T>) -> Self {
        T::wrap(PrimitiveVector::new(lanes))
    }
}

impl<T: Lane> From<&[T]> for VectorValue {
    fn from(lanes: &[T]) -> Self {
        T::wrap(PrimitiveVector::new(lanes))
    }
}

impl fmt::Display for VectorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        with_lanes!(
            self,
            lanes => {
                for (i, x) in lanes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{x}")?;
                }
            },
            pairs => {
                for (i, z) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{z}")?;
                }
            },
        );
        f.write_str("]")
    }
}
