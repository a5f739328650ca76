//! Elementwise arithmetic and aggregates.

use crate::error::CoreError;
use crate::values::complex::ComplexValue;
use crate::values::element::{Arith, BinaryOp, Element, Float, NumericKind};
use crate::values::real::{DoubleValue, FloatValue};
use crate::values::vector::{ComplexLane, ComplexVector, Lane, PrimitiveVector, VectorValue};
use crate::values::Value;

impl VectorValue {
    /// Elementwise `self + other`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DimensionMismatch`] if the dimensions differ.
    pub fn add(&self, other: &Self) -> Result<Self, CoreError> {
        self.zip(other, BinaryOp::Add)
    }

    /// Elementwise `self - other`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DimensionMismatch`] if the dimensions differ.
    pub fn sub(&self, other: &Self) -> Result<Self, CoreError> {
        self.zip(other, BinaryOp::Sub)
    }

    /// Elementwise `self * other`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DimensionMismatch`] if the dimensions differ.
    pub fn mul(&self, other: &Self) -> Result<Self, CoreError> {
        self.zip(other, BinaryOp::Mul)
    }

    /// Elementwise `self / other`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DimensionMismatch`] if the dimensions differ and
    /// [`CoreError::DivisionByZero`] if an integer lane divides by zero.
    pub fn div(&self, other: &Self) -> Result<Self, CoreError> {
        self.zip(other, BinaryOp::Div)
    }

    /// Adds `scalar` to every element.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnsupportedOperation`] if `scalar` is not numeric.
    pub fn add_scalar(&self, scalar: &Value) -> Result<Self, CoreError> {
        self.broadcast(scalar, BinaryOp::Add)
    }

    /// Subtracts `scalar` from every element.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnsupportedOperation`] if `scalar` is not numeric.
    pub fn sub_scalar(&self, scalar: &Value) -> Result<Self, CoreError> {
        self.broadcast(scalar, BinaryOp::Sub)
    }

    /// Multiplies every element by `scalar`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnsupportedOperation`] if `scalar` is not numeric.
    pub fn mul_scalar(&self, scalar: &Value) -> Result<Self, CoreError> {
        self.broadcast(scalar, BinaryOp::Mul)
    }

    /// Divides every element by `scalar`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnsupportedOperation`] if `scalar` is not numeric
    /// and [`CoreError::DivisionByZero`] for an integer zero divisor.
    pub fn div_scalar(&self, scalar: &Value) -> Result<Self, CoreError> {
        self.broadcast(scalar, BinaryOp::Div)
    }

    /// Elementwise negation; boolean vectors become int vectors.
    #[must_use]
    pub fn neg(&self) -> Self {
        match self {
            Self::Boolean(_) => self.cast(NumericKind::Int).neg(),
            Self::Byte(x) => negate(x),
            Self::Short(x) => negate(x),
            Self::Int(x) => negate(x),
            Self::Long(x) => negate(x),
            Self::Half(x) => negate(x),
            Self::Float(x) => negate(x),
            Self::Double(x) => negate(x),
            Self::Complex32(p) => Self::Complex32(p.iter().map(|z| -z).collect()),
            Self::Complex64(p) => Self::Complex64(p.iter().map(|z| -z).collect()),
        }
    }

    /// Elementwise absolute value.
    ///
    /// Complex vectors yield the real vector of moduli.
    #[must_use]
    pub fn abs(&self) -> Self {
        match self {
            Self::Boolean(_) => self.clone(),
            Self::Byte(x) => absolute(x),
            Self::Short(x) => absolute(x),
            Self::Int(x) => absolute(x),
            Self::Long(x) => absolute(x),
            Self::Half(x) => absolute(x),
            Self::Float(x) => absolute(x),
            Self::Double(x) => absolute(x),
            Self::Complex32(p) => Self::Float(p.iter().map(|z| z.abs().value()).collect()),
            Self::Complex64(p) => Self::Double(p.iter().map(|z| z.abs().value()).collect()),
        }
    }

    /// Elementwise square root.
    ///
    /// Integer and boolean vectors are promoted to floating point first.
    #[must_use]
    pub fn sqrt(&self) -> Self {
        match self {
            Self::Complex32(p) => Self::Complex32(p.iter().map(|z| z.sqrt().cast()).collect()),
            Self::Complex64(p) => Self::Complex64(p.iter().map(|z| z.sqrt()).collect()),
            real => real.map_floating(&f64::sqrt),
        }
    }

    /// Raises every element to the real power `x`.
    ///
    /// Integer and boolean vectors are promoted to floating point first.
    #[must_use]
    pub fn pow(&self, x: f64) -> Self {
        match self {
            Self::Complex32(p) => Self::Complex32(p.iter().map(|z| z.pow(x).cast()).collect()),
            Self::Complex64(p) => Self::Complex64(p.iter().map(|z| z.pow(x)).collect()),
            real => real.map_floating(&|v| v.powf(x)),
        }
    }

    /// Raises every element to the integer power `n`.
    ///
    /// Integer and boolean vectors are promoted to floating point first.
    #[must_use]
    pub fn powi(&self, n: i32) -> Self {
        match self {
            Self::Complex32(p) => Self::Complex32(p.iter().map(|z| z.powi(n).cast()).collect()),
            Self::Complex64(p) => Self::Complex64(p.iter().map(|z| z.powi(n)).collect()),
            real => real.map_floating(&|v| v.powi(n)),
        }
    }

    /// The sum of all elements.
    ///
    /// Real vectors sum in double precision and return
    /// [`NumericKind::aggregate`] of their kind.
    #[must_use]
    pub fn sum(&self) -> Value {
        match self {
            Self::Complex32(p) => Value::Complex32(p.iter().fold(ComplexValue::ZERO, |s, z| s + z)),
            Self::Complex64(p) => Value::Complex64(p.iter().fold(ComplexValue::ZERO, |s, z| s + z)),
            real => aggregate_value(real.kind(), real.fold_f64(|x| x)),
        }
    }

    /// The Euclidean norm, always real.
    #[must_use]
    pub fn norm2(&self) -> Value {
        let kind = self.kind();
        let squares = match self {
            Self::Complex32(p) => squared_moduli(p),
            Self::Complex64(p) => squared_moduli(p),
            real => real.fold_f64(|x| x * x),
        };
        aggregate_value(kind.real_part(), squares.sqrt())
    }

    fn zip(&self, other: &Self, op: BinaryOp) -> Result<Self, CoreError> {
        self.check_dimension(other)?;
        let kind = self.kind().promote(other.kind());
        let (a, b) = (self.coerced(kind), other.coerced(kind));
        with_arith_pair!(
            a.as_ref(),
            b.as_ref(),
            (x, y) => zip_lanes(x, y, op),
            (p, q) => Ok(ComplexLane::wrap(zip_pairs(p, q, op))),
            _ => Err(CoreError::unsupported_operation(op.name(), self.value_type())),
        )
    }

    fn broadcast(&self, scalar: &Value, op: BinaryOp) -> Result<Self, CoreError> {
        let scalar_kind = scalar
            .numeric_kind()
            .ok_or_else(|| CoreError::unsupported_operation(op.name(), scalar.value_type()))?;
        let kind = self.kind().promote(scalar_kind);
        match self.coerced(kind).as_ref() {
            Self::Byte(x) => broadcast_lanes(x, scalar, op),
            Self::Short(x) => broadcast_lanes(x, scalar, op),
            Self::Int(x) => broadcast_lanes(x, scalar, op),
            Self::Long(x) => broadcast_lanes(x, scalar, op),
            Self::Half(x) => broadcast_lanes(x, scalar, op),
            Self::Float(x) => broadcast_lanes(x, scalar, op),
            Self::Double(x) => broadcast_lanes(x, scalar, op),
            Self::Complex32(p) => broadcast_pairs(p, scalar, op),
            Self::Complex64(p) => broadcast_pairs(p, scalar, op),
            Self::Boolean(_) => Err(CoreError::unsupported_operation(op.name(), self.value_type())),
        }
    }

    /// Applies `f` in double precision after promoting to a floating kind.
    fn map_floating(&self, f: &dyn Fn(f64) -> f64) -> Self {
        let floating = self.coerced(self.kind().floating());
        with_lanes!(floating.as_ref(), x => map_lanes_f64(x, f), _p => floating.as_ref().clone())
    }

    /// Sums `f` over the real lanes (real parts for complex vectors).
    fn fold_f64(&self, f: impl Fn(f64) -> f64) -> f64 {
        with_lanes!(
            self,
            x => x.iter().map(|v| f(v.to_f64())).sum(),
            p => p.iter().map(|z| f(z.re().to_f64())).sum(),
        )
    }
}

pub(super) fn aggregate_value(kind: NumericKind, value: f64) -> Value {
    match kind.aggregate() {
        NumericKind::Float => Value::Float(FloatValue::new(value as f32)),
        _ => Value::Double(DoubleValue::new(value)),
    }
}

fn squared_moduli<F: Float>(pairs: &ComplexVector<F>) -> f64 {
    pairs.as_interleaved().iter().map(|c| c.to_f64() * c.to_f64()).sum()
}

fn zip_lanes<T: Arith + Lane>(
    x: &PrimitiveVector<T>,
    y: &PrimitiveVector<T>,
    op: BinaryOp,
) -> Result<VectorValue, CoreError> {
    let lanes = x.iter().zip(y.iter()).map(|(a, b)| op.apply(a, b)).collect::<Result<_, _>>()?;
    Ok(T::wrap(lanes))
}

fn zip_pairs<F: Float>(
    p: &ComplexVector<F>,
    q: &ComplexVector<F>,
    op: BinaryOp,
) -> ComplexVector<F> {
    p.iter().zip(q.iter()).map(|(a, b)| op.apply_complex(a, b)).collect()
}

fn broadcast_lanes<T: Arith + Lane>(
    x: &PrimitiveVector<T>,
    scalar: &Value,
    op: BinaryOp,
) -> Result<VectorValue, CoreError> {
    let s = scalar.lane::<T>()?;
    let lanes = x.iter().map(|a| op.apply(a, s)).collect::<Result<_, _>>()?;
    Ok(T::wrap(lanes))
}

fn broadcast_pairs<F: ComplexLane>(
    p: &ComplexVector<F>,
    scalar: &Value,
    op: BinaryOp,
) -> Result<VectorValue, CoreError> {
    let s = scalar.as_complex64()?.cast::<F>();
    Ok(F::wrap(p.iter().map(|z| op.apply_complex(z, s)).collect()))
}

fn negate<T: Arith + Lane>(x: &PrimitiveVector<T>) -> VectorValue {
    T::wrap(x.iter().map(Arith::lane_neg).collect())
}

fn absolute<T: Arith + Lane>(x: &PrimitiveVector<T>) -> VectorValue {
    T::wrap(x.iter().map(Arith::lane_abs).collect())
}

fn map_lanes_f64<T: Lane>(x: &PrimitiveVector<T>, f: &dyn Fn(f64) -> f64) -> VectorValue {
    T::wrap(x.iter().map(|v| T::from_f64(f(v.to_f64()))).collect())
}
