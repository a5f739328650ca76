//! Built-in unweighted distances between vectors.

use std::borrow::Cow;

use crate::error::CoreError;
use crate::kernels;
use crate::values::complex::ComplexValue;
use crate::values::vector::arith::aggregate_value;
use crate::values::vector::VectorValue;
use crate::values::Value;

impl VectorValue {
    /// Checks dimensions and brings both vectors to one element kind.
    ///
    /// Equal kinds are borrowed as-is (booleans stay boolean); differing
    /// kinds are promoted.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DimensionMismatch`] if the dimensions differ.
    pub fn unify<'a>(&'a self, other: &'a Self) -> Result<(Cow<'a, Self>, Cow<'a, Self>), CoreError> {
        self.check_dimension(other)?;
        let kind = self.kind().unify(other.kind());
        Ok((self.coerced(kind), other.coerced(kind)))
    }

    /// The L1 (Manhattan) distance.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DimensionMismatch`] if the dimensions differ.
    pub fn l1(&self, other: &Self) -> Result<f64, CoreError> {
        let (a, b) = self.unify(other)?;
        with_pair!(
            a.as_ref(),
            b.as_ref(),
            (x, y) => Ok(kernels::l1(x.as_slice(), y.as_slice())),
            (p, q) => Ok(kernels::complex_l1(p.as_interleaved(), q.as_interleaved())),
            _ => Err(CoreError::unsupported_operation("l1", self.value_type())),
        )
    }

    /// The squared L2 (Euclidean) distance.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DimensionMismatch`] if the dimensions differ.
    pub fn l2_squared(&self, other: &Self) -> Result<f64, CoreError> {
        let (a, b) = self.unify(other)?;
        with_pair!(
            a.as_ref(),
            b.as_ref(),
            (x, y) => Ok(kernels::l2_squared(x.as_slice(), y.as_slice())),
            (p, q) => Ok(kernels::complex_l2_squared(p.as_interleaved(), q.as_interleaved())),
            _ => Err(CoreError::unsupported_operation("l2", self.value_type())),
        )
    }

    /// The L2 (Euclidean) distance, `sqrt(l2_squared)`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DimensionMismatch`] if the dimensions differ.
    pub fn l2(&self, other: &Self) -> Result<f64, CoreError> {
        self.l2_squared(other).map(f64::sqrt)
    }

    /// The Minkowski distance of order `p`.
    ///
    /// Complex vectors use the complex modulus of each difference.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DimensionMismatch`] if the dimensions differ.
    pub fn lp(&self, other: &Self, p: f64) -> Result<f64, CoreError> {
        let (a, b) = self.unify(other)?;
        with_pair!(
            a.as_ref(),
            b.as_ref(),
            (x, y) => Ok(kernels::lp(x.as_slice(), y.as_slice(), p)),
            (u, v) => Ok(kernels::complex_lp(u.as_interleaved(), v.as_interleaved(), p)),
            _ => Err(CoreError::unsupported_operation("lp", self.value_type())),
        )
    }

    /// The number of positions at which the vectors differ.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DimensionMismatch`] if the dimensions differ.
    pub fn hamming(&self, other: &Self) -> Result<usize, CoreError> {
        let (a, b) = self.unify(other)?;
        with_pair!(
            a.as_ref(),
            b.as_ref(),
            (x, y) => Ok(kernels::hamming(x.as_slice(), y.as_slice())),
            (p, q) => Ok(kernels::complex_hamming(p.as_interleaved(), q.as_interleaved())),
            _ => Err(CoreError::unsupported_operation("hamming", self.value_type())),
        )
    }

    /// The inner product.
    ///
    /// Real vectors return [`NumericKind::aggregate`] of the shared kind;
    /// complex vectors return `Σ aᵢ·conj(bᵢ)` at their width.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DimensionMismatch`] if the dimensions differ.
    pub fn dot(&self, other: &Self) -> Result<Value, CoreError> {
        let (a, b) = self.unify(other)?;
        let kind = a.kind();
        match (a.as_ref(), b.as_ref()) {
            (Self::Complex32(p), Self::Complex32(q)) => {
                let (re, im) = kernels::complex_dot(p.as_interleaved(), q.as_interleaved());
                Ok(Value::Complex32(ComplexValue::new(re as f32, im as f32)))
            }
            (Self::Complex64(p), Self::Complex64(q)) => {
                let (re, im) = kernels::complex_dot(p.as_interleaved(), q.as_interleaved());
                Ok(Value::Complex64(ComplexValue::new(re, im)))
            }
            (a, b) => {
                let d = with_pair!(
                    a,
                    b,
                    (x, y) => kernels::dot(x.as_slice(), y.as_slice()),
                    (_p, _q) => 0.0,
                    _ => return Err(CoreError::unsupported_operation("dot", self.value_type())),
                );
                Ok(aggregate_value(kind, d))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::values::{Complex32Value, Complex64Value};

    const EPSILON: f64 = 1e-9;

    fn assert_near(a: f64, b: f64, epsilon: f64) {
        assert!((a - b).abs() < epsilon, "assertion failed: {} !~ {} (diff: {})", a, b, (a - b).abs());
    }

    #[test]
    fn l2_is_sqrt_of_l2_squared() {
        let a = VectorValue::from(vec![0.0_f64, 0.0]);
        let b = VectorValue::from(vec![3.0_f64, 4.0]);
        assert_near(a.l2_squared(&b).unwrap(), 25.0, EPSILON);
        assert_near(a.l2(&b).unwrap(), 5.0, EPSILON);
        assert_near(a.l1(&b).unwrap(), 7.0, EPSILON);
        assert_near(a.lp(&b, 3.0).unwrap(), 91.0_f64.powf(1.0 / 3.0), EPSILON);
    }

    #[test]
    fn metrics_check_dimensions() {
        let a = VectorValue::from(vec![1.0_f32, 2.0, 3.0]);
        let b = VectorValue::from(vec![1.0_f32, 2.0, 3.0, 4.0]);
        let expected = CoreError::dimension_mismatch(3, 4);
        assert_eq!(a.l1(&b), Err(expected.clone()));
        assert_eq!(a.l2(&b), Err(expected.clone()));
        assert_eq!(a.lp(&b, 2.0), Err(expected.clone()));
        assert_eq!(a.hamming(&b), Err(expected.clone()));
        assert_eq!(a.dot(&b), Err(expected));
    }

    #[test]
    fn mixed_kind_metrics() {
        let ints = VectorValue::from(vec![1_i32, 2]);
        let doubles = VectorValue::from(vec![1.5_f64, 2.0]);
        assert_near(ints.l1(&doubles).unwrap(), 0.5, EPSILON);
        assert_eq!(ints.hamming(&doubles).unwrap(), 1);
    }

    #[test]
    fn hamming_counts_mutations() {
        let a = VectorValue::from(vec![true, false, true, true]);
        let b = VectorValue::from(vec![true, true, true, false]);
        assert_eq!(a.hamming(&b).unwrap(), 2);
        assert_eq!(a.hamming(&a).unwrap(), 0);
    }

    #[test]
    fn dot_kinds() {
        let ints = VectorValue::from(vec![1_i32, 2, 3]);
        assert_eq!(ints.dot(&ints).unwrap(), Value::from(14.0_f32));
        let bools = VectorValue::from(vec![true, true]);
        assert_eq!(bools.dot(&bools).unwrap(), Value::from(2.0_f64));
        let c = VectorValue::from_complex(vec![Complex64Value::new(1.0, 1.0)]);
        let d = VectorValue::from_complex(vec![Complex64Value::new(2.0, -1.0)]);
        assert_eq!(c.dot(&d).unwrap(), Value::Complex64(Complex64Value::new(1.0, 3.0)));
        let e = VectorValue::from_complex(vec![Complex32Value::new(0.0, 1.0)]);
        assert_eq!(e.dot(&e).unwrap(), Value::Complex32(Complex32Value::new(1.0, 0.0)));
    }

    #[test]
    fn complex_built_ins_use_modulus() {
        let a = VectorValue::from_complex(vec![Complex64Value::new(0.0, 0.0)]);
        let b = VectorValue::from_complex(vec![Complex64Value::new(3.0, 4.0)]);
        assert_near(a.l1(&b).unwrap(), 5.0, EPSILON);
        assert_near(a.l2(&b).unwrap(), 5.0, EPSILON);
        assert_near(a.lp(&b, 1.0).unwrap(), 5.0, EPSILON);
    }
}
