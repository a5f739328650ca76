//! Complex scalars.
//!
//! [`ComplexValue`] is generic over its component width. Field arithmetic
//! stays in that width; `pow`, `exp`, `ln`, `sqrt` and the trigonometric
//! functions always compute in double precision and return a
//! [`Complex64Value`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::values::element::{Element, Float};
use crate::values::real::RealValue;

/// A complex number with `F` components.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ComplexValue<F> {
    re: F,
    im: F,
}

/// A complex number with 32-bit components.
pub type Complex32Value = ComplexValue<f32>;

/// A complex number with 64-bit components.
pub type Complex64Value = ComplexValue<f64>;

impl<F: Float> ComplexValue<F> {
    /// `0 + 0i`.
    pub const ZERO: Self = Self { re: F::ZERO, im: F::ZERO };
    /// `1 + 0i`.
    pub const ONE: Self = Self { re: F::ONE, im: F::ZERO };
    /// The imaginary unit.
    pub const I: Self = Self { re: F::ZERO, im: F::ONE };
    /// Both components NaN.
    pub const NAN: Self = Self { re: F::NAN, im: F::NAN };
    /// Both components positive infinity.
    pub const INF: Self = Self { re: F::INFINITY, im: F::INFINITY };

    /// Creates a complex number from its components.
    #[inline]
    #[must_use]
    pub const fn new(re: F, im: F) -> Self {
        Self { re, im }
    }

    /// Creates a complex number with a zero imaginary part.
    #[inline]
    #[must_use]
    pub const fn from_real(re: F) -> Self {
        Self { re, im: F::ZERO }
    }

    /// The real part.
    #[inline]
    #[must_use]
    pub const fn re(&self) -> F {
        self.re
    }

    /// The imaginary part.
    #[inline]
    #[must_use]
    pub const fn im(&self) -> F {
        self.im
    }

    /// Converts to another component width.
    #[inline]
    #[must_use]
    pub fn cast<G: Float>(self) -> ComplexValue<G> {
        ComplexValue { re: G::cast(self.re), im: G::cast(self.im) }
    }

    /// The modulus `|z|`.
    #[must_use]
    pub fn abs(&self) -> RealValue<F> {
        RealValue::new((self.re * self.re + self.im * self.im).sqrt())
    }

    /// The complex conjugate.
    #[inline]
    #[must_use]
    pub fn conjugate(&self) -> Self {
        Self { re: self.re, im: -self.im }
    }

    /// `1 / z`.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self::ONE / *self
    }

    /// `z` raised to a real power.
    #[must_use]
    pub fn pow(&self, x: f64) -> Complex64Value {
        let z = self.cast::<f64>();
        let r = (x * z.modulus().ln()).exp();
        let theta = x * z.arg();
        Complex64Value::new(r * theta.cos(), r * theta.sin())
    }

    /// `z` raised to an integer power.
    #[must_use]
    pub fn powi(&self, n: i32) -> Complex64Value {
        self.pow(f64::from(n))
    }

    /// `e^z`.
    #[must_use]
    pub fn exp(&self) -> Complex64Value {
        let z = self.cast::<f64>();
        let r = z.re.exp();
        Complex64Value::new(r * z.im.cos(), r * z.im.sin())
    }

    /// The principal natural logarithm.
    #[must_use]
    pub fn ln(&self) -> Complex64Value {
        let z = self.cast::<f64>();
        Complex64Value::new(z.modulus().ln(), z.arg())
    }

    /// The principal square root.
    #[must_use]
    pub fn sqrt(&self) -> Complex64Value {
        self.pow(0.5)
    }

    /// The cosine.
    #[must_use]
    pub fn cos(&self) -> Complex64Value {
        let z = self.cast::<f64>();
        Complex64Value::new(z.re.cos() * z.im.cosh(), -z.re.sin() * z.im.sinh())
    }

    /// The sine.
    #[must_use]
    pub fn sin(&self) -> Complex64Value {
        let z = self.cast::<f64>();
        Complex64Value::new(z.re.sin() * z.im.cosh(), z.re.cos() * z.im.sinh())
    }

    /// The tangent.
    ///
    /// Saturates to `±i` once the imaginary part exceeds 20 in magnitude,
    /// where `cosh` would overflow the quotient.
    #[must_use]
    pub fn tan(&self) -> Complex64Value {
        let z = self.cast::<f64>();
        if z.im > 20.0 {
            return Complex64Value::I;
        }
        if z.im < -20.0 {
            return -Complex64Value::I;
        }
        let (r, i) = (2.0 * z.re, 2.0 * z.im);
        let d = r.cos() + i.cosh();
        Complex64Value::new(r.sin() / d, i.sinh() / d)
    }

    /// The principal arc tangent.
    #[must_use]
    pub fn atan(&self) -> Complex64Value {
        let z = self.cast::<f64>();
        let i = Complex64Value::I;
        ((z + i) / (i - z)).ln() * (i / Complex64Value::from_real(2.0))
    }

    /// Returns `true` if both components have the same bits as `other`'s.
    #[inline]
    #[must_use]
    pub fn is_equal(&self, other: &Self) -> bool {
        self == other
    }
}

impl Complex64Value {
    fn modulus(&self) -> f64 {
        self.re.hypot(self.im)
    }

    fn arg(&self) -> f64 {
        self.im.atan2(self.re)
    }
}

impl<F: Float> PartialEq for ComplexValue<F> {
    fn eq(&self, other: &Self) -> bool {
        self.re.bits() == other.re.bits() && self.im.bits() == other.im.bits()
    }
}

impl<F: Float> Eq for ComplexValue<F> {}

impl<F: Float> Hash for ComplexValue<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.re.bits().hash(state);
        self.im.bits().hash(state);
    }
}

impl<F: Float> Add for ComplexValue<F> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self { re: self.re + rhs.re, im: self.im + rhs.im }
    }
}

impl<F: Float> Sub for ComplexValue<F> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self { re: self.re - rhs.re, im: self.im - rhs.im }
    }
}

impl<F: Float> Mul for ComplexValue<F> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }
}

impl<F: Float> Div for ComplexValue<F> {
    type Output = Self;

    /// Smith's algorithm: scale by the larger divisor component so the
    /// intermediate `c² + d²` never overflows.
    fn div(self, rhs: Self) -> Self {
        let (a, b, c, d) = (self.re, self.im, rhs.re, rhs.im);
        if c.abs() < d.abs() {
            let q = c / d;
            let den = c * q + d;
            Self { re: (a * q + b) / den, im: (b * q - a) / den }
        } else {
            let q = d / c;
            let den = d * q + c;
            Self { re: (b * q + a) / den, im: (b - a * q) / den }
        }
    }
}

impl<F: Float> Neg for ComplexValue<F> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self { re: -self.re, im: -self.im }
    }
}

impl<F: Float> fmt::Display for ComplexValue<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im.to_f64().is_sign_negative() {
            write!(f, "{}-{}i", self.re, -self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_near(actual: Complex64Value, re: f64, im: f64) {
        assert!(
            (actual.re() - re).abs() < EPSILON && (actual.im() - im).abs() < EPSILON,
            "assertion failed: {actual} !~ {re}+{im}i"
        );
    }

    #[test]
    fn modulus() {
        assert_eq!(Complex64Value::new(3.0, 4.0).abs(), RealValue::new(5.0));
        assert_eq!(Complex32Value::new(3.0, 4.0).abs(), RealValue::new(5.0_f32));
    }

    #[test]
    fn multiplication() {
        assert_eq!(Complex64Value::ONE * Complex64Value::I, Complex64Value::I);
        assert_eq!(Complex64Value::I * Complex64Value::I, Complex64Value::new(-1.0, 0.0));
    }

    #[test]
    fn smith_division_both_branches() {
        let a = Complex64Value::new(1.0, 2.0);
        // |c| >= |d|
        assert_near(a / Complex64Value::new(3.0, 1.0), 0.5, 0.5);
        // |c| < |d|
        assert_near(a / Complex64Value::new(1.0, 3.0), 0.7, -0.1);
    }

    #[test]
    fn smith_division_avoids_overflow() {
        let big = Complex64Value::new(1e300, 1e300);
        assert_near(big / big, 1.0, 0.0);
    }

    #[test]
    fn inverse_and_conjugate() {
        let z = Complex64Value::new(0.0, 2.0);
        assert_near(z.inverse(), 0.0, -0.5);
        assert_eq!(z.conjugate(), Complex64Value::new(0.0, -2.0));
        assert_eq!(-z, Complex64Value::new(-0.0, -2.0));
    }

    #[test]
    fn transcendentals_widen_to_complex64() {
        let z = Complex32Value::new(0.0, std::f32::consts::PI);
        let e: Complex64Value = z.exp();
        assert!((e.re() + 1.0).abs() < 1e-6);
        assert!(e.im().abs() < 1e-6);
    }

    #[test]
    fn ln_exp_round_trip() {
        let z = Complex64Value::new(0.5, -1.25);
        let back = z.ln().exp();
        assert_near(back, 0.5, -1.25);
    }

    #[test]
    fn square_root() {
        assert_near(Complex64Value::new(-4.0, 0.0).sqrt(), 0.0, 2.0);
        assert_near(Complex64Value::new(3.0, 4.0).sqrt(), 2.0, 1.0);
    }

    #[test]
    fn trigonometry() {
        let z = Complex64Value::new(0.3, 0.2);
        let (s, c) = (z.sin(), z.cos());
        assert_near(s * s + c * c, 1.0, 0.0);
        let t = z.tan();
        assert_near(t, (s / c).re(), (s / c).im());
    }

    #[test]
    fn tangent_saturates() {
        assert_eq!(Complex64Value::new(1.0, 25.0).tan(), Complex64Value::I);
        assert_eq!(Complex64Value::new(1.0, -25.0).tan(), -Complex64Value::I);
    }

    #[test]
    fn arc_tangent_inverts_tangent() {
        let z = Complex64Value::new(0.4, 0.1);
        assert_near(z.tan().atan(), 0.4, 0.1);
    }

    #[test]
    fn equality_is_bitwise() {
        assert!(Complex64Value::NAN.is_equal(&Complex64Value::NAN));
        assert!(!Complex64Value::new(0.0, 0.0).is_equal(&Complex64Value::new(-0.0, 0.0)));
    }

    #[test]
    fn display() {
        assert_eq!(Complex64Value::new(1.0, -2.0).to_string(), "1-2i");
        assert_eq!(Complex32Value::new(1.5, 2.0).to_string(), "1.5+2i");
    }
}
