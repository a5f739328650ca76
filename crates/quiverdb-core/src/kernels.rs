//! Scalar reference kernels over primitive slices.
//!
//! These are the single implementation of the unweighted metrics that
//! [`VectorValue`](crate::VectorValue) exposes, and the unweighted scalar
//! path of the distance kernels calls them directly. Every kernel
//! accumulates in `f64`.
//!
//! Complex kernels take interleaved `[re, im]` buffers.

use crate::values::{Element, Float};

/// `Σ |bᵢ − aᵢ|`.
///
/// # Panics
///
/// Debug-panics if the slices have different lengths.
#[inline]
#[must_use]
pub fn l1<T: Element>(a: &[T], b: &[T]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");
    a.iter().zip(b).map(|(&x, &y)| (y.to_f64() - x.to_f64()).abs()).sum()
}

/// `Σ (bᵢ − aᵢ)²`.
///
/// # Panics
///
/// Debug-panics if the slices have different lengths.
#[inline]
#[must_use]
pub fn l2_squared<T: Element>(a: &[T], b: &[T]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = y.to_f64() - x.to_f64();
            d * d
        })
        .sum()
}

/// `(Σ |bᵢ − aᵢ|ᵖ)^(1/p)`.
///
/// # Panics
///
/// Debug-panics if the slices have different lengths.
#[inline]
#[must_use]
pub fn lp<T: Element>(a: &[T], b: &[T], p: f64) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");
    let sum: f64 = a.iter().zip(b).map(|(&x, &y)| (y.to_f64() - x.to_f64()).abs().powf(p)).sum();
    sum.powf(1.0 / p)
}

/// `Σ aᵢ·bᵢ`.
///
/// # Panics
///
/// Debug-panics if the slices have different lengths.
#[inline]
#[must_use]
pub fn dot<T: Element>(a: &[T], b: &[T]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");
    a.iter().zip(b).map(|(&x, &y)| x.to_f64() * y.to_f64()).sum()
}

/// `Σ aᵢ²`.
#[inline]
#[must_use]
pub fn sum_of_squares<T: Element>(a: &[T]) -> f64 {
    a.iter().map(|&x| x.to_f64() * x.to_f64()).sum()
}

/// The index of the first position where `a` and `b` differ.
#[inline]
#[must_use]
pub fn first_mismatch<T: PartialEq>(a: &[T], b: &[T]) -> Option<usize> {
    a.iter().zip(b).position(|(x, y)| x != y)
}

/// The number of positions where `a` and `b` differ.
///
/// Skips the common prefix via [`first_mismatch`] before counting. Both
/// steps use the same `!=`, so the count equals a full elementwise scan
/// (NaN lanes always count as different).
///
/// # Panics
///
/// Debug-panics if the slices have different lengths.
#[must_use]
pub fn hamming<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");
    match first_mismatch(a, b) {
        None => 0,
        Some(start) => a[start..].iter().zip(&b[start..]).filter(|(x, y)| x != y).count(),
    }
}

/// `Σ |bᵢ − aᵢ|` with the complex modulus.
///
/// # Panics
///
/// Debug-panics if the buffers have different lengths.
#[must_use]
pub fn complex_l1<F: Float>(a: &[F], b: &[F]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");
    a.chunks_exact(2)
        .zip(b.chunks_exact(2))
        .map(|(x, y)| {
            let re = y[0].to_f64() - x[0].to_f64();
            let im = y[1].to_f64() - x[1].to_f64();
            re.hypot(im)
        })
        .sum()
}

/// `(Σ |bᵢ − aᵢ|ᵖ)^(1/p)` with the complex modulus.
///
/// # Panics
///
/// Debug-panics if the buffers have different lengths.
#[must_use]
pub fn complex_lp<F: Float>(a: &[F], b: &[F], p: f64) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");
    let sum: f64 = a
        .chunks_exact(2)
        .zip(b.chunks_exact(2))
        .map(|(x, y)| {
            let re = y[0].to_f64() - x[0].to_f64();
            let im = y[1].to_f64() - x[1].to_f64();
            re.hypot(im).powf(p)
        })
        .sum();
    sum.powf(1.0 / p)
}

/// `Σ |bᵢ − aᵢ|²` with the complex modulus.
///
/// # Panics
///
/// Debug-panics if the buffers have different lengths.
#[must_use]
pub fn complex_l2_squared<F: Float>(a: &[F], b: &[F]) -> f64 {
    // Squared moduli sum componentwise over the interleaved buffer.
    l2_squared(a, b)
}

/// `Σ aᵢ·conj(bᵢ)` as `(re, im)`.
///
/// # Panics
///
/// Debug-panics if the buffers have different lengths.
#[must_use]
pub fn complex_dot<F: Float>(a: &[F], b: &[F]) -> (f64, f64) {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");
    a.chunks_exact(2).zip(b.chunks_exact(2)).fold((0.0, 0.0), |(re, im), (x, y)| {
        let (ar, ai) = (x[0].to_f64(), x[1].to_f64());
        let (br, bi) = (y[0].to_f64(), y[1].to_f64());
        (re + ar * br + ai * bi, im + ai * br - ar * bi)
    })
}

/// The number of complex elements that differ in either component.
///
/// # Panics
///
/// Debug-panics if the buffers have different lengths.
#[must_use]
pub fn complex_hamming<F: Float>(a: &[F], b: &[F]) -> usize {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");
    let Some(start) = first_mismatch(a, b) else {
        return 0;
    };
    let start = start - start % 2;
    a[start..].chunks_exact(2).zip(b[start..].chunks_exact(2)).filter(|(x, y)| x != y).count()
}
