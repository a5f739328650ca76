//! Kernels over complex vectors.
//!
//! Operands are interleaved `[re, im]` buffers widened to `f64`; weights hold
//! one real factor per complex element. L1 and L2 read the squared magnitude
//! of `z = b - a` as `re^2 - im^2 + 2 re im`, so they are not the modulus
//! distances of [`VectorValue::l1`](quiverdb_core::VectorValue::l1) and
//! can be `NaN` where that expression is negative.

use crate::config::ExecutionPath;

/// Partial sums kept by the vectorized path.
const LANES: usize = 4;

/// Sums `term(k)` over `0..len` on the given path.
fn accumulate(len: usize, path: ExecutionPath, term: impl Fn(usize) -> f64) -> f64 {
    match path {
        ExecutionPath::Scalar => (0..len).map(&term).sum(),
        ExecutionPath::Vectorized => {
            let chunked = len - (len % LANES);
            let mut sums = [0.0; LANES];
            for i in (0..chunked).step_by(LANES) {
                for (lane, sum) in sums.iter_mut().enumerate() {
                    *sum += term(i + lane);
                }
            }
            sums.iter().sum::<f64>() + (chunked..len).map(&term).sum::<f64>()
        }
    }
}

#[inline]
fn weight(w: Option<&[f64]>, k: usize) -> f64 {
    w.map_or(1.0, |w| w[k])
}

/// `re^2 - im^2 + 2 re im` of the `k`-th difference `b - a`.
#[inline]
fn square_term(a: &[f64], b: &[f64], k: usize) -> f64 {
    let re = b[2 * k] - a[2 * k];
    let im = b[2 * k + 1] - a[2 * k + 1];
    re * re - im * im + 2.0 * re * im
}

/// L1 distance, `sum(w * sqrt(re^2 - im^2 + 2 re im))`.
///
/// # Panics
///
/// Debug-panics if the buffers have different lengths.
#[must_use]
pub fn manhattan_distance(a: &[f64], b: &[f64], w: Option<&[f64]>, path: ExecutionPath) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");
    accumulate(a.len() / 2, path, |k| square_term(a, b, k).sqrt() * weight(w, k))
}

/// Squared L2 distance, `sum(w * (re^2 - im^2 + 2 re im))`.
///
/// # Panics
///
/// Debug-panics if the buffers have different lengths.
#[must_use]
pub fn euclidean_distance_squared(
    a: &[f64],
    b: &[f64],
    w: Option<&[f64]>,
    path: ExecutionPath,
) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");
    accumulate(a.len() / 2, path, |k| square_term(a, b, k) * weight(w, k))
}

/// The real part of `sum(a * conj(b))` and both squared moduli.
///
/// # Panics
///
/// Debug-panics if the buffers have different lengths.
#[must_use]
pub fn cosine_parts(
    a: &[f64],
    b: &[f64],
    w: Option<&[f64]>,
    path: ExecutionPath,
) -> (f64, f64, f64) {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");
    let len = a.len() / 2;
    let dot = accumulate(len, path, |k| {
        (a[2 * k] * b[2 * k] + a[2 * k + 1] * b[2 * k + 1]) * weight(w, k)
    });
    let norm_a = accumulate(len, path, |k| {
        (a[2 * k] * a[2 * k] + a[2 * k + 1] * a[2 * k + 1]) * weight(w, k)
    });
    let norm_b = accumulate(len, path, |k| {
        (b[2 * k] * b[2 * k] + b[2 * k + 1] * b[2 * k + 1]) * weight(w, k)
    });
    (dot, norm_a, norm_b)
}

/// Number (or total weight) of elements whose real or imaginary parts differ.
///
/// # Panics
///
/// Debug-panics if the buffers have different lengths.
#[must_use]
pub fn hamming_distance(a: &[f64], b: &[f64], w: Option<&[f64]>, path: ExecutionPath) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");
    accumulate(a.len() / 2, path, |k| {
        if a[2 * k] != b[2 * k] || a[2 * k + 1] != b[2 * k + 1] {
            weight(w, k)
        } else {
            0.0
        }
    })
}

/// `1 - |sum(w * a * conj(b))|`.
///
/// # Panics
///
/// Debug-panics if the buffers have different lengths.
#[must_use]
pub fn inner_product_distance(
    a: &[f64],
    b: &[f64],
    w: Option<&[f64]>,
    path: ExecutionPath,
) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");
    let len = a.len() / 2;
    let re = accumulate(len, path, |k| {
        (a[2 * k] * b[2 * k] + a[2 * k + 1] * b[2 * k + 1]) * weight(w, k)
    });
    let im = accumulate(len, path, |k| {
        (a[2 * k + 1] * b[2 * k] - a[2 * k] * b[2 * k + 1]) * weight(w, k)
    });
    1.0 - re.hypot(im)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn assert_near(a: f64, b: f64, epsilon: f64) {
        assert!(
            (a - b).abs() < epsilon,
            "assertion failed: {} !~ {} (diff: {})",
            a,
            b,
            (a - b).abs()
        );
    }

    const PATHS: [ExecutionPath; 2] = [ExecutionPath::Scalar, ExecutionPath::Vectorized];

    #[test]
    fn test_squared_identity() {
        // z = (3 + 1i) - (1 + 0i) = 2 + 1i: 4 - 1 + 4 = 7
        let a = [1.0, 0.0];
        let b = [3.0, 1.0];
        for path in PATHS {
            assert_near(euclidean_distance_squared(&a, &b, None, path), 7.0, EPSILON);
            assert_near(manhattan_distance(&a, &b, None, path), 7.0_f64.sqrt(), EPSILON);
        }
    }

    #[test]
    fn test_negative_identity_is_nan() {
        // z = 0 + 1i: 0 - 1 + 0 = -1
        let a = [0.0, 0.0];
        let b = [0.0, 1.0];
        assert!(manhattan_distance(&a, &b, None, ExecutionPath::Scalar).is_nan());
        assert_near(euclidean_distance_squared(&a, &b, None, ExecutionPath::Scalar), -1.0, EPSILON);
    }

    #[test]
    fn test_weights_scale_each_element() {
        let a = [0.0; 4];
        let b = [1.0, 0.0, 2.0, 0.0];
        let w = [3.0, 0.5];
        for path in PATHS {
            assert_near(euclidean_distance_squared(&a, &b, Some(&w), path), 5.0, EPSILON);
            assert_near(manhattan_distance(&a, &b, Some(&w), path), 4.0, EPSILON);
        }
    }

    #[test]
    fn test_cosine_parts() {
        // a = [1 + 1i], b = [1 - 1i]: Re(a * conj(b)) = 1 - 1 = 0
        let (dot, na, nb) = cosine_parts(&[1.0, 1.0], &[1.0, -1.0], None, ExecutionPath::Scalar);
        assert_near(dot, 0.0, EPSILON);
        assert_near(na, 2.0, EPSILON);
        assert_near(nb, 2.0, EPSILON);
    }

    #[test]
    fn test_hamming_distance() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, f64::NAN];
        let b = [1.0, 2.0, 3.0, -4.0, 5.0, f64::NAN];
        for path in PATHS {
            assert_near(hamming_distance(&a, &b, None, path), 2.0, EPSILON);
            assert_near(hamming_distance(&a, &b, Some(&[1.0, 2.0, 4.0]), path), 6.0, EPSILON);
        }
    }

    #[test]
    fn test_inner_product_distance() {
        // (1 + 1i) * conj(2 - 1i) = (1 + 1i)(2 + 1i) = 1 + 3i
        let a = [1.0, 1.0];
        let b = [2.0, -1.0];
        for path in PATHS {
            assert_near(inner_product_distance(&a, &b, None, path), 1.0 - 10.0_f64.sqrt(), EPSILON);
        }
    }

    #[test]
    fn test_paths_agree() {
        let a: Vec<f64> = (0..38).map(|i| f64::from(i) * 0.25 - 3.0).collect();
        let b: Vec<f64> = (0..38).map(|i| 2.0 - f64::from(i) * 0.1).collect();
        let w: Vec<f64> = (0..19).map(|i| 1.0 + f64::from(i)).collect();
        let s = euclidean_distance_squared(&a, &b, Some(&w), ExecutionPath::Scalar);
        let v = euclidean_distance_squared(&a, &b, Some(&w), ExecutionPath::Vectorized);
        assert_near(s, v, 1e-9);
        let s = inner_product_distance(&a, &b, None, ExecutionPath::Scalar);
        let v = inner_product_distance(&a, &b, None, ExecutionPath::Vectorized);
        assert_near(s, v, 1e-9);
    }
}
