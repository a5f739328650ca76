//! SIMD-optimized distance functions using the `wide` crate.
//!
//! Sums process 4 doubles at a time using `f64x4` SIMD vectors, with a
//! scalar loop for the remainder. Kernels with a per-element branch
//! (chi-squared, Hamming) keep four explicit partial sums instead.
//!
//! Results equal the scalar reference kernels up to floating-point
//! reassociation.

use wide::f64x4;

use super::scalar::chi_squared_term;

/// Number of f64 elements processed per SIMD iteration.
const SIMD_WIDTH: usize = 4;

/// Convert a slice to a fixed-size array for SIMD.
/// Returns zero array if conversion fails (should never happen with correct loop bounds).
#[inline]
fn slice_to_simd_array(slice: &[f64]) -> [f64; SIMD_WIDTH] {
    slice.try_into().unwrap_or([0.0; SIMD_WIDTH])
}

#[inline]
fn load(slice: &[f64], i: usize) -> f64x4 {
    f64x4::new(slice_to_simd_array(&slice[i..i + SIMD_WIDTH]))
}

/// Calculate the Manhattan (L1) distance between two vectors.
///
/// # Panics
///
/// Debug-panics if vectors have different lengths.
#[inline]
#[must_use]
pub fn manhattan_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");

    let len = a.len();
    let simd_len = len - (len % SIMD_WIDTH);

    let mut sum = f64x4::ZERO;

    for i in (0..simd_len).step_by(SIMD_WIDTH) {
        let diff = load(a, i) - load(b, i);
        sum += diff.abs();
    }

    let mut result = horizontal_sum(sum);

    for i in simd_len..len {
        result += (a[i] - b[i]).abs();
    }

    result
}

/// Weighted Manhattan distance: `sum(w * |a - b|)`.
///
/// # Panics
///
/// Debug-panics if the slices have different lengths.
#[inline]
#[must_use]
pub fn weighted_manhattan_distance(a: &[f64], b: &[f64], w: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");
    debug_assert_eq!(a.len(), w.len(), "weights must have same dimension");

    let len = a.len();
    let simd_len = len - (len % SIMD_WIDTH);

    let mut sum = f64x4::ZERO;

    for i in (0..simd_len).step_by(SIMD_WIDTH) {
        let diff = load(a, i) - load(b, i);
        sum += diff.abs() * load(w, i);
    }

    let mut result = horizontal_sum(sum);

    for i in simd_len..len {
        result += (a[i] - b[i]).abs() * w[i];
    }

    result
}

/// Calculate the squared Euclidean (L2) distance between two vectors.
///
/// # Panics
///
/// Debug-panics if vectors have different lengths.
#[inline]
#[must_use]
pub fn euclidean_distance_squared(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");

    let len = a.len();
    let simd_len = len - (len % SIMD_WIDTH);

    let mut sum = f64x4::ZERO;

    for i in (0..simd_len).step_by(SIMD_WIDTH) {
        let diff = load(a, i) - load(b, i);
        sum += diff * diff;
    }

    let mut result = horizontal_sum(sum);

    for i in simd_len..len {
        let diff = a[i] - b[i];
        result += diff * diff;
    }

    result
}

/// Weighted squared Euclidean distance: `sum(w * (a - b)^2)`.
///
/// # Panics
///
/// Debug-panics if the slices have different lengths.
#[inline]
#[must_use]
pub fn weighted_euclidean_distance_squared(a: &[f64], b: &[f64], w: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");
    debug_assert_eq!(a.len(), w.len(), "weights must have same dimension");

    let len = a.len();
    let simd_len = len - (len % SIMD_WIDTH);

    let mut sum = f64x4::ZERO;

    for i in (0..simd_len).step_by(SIMD_WIDTH) {
        let diff = load(a, i) - load(b, i);
        sum += diff * diff * load(w, i);
    }

    let mut result = horizontal_sum(sum);

    for i in simd_len..len {
        let diff = a[i] - b[i];
        result += diff * diff * w[i];
    }

    result
}

/// Calculate the dot product between two vectors.
///
/// # Panics
///
/// Debug-panics if vectors have different lengths.
#[inline]
#[must_use]
pub fn dot_product(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");

    let len = a.len();
    let simd_len = len - (len % SIMD_WIDTH);

    let mut sum = f64x4::ZERO;

    for i in (0..simd_len).step_by(SIMD_WIDTH) {
        sum += load(a, i) * load(b, i);
    }

    let mut result = horizontal_sum(sum);

    for i in simd_len..len {
        result += a[i] * b[i];
    }

    result
}

/// Weighted dot product: `sum(w * a * b)`.
///
/// # Panics
///
/// Debug-panics if the slices have different lengths.
#[inline]
#[must_use]
pub fn weighted_dot_product(a: &[f64], b: &[f64], w: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");
    debug_assert_eq!(a.len(), w.len(), "weights must have same dimension");

    let len = a.len();
    let simd_len = len - (len % SIMD_WIDTH);

    let mut sum = f64x4::ZERO;

    for i in (0..simd_len).step_by(SIMD_WIDTH) {
        sum += load(a, i) * load(b, i) * load(w, i);
    }

    let mut result = horizontal_sum(sum);

    for i in simd_len..len {
        result += a[i] * b[i] * w[i];
    }

    result
}

/// The dot product and both squared norms, in one pass.
///
/// # Panics
///
/// Debug-panics if vectors have different lengths.
#[inline]
#[must_use]
pub fn cosine_parts(a: &[f64], b: &[f64]) -> (f64, f64, f64) {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");

    let len = a.len();
    let simd_len = len - (len % SIMD_WIDTH);

    let mut dot_sum = f64x4::ZERO;
    let mut norm_a_sum = f64x4::ZERO;
    let mut norm_b_sum = f64x4::ZERO;

    // Dot product and norms together
    for i in (0..simd_len).step_by(SIMD_WIDTH) {
        let va = load(a, i);
        let vb = load(b, i);

        dot_sum += va * vb;
        norm_a_sum += va * va;
        norm_b_sum += vb * vb;
    }

    let mut dot = horizontal_sum(dot_sum);
    let mut norm_a_sq = horizontal_sum(norm_a_sum);
    let mut norm_b_sq = horizontal_sum(norm_b_sum);

    for i in simd_len..len {
        dot += a[i] * b[i];
        norm_a_sq += a[i] * a[i];
        norm_b_sq += b[i] * b[i];
    }

    (dot, norm_a_sq, norm_b_sq)
}

/// Like [`cosine_parts`], with every term scaled by its weight.
///
/// # Panics
///
/// Debug-panics if the slices have different lengths.
#[inline]
#[must_use]
pub fn weighted_cosine_parts(a: &[f64], b: &[f64], w: &[f64]) -> (f64, f64, f64) {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");
    debug_assert_eq!(a.len(), w.len(), "weights must have same dimension");

    let len = a.len();
    let simd_len = len - (len % SIMD_WIDTH);

    let mut dot_sum = f64x4::ZERO;
    let mut norm_a_sum = f64x4::ZERO;
    let mut norm_b_sum = f64x4::ZERO;

    for i in (0..simd_len).step_by(SIMD_WIDTH) {
        let va = load(a, i);
        let vb = load(b, i);
        let vw = load(w, i);

        dot_sum += va * vb * vw;
        norm_a_sum += va * va * vw;
        norm_b_sum += vb * vb * vw;
    }

    let mut dot = horizontal_sum(dot_sum);
    let mut norm_a_sq = horizontal_sum(norm_a_sum);
    let mut norm_b_sq = horizontal_sum(norm_b_sum);

    for i in simd_len..len {
        dot += a[i] * b[i] * w[i];
        norm_a_sq += a[i] * a[i] * w[i];
        norm_b_sq += b[i] * b[i] * w[i];
    }

    (dot, norm_a_sq, norm_b_sq)
}

/// Calculate the chi-squared distance: `sum((a - b)^2 / (a + b))`.
///
/// Components with `|a + b| < 1e-6` contribute nothing.
///
/// # Panics
///
/// Debug-panics if vectors have different lengths.
#[inline]
#[must_use]
pub fn chi_squared_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");

    let mut sums = [0.0; SIMD_WIDTH];
    let mut chunks_a = a.chunks_exact(SIMD_WIDTH);
    let mut chunks_b = b.chunks_exact(SIMD_WIDTH);

    for (ca, cb) in chunks_a.by_ref().zip(chunks_b.by_ref()) {
        for lane in 0..SIMD_WIDTH {
            sums[lane] += chi_squared_term(ca[lane], cb[lane]);
        }
    }

    let mut result: f64 = sums.iter().sum();

    for (&x, &y) in chunks_a.remainder().iter().zip(chunks_b.remainder()) {
        result += chi_squared_term(x, y);
    }

    result
}

/// Weighted chi-squared distance.
///
/// # Panics
///
/// Debug-panics if the slices have different lengths.
#[inline]
#[must_use]
pub fn weighted_chi_squared_distance(a: &[f64], b: &[f64], w: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");
    debug_assert_eq!(a.len(), w.len(), "weights must have same dimension");

    let len = a.len();
    let simd_len = len - (len % SIMD_WIDTH);

    let mut sums = [0.0; SIMD_WIDTH];

    for i in (0..simd_len).step_by(SIMD_WIDTH) {
        for lane in 0..SIMD_WIDTH {
            let k = i + lane;
            sums[lane] += chi_squared_term(a[k], b[k]) * w[k];
        }
    }

    let mut result: f64 = sums.iter().sum();

    for i in simd_len..len {
        result += chi_squared_term(a[i], b[i]) * w[i];
    }

    result
}

/// Count the positions where the vectors differ, under IEEE equality.
///
/// # Panics
///
/// Debug-panics if vectors have different lengths.
#[inline]
#[must_use]
pub fn hamming_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");

    let mut counts = [0_usize; SIMD_WIDTH];
    let mut chunks_a = a.chunks_exact(SIMD_WIDTH);
    let mut chunks_b = b.chunks_exact(SIMD_WIDTH);

    for (ca, cb) in chunks_a.by_ref().zip(chunks_b.by_ref()) {
        for lane in 0..SIMD_WIDTH {
            counts[lane] += usize::from(ca[lane] != cb[lane]);
        }
    }

    let tail = chunks_a.remainder().iter().zip(chunks_b.remainder()).filter(|(x, y)| x != y).count();

    (counts.iter().sum::<usize>() + tail) as f64
}

/// Sum of the weights at the positions where the vectors differ.
///
/// # Panics
///
/// Debug-panics if the slices have different lengths.
#[inline]
#[must_use]
pub fn weighted_hamming_distance(a: &[f64], b: &[f64], w: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must have same dimension");
    debug_assert_eq!(a.len(), w.len(), "weights must have same dimension");

    let len = a.len();
    let simd_len = len - (len % SIMD_WIDTH);

    let mut sums = [0.0; SIMD_WIDTH];

    for i in (0..simd_len).step_by(SIMD_WIDTH) {
        for lane in 0..SIMD_WIDTH {
            let k = i + lane;
            if a[k] != b[k] {
                sums[lane] += w[k];
            }
        }
    }

    let mut result: f64 = sums.iter().sum();

    for i in simd_len..len {
        if a[i] != b[i] {
            result += w[i];
        }
    }

    result
}

/// Horizontal sum of an f64x4 SIMD register.
#[inline]
fn horizontal_sum(v: f64x4) -> f64 {
    let arr: [f64; 4] = v.to_array();
    arr.iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::scalar;

    const EPSILON: f64 = 1e-9;

    fn assert_near(a: f64, b: f64, epsilon: f64) {
        assert!(
            (a - b).abs() < epsilon,
            "assertion failed: {} !~ {} (diff: {})",
            a,
            b,
            (a - b).abs()
        );
    }

    fn ramp(len: usize, scale: f64, offset: f64) -> Vec<f64> {
        (0..len).map(|i| (i as f64).mul_add(scale, offset)).collect()
    }

    #[test]
    fn test_horizontal_sum() {
        let v = f64x4::new([1.0, 2.0, 3.0, 4.0]);
        assert_near(horizontal_sum(v), 10.0, EPSILON);
    }

    #[test]
    fn test_manhattan_distance_simd_aligned() {
        // 4 elements - exactly one SIMD iteration
        let a = [0.0; 4];
        let b = [1.0, -2.0, 3.0, -4.0];
        assert_near(manhattan_distance(&a, &b), 10.0, EPSILON);
    }

    #[test]
    fn test_manhattan_distance_mixed() {
        // 6 elements - one SIMD iteration + 2 remainder
        let a = [0.0; 6];
        let b = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert_near(manhattan_distance(&a, &b), 21.0, EPSILON);
    }

    #[test]
    fn test_euclidean_distance_squared_small() {
        assert_near(euclidean_distance_squared(&[0.0, 0.0], &[3.0, 4.0]), 25.0, EPSILON);
    }

    #[test]
    fn test_dot_product_mixed() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [1.0; 5];
        assert_near(dot_product(&a, &b), 15.0, EPSILON);
    }

    #[test]
    fn test_chi_squared_skips_vanishing_sums() {
        let a = [1.0, 2.0, 0.0, 5.0, 1.0];
        let b = [3.0, -2.0, 0.0, 5.0, 3.0];
        assert_near(chi_squared_distance(&a, &b), 2.0, EPSILON);
    }

    #[test]
    fn test_hamming_distance_mixed() {
        let a = [1.0, f64::NAN, -0.0, 4.0, 5.0, 6.0];
        let b = [1.0, f64::NAN, 0.0, 5.0, 5.0, 7.0];
        assert_near(hamming_distance(&a, &b), 3.0, EPSILON);
        assert_near(weighted_hamming_distance(&a, &b, &[1.0, 2.0, 4.0, 8.0, 16.0, 32.0]), 42.0, EPSILON);
    }

    #[test]
    fn test_matches_scalar_large() {
        // 1536-dim vectors
        let a = ramp(1536, 0.001, -0.7);
        let b = ramp(1536, -0.0007, 0.4);
        let w = ramp(1536, 0.0001, 0.5);

        assert_near(manhattan_distance(&a, &b), scalar::manhattan_distance(&a, &b), 1e-8);
        assert_near(
            weighted_manhattan_distance(&a, &b, &w),
            scalar::weighted_manhattan_distance(&a, &b, &w),
            1e-8,
        );
        assert_near(euclidean_distance_squared(&a, &b), scalar::euclidean_distance_squared(&a, &b), 1e-8);
        assert_near(
            weighted_euclidean_distance_squared(&a, &b, &w),
            scalar::weighted_euclidean_distance_squared(&a, &b, &w),
            1e-8,
        );
        assert_near(dot_product(&a, &b), scalar::dot_product(&a, &b), 1e-8);
        assert_near(weighted_dot_product(&a, &b, &w), scalar::weighted_dot_product(&a, &b, &w), 1e-8);
        assert_near(chi_squared_distance(&a, &b), scalar::chi_squared_distance(&a, &b), 1e-6);
        assert_near(
            weighted_chi_squared_distance(&a, &b, &w),
            scalar::weighted_chi_squared_distance(&a, &b, &w),
            1e-6,
        );
        assert_near(hamming_distance(&a, &b), scalar::hamming_distance(&a, &b), EPSILON);

        let (dot, na, nb) = cosine_parts(&a, &b);
        let (sdot, sna, snb) = scalar::cosine_parts(&a, &b);
        assert_near(dot, sdot, 1e-8);
        assert_near(na, sna, 1e-8);
        assert_near(nb, snb, 1e-8);

        let (dot, na, nb) = weighted_cosine_parts(&a, &b, &w);
        let (sdot, sna, snb) = scalar::weighted_cosine_parts(&a, &b, &w);
        assert_near(dot, sdot, 1e-8);
        assert_near(na, sna, 1e-8);
        assert_near(nb, snb, 1e-8);
    }
}
