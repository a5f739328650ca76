//! Scalar reference kernels.
//!
//! Every kernel accumulates one element at a time, in order, in `f64`. The
//! vectorized kernels in the sibling module are tested against these.
//!
//! The unweighted L1, squared L2, dot product and Hamming kernels delegate to
//! [`quiverdb_core::kernels`], so they agree bit for bit with the built-in
//! metrics of [`VectorValue`](quiverdb_core::VectorValue).

use quiverdb_core::kernels;

/// Mean earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Components whose sum is below this are skipped by the chi-squared kernels.
pub const CHI_SQUARED_EPSILON: f64 = 1e-6;

/// Calculate the Manhattan (L1) distance between two vectors.
///
/// # Panics
///
/// Debug-panics if vectors have different lengths.
#[inline]
#[must_use]
pub fn manhattan_distance(a: &[f64], b: &[f64]) -> f64 {
    kernels::l1(a, b)
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
    a.iter().zip(b.iter()).zip(w.iter()).map(|((x, y), w)| (x - y).abs() * w).sum()
}

/// Calculate the squared Euclidean (L2) distance between two vectors.
///
/// # Panics
///
/// Debug-panics if vectors have different lengths.
#[inline]
#[must_use]
pub fn euclidean_distance_squared(a: &[f64], b: &[f64]) -> f64 {
    kernels::l2_squared(a, b)
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
    a.iter().zip(b.iter()).zip(w.iter()).map(|((x, y), w)| (x - y) * (x - y) * w).sum()
}

/// Calculate the dot product between two vectors.
///
/// # Panics
///
/// Debug-panics if vectors have different lengths.
#[inline]
#[must_use]
pub fn dot_product(a: &[f64], b: &[f64]) -> f64 {
    kernels::dot(a, b)
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
    a.iter().zip(b.iter()).zip(w.iter()).map(|((x, y), w)| x * y * w).sum()
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
    a.iter().zip(b.iter()).fold((0.0, 0.0, 0.0), |(dot, na, nb), (x, y)| {
        (dot + x * y, na + x * x, nb + y * y)
    })
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
    a.iter().zip(b.iter()).zip(w.iter()).fold((0.0, 0.0, 0.0), |(dot, na, nb), ((x, y), w)| {
        (dot + x * y * w, na + x * x * w, nb + y * y * w)
    })
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
    a.iter().zip(b.iter()).map(|(&x, &y)| chi_squared_term(x, y)).sum()
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
    a.iter().zip(b.iter()).zip(w.iter()).map(|((&x, &y), w)| chi_squared_term(x, y) * w).sum()
}

#[inline]
pub(crate) fn chi_squared_term(x: f64, y: f64) -> f64 {
    let sum = x + y;
    if sum.abs() < CHI_SQUARED_EPSILON {
        0.0
    } else {
        (x - y) * (x - y) / sum
    }
}

/// Count the positions where the vectors differ.
///
/// Uses IEEE equality: `NaN` differs from everything, `-0.0 == 0.0`.
///
/// # Panics
///
/// Debug-panics if vectors have different lengths.
#[inline]
#[must_use]
pub fn hamming_distance(a: &[f64], b: &[f64]) -> f64 {
    kernels::hamming(a, b) as f64
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
    a.iter().zip(b.iter()).zip(w.iter()).filter(|((x, y), _)| x != y).map(|(_, w)| w).sum()
}

/// Great-circle distance in meters between two `[latitude, longitude]`
/// points given in degrees.
///
/// # Panics
///
/// Debug-panics unless both slices hold exactly two components.
#[must_use]
pub fn haversine_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), 2, "haversine takes [lat, lon]");
    debug_assert_eq!(b.len(), 2, "haversine takes [lat, lon]");

    let (lat_a, lon_a) = (a[0], a[1]);
    let (lat_b, lon_b) = (b[0], b[1]);

    let phi_a = lat_a.to_radians();
    let phi_b = lat_b.to_radians();
    let delta_phi = (lat_b - lat_a).to_radians();
    let delta_lambda = (lon_b - lon_a).to_radians();

    let c = (delta_phi / 2.0).sin().powi(2)
        + phi_a.cos() * phi_b.cos() * (delta_lambda / 2.0).sin().powi(2);
    let d = 2.0 * c.sqrt().atan2((1.0 - c).sqrt());

    EARTH_RADIUS_M * d
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_manhattan_distance() {
        assert_near(manhattan_distance(&[0.0, 0.0], &[3.0, -4.0]), 7.0, EPSILON);
        assert_near(weighted_manhattan_distance(&[0.0, 0.0], &[3.0, -4.0], &[2.0, 0.5]), 8.0, EPSILON);
    }

    #[test]
    fn test_euclidean_distance_squared() {
        assert_near(euclidean_distance_squared(&[0.0, 0.0], &[3.0, 4.0]), 25.0, EPSILON);
        assert_near(
            weighted_euclidean_distance_squared(&[0.0, 0.0], &[3.0, 4.0], &[1.0, 0.0]),
            9.0,
            EPSILON,
        );
    }

    #[test]
    fn test_cosine_parts() {
        let (dot, na, nb) = cosine_parts(&[1.0, 2.0], &[3.0, 4.0]);
        assert_near(dot, 11.0, EPSILON);
        assert_near(na, 5.0, EPSILON);
        assert_near(nb, 25.0, EPSILON);

        let (dot, na, nb) = weighted_cosine_parts(&[1.0, 2.0], &[3.0, 4.0], &[1.0, 0.0]);
        assert_near(dot, 3.0, EPSILON);
        assert_near(na, 1.0, EPSILON);
        assert_near(nb, 9.0, EPSILON);
    }

    #[test]
    fn test_chi_squared_skips_vanishing_sums() {
        // (1 - 3)^2 / 4 = 1; the second component sums to zero
        assert_near(chi_squared_distance(&[1.0, 2.0], &[3.0, -2.0]), 1.0, EPSILON);
        assert_near(chi_squared_distance(&[0.0, 0.0], &[0.0, 0.0]), 0.0, EPSILON);
        assert_near(weighted_chi_squared_distance(&[1.0], &[3.0], &[0.5]), 0.5, EPSILON);
    }

    #[test]
    fn test_hamming_distance() {
        let a = [1.0, f64::NAN, -0.0, 4.0];
        let b = [1.0, f64::NAN, 0.0, 5.0];
        assert_near(hamming_distance(&a, &b), 2.0, EPSILON);
        assert_near(weighted_hamming_distance(&a, &b, &[1.0, 2.0, 4.0, 8.0]), 10.0, EPSILON);
    }

    #[test]
    fn test_unweighted_kernels_share_core_implementation() {
        let a = [0.1, -2.5, 3.75, f64::NAN, 1e300];
        let b = [0.3, 2.5, -3.75, 1.0, -1e300];
        assert_eq!(manhattan_distance(&a[..3], &b[..3]).to_bits(), kernels::l1(&a[..3], &b[..3]).to_bits());
        assert_eq!(
            euclidean_distance_squared(&a[..3], &b[..3]).to_bits(),
            kernels::l2_squared(&a[..3], &b[..3]).to_bits()
        );
        assert_eq!(dot_product(&a[..3], &b[..3]).to_bits(), kernels::dot(&a[..3], &b[..3]).to_bits());
        assert_eq!(hamming_distance(&a, &b), kernels::hamming(&a, &b) as f64);
    }

    #[test]
    fn test_haversine_distance() {
        assert_near(haversine_distance(&[47.5, 7.6], &[47.5, 7.6]), 0.0, EPSILON);

        // A quarter of the equator
        let quarter = haversine_distance(&[0.0, 0.0], &[0.0, 90.0]);
        assert_near(quarter, EARTH_RADIUS_M * std::f64::consts::FRAC_PI_2, 1e-6);

        // Basel to Zurich, roughly 74 km
        let d = haversine_distance(&[47.5596, 7.5886], &[47.3769, 8.5417]);
        assert!(d > 70_000.0 && d < 78_000.0, "expected ~74 km, got {}", d);
    }
}
