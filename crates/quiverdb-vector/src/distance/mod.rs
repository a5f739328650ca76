//! Distance kernels over vector values.
//!
//! A [`DistanceKernel`] compares two [`VectorValue`]s, optionally weighting
//! each component, and returns an `f64`. Operands of different element kinds
//! are promoted to a shared kind first, and every call checks dimensions.
//!
//! # Execution paths
//!
//! Real-valued kernels run on one of two paths (see [`KernelConfig`]):
//!
//! - [`scalar`] - reference kernels that accumulate in order
//! - `simd` (the `simd` feature, default) - `wide` `f64x4` lanes, or four
//!   partial sums for kernels that branch per component
//!
//! Without the `simd` feature the vectorized path runs the scalar kernels.
//! Complex kernels keep four partial sums on the vectorized path.
//!
//! # Features
//!
//! - `simd` (default): Enable SIMD-optimized distance calculations
//! - `scalar`: Make the scalar path the default (useful for debugging)
//!
//! # Example
//!
//! ```
//! use quiverdb_core::VectorValue;
//! use quiverdb_vector::distance::DistanceKernel;
//!
//! let a = VectorValue::from(vec![0.0_f32, 0.0]);
//! let b = VectorValue::from(vec![3_i32, 4]);
//!
//! assert_eq!(DistanceKernel::L2.invoke(&a, &b).unwrap(), 5.0);
//! assert_eq!(DistanceKernel::L1.invoke(&a, &b).unwrap(), 7.0);
//! ```

mod complex;
pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use quiverdb_core::{NumericKind, Type, VectorValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::{ExecutionPath, KernelConfig};
use crate::error::{DistanceError, Result};

// Re-export the preferred implementation
#[cfg(all(feature = "simd", not(feature = "scalar")))]
pub use simd::{
    chi_squared_distance, cosine_parts, dot_product, euclidean_distance_squared, hamming_distance,
    manhattan_distance,
};

#[cfg(not(all(feature = "simd", not(feature = "scalar"))))]
pub use scalar::{
    chi_squared_distance, cosine_parts, dot_product, euclidean_distance_squared, hamming_distance,
    manhattan_distance,
};

pub use scalar::haversine_distance;

/// Norm products below this make [`DistanceKernel::Cosine`] return `1.0`.
pub const COSINE_EPSILON: f64 = 1e-6;

/// A family of distance functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceKernel {
    /// Manhattan distance, `sum(|a - b|)`.
    L1,
    /// Euclidean distance, always `sqrt` of [`L2Squared`](Self::L2Squared).
    L2,
    /// Squared Euclidean distance.
    L2Squared,
    /// Cosine distance, `1 - cos(a, b)`, in `[0, 2]`.
    Cosine,
    /// Chi-squared distance, `sum((a - b)^2 / (a + b))`.
    ChiSquared,
    /// Number of differing components.
    Hamming,
    /// Great-circle distance in meters between two `[lat, lon]` points in degrees.
    Haversine,
    /// `1 - a.b`; for complex vectors `1 - |sum(a * conj(b))|`.
    InnerProduct,
}

/// The slice kernels behind one execution path.
struct RealKernels {
    manhattan: fn(&[f64], &[f64]) -> f64,
    weighted_manhattan: fn(&[f64], &[f64], &[f64]) -> f64,
    euclidean_squared: fn(&[f64], &[f64]) -> f64,
    weighted_euclidean_squared: fn(&[f64], &[f64], &[f64]) -> f64,
    dot: fn(&[f64], &[f64]) -> f64,
    weighted_dot: fn(&[f64], &[f64], &[f64]) -> f64,
    cosine: fn(&[f64], &[f64]) -> (f64, f64, f64),
    weighted_cosine: fn(&[f64], &[f64], &[f64]) -> (f64, f64, f64),
    chi_squared: fn(&[f64], &[f64]) -> f64,
    weighted_chi_squared: fn(&[f64], &[f64], &[f64]) -> f64,
    hamming: fn(&[f64], &[f64]) -> f64,
    weighted_hamming: fn(&[f64], &[f64], &[f64]) -> f64,
}

const SCALAR_KERNELS: RealKernels = RealKernels {
    manhattan: scalar::manhattan_distance,
    weighted_manhattan: scalar::weighted_manhattan_distance,
    euclidean_squared: scalar::euclidean_distance_squared,
    weighted_euclidean_squared: scalar::weighted_euclidean_distance_squared,
    dot: scalar::dot_product,
    weighted_dot: scalar::weighted_dot_product,
    cosine: scalar::cosine_parts,
    weighted_cosine: scalar::weighted_cosine_parts,
    chi_squared: scalar::chi_squared_distance,
    weighted_chi_squared: scalar::weighted_chi_squared_distance,
    hamming: scalar::hamming_distance,
    weighted_hamming: scalar::weighted_hamming_distance,
};

#[cfg(feature = "simd")]
const SIMD_KERNELS: RealKernels = RealKernels {
    manhattan: simd::manhattan_distance,
    weighted_manhattan: simd::weighted_manhattan_distance,
    euclidean_squared: simd::euclidean_distance_squared,
    weighted_euclidean_squared: simd::weighted_euclidean_distance_squared,
    dot: simd::dot_product,
    weighted_dot: simd::weighted_dot_product,
    cosine: simd::cosine_parts,
    weighted_cosine: simd::weighted_cosine_parts,
    chi_squared: simd::chi_squared_distance,
    weighted_chi_squared: simd::weighted_chi_squared_distance,
    hamming: simd::hamming_distance,
    weighted_hamming: simd::weighted_hamming_distance,
};

impl RealKernels {
    fn for_path(path: ExecutionPath) -> &'static Self {
        match path {
            ExecutionPath::Scalar => &SCALAR_KERNELS,
            #[cfg(feature = "simd")]
            ExecutionPath::Vectorized => &SIMD_KERNELS,
            #[cfg(not(feature = "simd"))]
            ExecutionPath::Vectorized => &SCALAR_KERNELS,
        }
    }
}

impl DistanceKernel {
    /// Every kernel, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::L1,
        Self::L2,
        Self::L2Squared,
        Self::Cosine,
        Self::ChiSquared,
        Self::Hamming,
        Self::Haversine,
        Self::InnerProduct,
    ];

    /// The canonical name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::L1 => "l1",
            Self::L2 => "l2",
            Self::L2Squared => "l2squared",
            Self::Cosine => "cosine",
            Self::ChiSquared => "chisquared",
            Self::Hamming => "hamming",
            Self::Haversine => "haversine",
            Self::InnerProduct => "innerproduct",
        }
    }

    /// Arithmetic operations per vector component, a planner cost hint.
    ///
    /// Haversine reads a fixed two components and counts as one.
    #[must_use]
    pub const fn operations(&self) -> usize {
        match self {
            Self::L1 | Self::Hamming | Self::Haversine => 1,
            Self::L2 | Self::L2Squared | Self::InnerProduct => 2,
            Self::Cosine | Self::ChiSquared => 3,
        }
    }

    /// Returns `true` if the kernel accepts vectors of type `ty`.
    ///
    /// Scalar types are never supported.
    #[must_use]
    pub fn supports(&self, ty: &Type) -> bool {
        match ty.vector_kind() {
            Some(kind) if self.supports_kind(kind) => {
                *self != Self::Haversine || ty.logical_size() == Some(2)
            }
            _ => false,
        }
    }

    const fn supports_kind(&self, kind: NumericKind) -> bool {
        match self {
            Self::ChiSquared => !kind.is_complex(),
            Self::Haversine => !kind.is_complex() && !matches!(kind, NumericKind::Boolean),
            _ => true,
        }
    }

    /// Evaluate the kernel on the default execution path.
    ///
    /// # Errors
    ///
    /// Returns [`DistanceError::DimensionMismatch`] if the dimensions differ,
    /// [`DistanceError::UnsupportedType`] if the kernel has no definition for
    /// the element kind, and [`DistanceError::InvalidDimension`] for a
    /// [`Haversine`](Self::Haversine) operand that is not two-dimensional.
    pub fn invoke(&self, a: &VectorValue, b: &VectorValue) -> Result<f64> {
        self.invoke_with(&KernelConfig::default(), a, b, None)
    }

    /// Evaluate the kernel with per-component weights.
    ///
    /// Weights may be any real vector of the operands' dimension.
    /// [`Haversine`](Self::Haversine) ignores them.
    ///
    /// # Errors
    ///
    /// As [`invoke`](Self::invoke); additionally
    /// [`DistanceError::DimensionMismatch`] if the weights have the wrong
    /// dimension and [`DistanceError::Core`] for complex weights.
    pub fn invoke_weighted(
        &self,
        a: &VectorValue,
        b: &VectorValue,
        weights: &VectorValue,
    ) -> Result<f64> {
        self.invoke_with(&KernelConfig::default(), a, b, Some(weights))
    }

    /// Evaluate the kernel on the path chosen by `config`.
    ///
    /// # Errors
    ///
    /// See [`invoke`](Self::invoke) and [`invoke_weighted`](Self::invoke_weighted).
    pub fn invoke_with(
        &self,
        config: &KernelConfig,
        a: &VectorValue,
        b: &VectorValue,
        weights: Option<&VectorValue>,
    ) -> Result<f64> {
        let dimension = a.logical_size();
        if b.logical_size() != dimension {
            return Err(DistanceError::DimensionMismatch {
                expected: dimension,
                actual: b.logical_size(),
            });
        }

        let kind = a.kind().unify(b.kind());
        if !self.supports_kind(kind) {
            let ty = kind.vector_type(dimension);
            debug!(kernel = self.name(), %ty, "Kernel rejected element type");
            return Err(DistanceError::unsupported_type(self.name(), ty));
        }

        if *self == Self::Haversine {
            return self.haversine(a, b);
        }

        let weights = match weights {
            Some(w) if w.logical_size() != dimension => {
                return Err(DistanceError::DimensionMismatch {
                    expected: dimension,
                    actual: w.logical_size(),
                });
            }
            Some(w) => Some(w.to_f64_lanes()?),
            None => None,
        };
        let weights = weights.as_deref();

        trace!(
            kernel = self.name(),
            path = ?config.path,
            dimension,
            weighted = weights.is_some(),
            "Evaluating distance kernel"
        );

        let (a, b) = a.unify(b)?;
        if kind.is_complex() {
            let (x, y) = (interleaved_f64(&a)?, interleaved_f64(&b)?);
            return self.complex(config.path, &x, &y, weights);
        }

        if *self == Self::Hamming && kind == NumericKind::Long {
            // i64 lanes do not round-trip through f64
            trace!(kernel = self.name(), "Comparing long lanes natively");
            return long_hamming(&a, &b, weights);
        }

        let (x, y) = (a.to_f64_lanes()?, b.to_f64_lanes()?);
        Ok(self.real(RealKernels::for_path(config.path), &x, &y, weights))
    }

    fn real(&self, k: &RealKernels, a: &[f64], b: &[f64], w: Option<&[f64]>) -> f64 {
        match (self, w) {
            (Self::L1, None) => (k.manhattan)(a, b),
            (Self::L1, Some(w)) => (k.weighted_manhattan)(a, b, w),
            (Self::L2, None) => (k.euclidean_squared)(a, b).sqrt(),
            (Self::L2, Some(w)) => (k.weighted_euclidean_squared)(a, b, w).sqrt(),
            (Self::L2Squared, None) => (k.euclidean_squared)(a, b),
            (Self::L2Squared, Some(w)) => (k.weighted_euclidean_squared)(a, b, w),
            (Self::Cosine, None) => cosine_from_parts((k.cosine)(a, b)),
            (Self::Cosine, Some(w)) => cosine_from_parts((k.weighted_cosine)(a, b, w)),
            (Self::ChiSquared, None) => (k.chi_squared)(a, b),
            (Self::ChiSquared, Some(w)) => (k.weighted_chi_squared)(a, b, w),
            (Self::Hamming, None) => (k.hamming)(a, b),
            (Self::Hamming, Some(w)) => (k.weighted_hamming)(a, b, w),
            (Self::InnerProduct, None) => 1.0 - (k.dot)(a, b),
            (Self::InnerProduct, Some(w)) => 1.0 - (k.weighted_dot)(a, b, w),
            (Self::Haversine, _) => haversine_distance(a, b),
        }
    }

    fn complex(
        &self,
        path: ExecutionPath,
        a: &[f64],
        b: &[f64],
        w: Option<&[f64]>,
    ) -> Result<f64> {
        Ok(match self {
            Self::L1 => complex::manhattan_distance(a, b, w, path),
            Self::L2 => complex::euclidean_distance_squared(a, b, w, path).sqrt(),
            Self::L2Squared => complex::euclidean_distance_squared(a, b, w, path),
            Self::Cosine => cosine_from_parts(complex::cosine_parts(a, b, w, path)),
            Self::Hamming => complex::hamming_distance(a, b, w, path),
            Self::InnerProduct => complex::inner_product_distance(a, b, w, path),
            Self::ChiSquared | Self::Haversine => {
                return Err(DistanceError::unsupported_type(self.name(), "complex vectors"));
            }
        })
    }

    fn haversine(&self, a: &VectorValue, b: &VectorValue) -> Result<f64> {
        if a.logical_size() != 2 {
            return Err(DistanceError::InvalidDimension {
                kernel: self.name(),
                expected: 2,
                actual: a.logical_size(),
            });
        }
        let (a, b) = a.unify(b)?;
        let (x, y) = (a.to_f64_lanes()?, b.to_f64_lanes()?);
        Ok(haversine_distance(&x, &y))
    }
}

/// `1 - dot / (|a| |b|)` with the ratio clamped to `[-1, 1]`.
///
/// Returns `1.0` when the norm product is below [`COSINE_EPSILON`] or the
/// ratio is `NaN`.
#[must_use]
pub fn cosine_from_parts((dot, norm_a_sq, norm_b_sq): (f64, f64, f64)) -> f64 {
    let div = norm_a_sq.sqrt() * norm_b_sq.sqrt();
    if div < COSINE_EPSILON || div.is_nan() {
        return 1.0;
    }
    let ratio = dot / div;
    if ratio.is_nan() {
        1.0
    } else {
        1.0 - ratio.clamp(-1.0, 1.0)
    }
}

/// The interleaved components of a complex vector, widened to `f64`.
fn interleaved_f64(v: &VectorValue) -> Result<Cow<'_, [f64]>> {
    if let Some(pairs) = v.interleaved::<f64>() {
        return Ok(Cow::Borrowed(pairs));
    }
    v.interleaved::<f32>()
        .map(|pairs| Cow::Owned(pairs.iter().map(|&x| f64::from(x)).collect()))
        .ok_or_else(|| DistanceError::unsupported_type("complex", v.value_type()))
}

/// Hamming distance over operands already unified to long lanes.
fn long_hamming(a: &VectorValue, b: &VectorValue, w: Option<&[f64]>) -> Result<f64> {
    let (Some(x), Some(y)) = (a.lanes::<i64>(), b.lanes::<i64>()) else {
        return Err(DistanceError::unsupported_type("hamming", a.value_type()));
    };
    Ok(match w {
        Some(w) => x.iter().zip(y).zip(w).filter(|((p, q), _)| p != q).map(|(_, w)| w).sum(),
        None => x.iter().zip(y).filter(|(p, q)| p != q).count() as f64,
    })
}

impl fmt::Display for DistanceKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceKernel {
    type Err = DistanceError;

    /// Parses a canonical name or a common alias, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "l1" | "manhattan" => Ok(Self::L1),
            "l2" | "euclidean" => Ok(Self::L2),
            "l2squared" | "l2sq" | "squaredeuclidean" => Ok(Self::L2Squared),
            "cosine" => Ok(Self::Cosine),
            "chisquared" | "chisq" => Ok(Self::ChiSquared),
            "hamming" => Ok(Self::Hamming),
            "haversine" => Ok(Self::Haversine),
            "innerproduct" | "dotproduct" | "dotp" => Ok(Self::InnerProduct),
            _ => Err(DistanceError::UnknownKernel(s.to_string())),
        }
    }
}
