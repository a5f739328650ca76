//! `QuiverDB` Vector
//!
//! This crate provides the distance kernels that rank candidate vectors
//! during nearest-neighbour search in `QuiverDB`.
//!
//! # Overview
//!
//! - **Kernels**: [`DistanceKernel`] covers L1, L2, squared L2, cosine,
//!   chi-squared, Hamming, haversine and inner-product distances over every
//!   [`VectorValue`](quiverdb_core::VectorValue) element kind they define
//! - **Weights**: every kernel except haversine scales each component by an
//!   optional weight vector
//! - **Execution paths**: a scalar reference path and a vectorized path on
//!   `wide` SIMD lanes, selected per call through [`KernelConfig`]
//!
//! # Example
//!
//! ```
//! use quiverdb_core::VectorValue;
//! use quiverdb_vector::{DistanceError, DistanceKernel, ExecutionPath, KernelConfig};
//!
//! let query = VectorValue::from(vec![1.0_f64, 0.0, 0.0]);
//! let candidate = VectorValue::from(vec![0.0_f64, 1.0, 0.0]);
//!
//! let d = DistanceKernel::Cosine.invoke(&query, &candidate).unwrap();
//! assert!((d - 1.0).abs() < 1e-12);
//!
//! // Pin the scalar reference path
//! let config = KernelConfig::new(ExecutionPath::Scalar);
//! let d = DistanceKernel::L2Squared.invoke_with(&config, &query, &candidate, None).unwrap();
//! assert_eq!(d, 2.0);
//!
//! // Dimensions are always checked
//! let short = VectorValue::from(vec![1.0_f64, 0.0]);
//! assert_eq!(
//!     DistanceKernel::L1.invoke(&query, &short),
//!     Err(DistanceError::DimensionMismatch { expected: 3, actual: 2 })
//! );
//! ```
//!
//! # Modules
//!
//! - [`distance`] - Distance kernels and the slice functions behind them
//! - [`config`] - Execution path selection ([`KernelConfig`])
//! - [`error`] - Error types ([`DistanceError`])

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod distance;
pub mod error;

// Re-export commonly used types
pub use config::{ExecutionPath, KernelConfig};
pub use distance::DistanceKernel;
pub use error::DistanceError;

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn kernels_are_send_and_sync() {
        assert_send_sync::<DistanceKernel>();
        assert_send_sync::<KernelConfig>();
        assert_send_sync::<DistanceError>();
    }
}
