//! Kernel execution configuration.

use serde::{Deserialize, Serialize};

/// The code path a kernel runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutionPath {
    /// One element at a time, accumulated in order.
    Scalar,
    /// Chunks of four elements on `wide` lanes or partial-sum accumulators.
    ///
    /// Results match [`Scalar`](Self::Scalar) up to floating-point
    /// reassociation.
    Vectorized,
}

impl ExecutionPath {
    /// The path used when none is requested.
    ///
    /// This is [`Vectorized`](Self::Vectorized) unless the crate is built
    /// with the `scalar` feature.
    #[must_use]
    pub const fn preferred() -> Self {
        if cfg!(feature = "scalar") {
            Self::Scalar
        } else {
            Self::Vectorized
        }
    }
}

/// Configuration for a kernel invocation.
///
/// # Parameters
///
/// * `path` - The execution path. Defaults to [`ExecutionPath::preferred`].
///   The scalar path is the reference the vectorized one is tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelConfig {
    /// The execution path.
    pub path: ExecutionPath,
}

impl KernelConfig {
    /// Create a configuration that runs on `path`.
    #[must_use]
    pub const fn new(path: ExecutionPath) -> Self {
        Self { path }
    }

    /// Set the execution path.
    #[must_use]
    pub const fn with_path(mut self, path: ExecutionPath) -> Self {
        self.path = path;
        self
    }
}

impl Default for KernelConfig {
    /// Runs on the preferred execution path.
    fn default() -> Self {
        Self::new(ExecutionPath::preferred())
    }
}
