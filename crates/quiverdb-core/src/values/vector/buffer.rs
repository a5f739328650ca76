//! Owned, immutable backing buffers of vector values.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::values::complex::ComplexValue;
use crate::values::element::{Element, Float};

/// A fixed-length run of primitive lanes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrimitiveVector<T>(Box<[T]>);

impl<T: Element> PrimitiveVector<T> {
    /// Takes ownership of the lanes.
    #[must_use]
    pub fn new(lanes: impl Into<Box<[T]>>) -> Self {
        Self(lanes.into())
    }

    /// `len` zero lanes.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self(vec![T::ZERO; len].into_boxed_slice())
    }

    /// The lanes.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// The number of lanes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no lanes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the lanes by value.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.0.iter().copied()
    }
}

impl<T: Element> PartialEq for PrimitiveVector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self.0.iter().zip(other.0.iter()).all(|(a, b)| a.bits() == b.bits())
    }
}

impl<T: Element> Eq for PrimitiveVector<T> {}

impl<T: Element> FromIterator<T> for PrimitiveVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A fixed-length run of complex numbers, stored as interleaved
/// `[re, im]` pairs.
///
/// The backing buffer always has even length.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<F>",
    into = "Vec<F>",
    bound(serialize = "F: Serialize", deserialize = "F: Deserialize<'de>")
)]
pub struct ComplexVector<F: Float>(Box<[F]>);

impl<F: Float> ComplexVector<F> {
    /// Takes ownership of an interleaved buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidLayout`] if the buffer has odd length.
    pub fn from_interleaved(data: impl Into<Box<[F]>>) -> Result<Self, CoreError> {
        let data = data.into();
        if data.len() % 2 != 0 {
            return Err(CoreError::InvalidLayout(format!(
                "complex buffer of odd length {}",
                data.len()
            )));
        }
        Ok(Self(data))
    }

    /// Builds a vector from separate real and imaginary parts.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DimensionMismatch`] if the parts differ in length.
    pub fn from_parts(re: &[F], im: &[F]) -> Result<Self, CoreError> {
        if re.len() != im.len() {
            return Err(CoreError::dimension_mismatch(re.len(), im.len()));
        }
        Ok(re.iter().zip(im).map(|(&re, &im)| ComplexValue::new(re, im)).collect())
    }

    /// `len` zeros.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self(vec![F::ZERO; 2 * len].into_boxed_slice())
    }

    /// The interleaved buffer.
    #[inline]
    #[must_use]
    pub fn as_interleaved(&self) -> &[F] {
        &self.0
    }

    /// The number of complex elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len() / 2
    }

    /// Returns `true` if there are no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The element at `index`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<ComplexValue<F>> {
        let re = *self.0.get(2 * index)?;
        let im = *self.0.get(2 * index + 1)?;
        Some(ComplexValue::new(re, im))
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> impl Iterator<Item = ComplexValue<F>> + '_ {
        self.0.chunks_exact(2).map(|pair| ComplexValue::new(pair[0], pair[1]))
    }
}

impl<F: Float> PartialEq for ComplexVector<F> {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self.0.iter().zip(other.0.iter()).all(|(a, b)| a.bits() == b.bits())
    }
}

impl<F: Float> Eq for ComplexVector<F> {}

impl<F: Float> FromIterator<ComplexValue<F>> for ComplexVector<F> {
    fn from_iter<I: IntoIterator<Item = ComplexValue<F>>>(iter: I) -> Self {
        Self(iter.into_iter().flat_map(|z| [z.re(), z.im()]).collect())
    }
}

impl<F: Float> TryFrom<Vec<F>> for ComplexVector<F> {
    type Error = CoreError;

    fn try_from(data: Vec<F>) -> Result<Self, CoreError> {
        Self::from_interleaved(data)
    }
}

impl<F: Float> From<ComplexVector<F>> for Vec<F> {
    fn from(vector: ComplexVector<F>) -> Self {
        vector.0.into_vec()
    }
}
