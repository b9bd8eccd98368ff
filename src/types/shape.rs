//! Spectral grid shape.

use std::fmt;

use crate::error::PartitionError;

/// Shape of a frequency-direction spectral grid.
///
/// Frequency bins are ordered and bounded; direction bins are cyclic.
/// Bins are stored frequency-major, so bin `n` sits at frequency row
/// `n / n_dir` and direction column `n % n_dir`.
///
/// Also serves as the key of the neighbor topology cache.
///
/// # Example
///
/// ```
/// use specpart_rs::types::SpectralShape;
///
/// let shape = SpectralShape::new(36, 24).unwrap();
/// assert_eq!(shape.n_freq(), 36);
/// assert_eq!(shape.n_dir(), 24);
/// assert_eq!(shape.n_bins(), 864);
/// assert_eq!(shape.bin(10, 5), 245);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpectralShape {
    n_freq: usize,
    n_dir: usize,
}

impl SpectralShape {
    /// Create a new shape.
    ///
    /// # Errors
    ///
    /// Returns a `Shape` error if either dimension is zero.
    pub fn new(n_freq: usize, n_dir: usize) -> Result<Self, PartitionError> {
        if n_freq == 0 || n_dir == 0 {
            return Err(PartitionError::shape(format!(
                "grid dimensions must be at least 1, got {}×{}",
                n_freq, n_dir
            )));
        }
        Ok(Self { n_freq, n_dir })
    }

    /// Number of frequency bins.
    #[inline]
    pub fn n_freq(&self) -> usize {
        self.n_freq
    }

    /// Number of direction bins.
    #[inline]
    pub fn n_dir(&self) -> usize {
        self.n_dir
    }

    /// Total number of bins.
    #[inline]
    pub fn n_bins(&self) -> usize {
        self.n_freq * self.n_dir
    }

    /// Linear bin index of (frequency row, direction column).
    #[inline]
    pub fn bin(&self, ik: usize, ith: usize) -> usize {
        ik * self.n_dir + ith
    }

    /// (frequency row, direction column) of a linear bin index.
    #[inline]
    pub fn coords(&self, n: usize) -> (usize, usize) {
        (n / self.n_dir, n % self.n_dir)
    }

    /// Check that a flat buffer has exactly one value per bin.
    pub fn check_len(&self, len: usize) -> Result<(), PartitionError> {
        if len != self.n_bins() {
            return Err(PartitionError::shape(format!(
                "expected {} values for a {} grid, got {}",
                self.n_bins(),
                self,
                len
            )));
        }
        Ok(())
    }

    /// Return as tuple (n_freq, n_dir).
    #[inline]
    pub fn as_tuple(&self) -> (usize, usize) {
        (self.n_freq, self.n_dir)
    }
}

impl fmt::Display for SpectralShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.n_freq, self.n_dir)
    }
}

impl TryFrom<(usize, usize)> for SpectralShape {
    type Error = PartitionError;

    fn try_from((n_freq, n_dir): (usize, usize)) -> Result<Self, Self::Error> {
        Self::new(n_freq, n_dir)
    }
}
