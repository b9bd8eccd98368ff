//! Directional wave spectra and the numeric primitives computed from them.
//!
//! A spectrum is an energy density grid E(f, θ) stored frequency-major:
//! row `ik` holds the `n_dir` directional bins of frequency `freq[ik]`.
//!
//! This module provides:
//! - [`SpectralAxes`]: validated frequency (Hz) and direction (degrees) coordinates
//! - [`Spectrum`]: a validated energy grid
//! - [`significant_wave_height`]: Hs = 4√m0 of a (possibly masked) grid
//! - [`celerity`]: linear phase speed per frequency at a given depth
//!
//! # Example
//!
//! ```
//! use specpart_rs::spectrum::{SpectralAxes, Spectrum, significant_wave_height};
//!
//! let freq: Vec<f64> = (0..20).map(|i| 0.05 + 0.01 * i as f64).collect();
//! let dir: Vec<f64> = (0..12).map(|i| 30.0 * i as f64).collect();
//! let axes = SpectralAxes::new(freq, dir).unwrap();
//!
//! let spectrum = Spectrum::new(axes.shape(), vec![0.1; 240]).unwrap();
//! let hs = significant_wave_height(spectrum.values(), &axes).unwrap();
//! assert!(hs > 0.0);
//! ```

mod dispersion;
mod stats;

pub use dispersion::{GRAVITY, celerity};
pub use stats::{frequency_resolution, significant_wave_height};
pub(crate) use stats::hs_unchecked;

use crate::error::PartitionError;
use crate::types::SpectralShape;

/// Frequency and direction coordinates of a spectral grid.
#[derive(Clone, Debug, PartialEq)]
pub struct SpectralAxes {
    freq: Vec<f64>,
    dir: Vec<f64>,
    shape: SpectralShape,
}

impl SpectralAxes {
    /// Create axes from frequencies (Hz) and directions (degrees).
    ///
    /// # Errors
    /// - `Shape` if either axis is empty
    /// - `Domain` if frequencies are not positive, finite and strictly
    ///   increasing, or if a direction is not finite
    pub fn new(freq: Vec<f64>, dir: Vec<f64>) -> Result<Self, PartitionError> {
        let shape = SpectralShape::new(freq.len(), dir.len())?;

        if let Some(&f) = freq.iter().find(|f| !f.is_finite() || **f <= 0.0) {
            return Err(PartitionError::domain(format!(
                "frequencies must be positive and finite, got {}",
                f
            )));
        }
        if let Some(i) = (1..freq.len()).find(|&i| freq[i] <= freq[i - 1]) {
            return Err(PartitionError::domain(format!(
                "frequencies must be strictly increasing, freq[{}]={} follows {}",
                i,
                freq[i],
                freq[i - 1]
            )));
        }
        if let Some(&d) = dir.iter().find(|d| !d.is_finite()) {
            return Err(PartitionError::domain(format!(
                "directions must be finite, got {}",
                d
            )));
        }

        Ok(Self { freq, dir, shape })
    }

    /// Frequencies in Hz.
    #[inline]
    pub fn freq(&self) -> &[f64] {
        &self.freq
    }

    /// Directions in degrees.
    #[inline]
    pub fn dir(&self) -> &[f64] {
        &self.dir
    }

    /// Grid shape implied by the axes.
    #[inline]
    pub fn shape(&self) -> SpectralShape {
        self.shape
    }

    /// Directional bin width in degrees (360 / n_dir).
    #[inline]
    pub fn direction_resolution(&self) -> f64 {
        360.0 / self.dir.len() as f64
    }
}

/// Energy density grid E(f, θ).
///
/// Values are non-negative and finite; the grid is owned so a spectrum can
/// be handed to a worker thread on its own.
#[derive(Clone, Debug, PartialEq)]
pub struct Spectrum {
    shape: SpectralShape,
    values: Vec<f64>,
}

impl Spectrum {
    /// Create a spectrum from frequency-major values.
    ///
    /// # Errors
    /// - `Shape` if `values.len()` differs from `shape.n_bins()`
    /// - `Domain` if any value is negative or not finite
    pub fn new(shape: SpectralShape, values: Vec<f64>) -> Result<Self, PartitionError> {
        validate_energy(shape, &values)?;
        Ok(Self { shape, values })
    }

    /// All-zero spectrum.
    pub fn zeros(shape: SpectralShape) -> Self {
        Self {
            shape,
            values: vec![0.0; shape.n_bins()],
        }
    }

    /// Grid shape.
    #[inline]
    pub fn shape(&self) -> SpectralShape {
        self.shape
    }

    /// Frequency-major energy values.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Energy at (frequency row, direction column).
    #[inline]
    pub fn get(&self, ik: usize, ith: usize) -> f64 {
        self.values[self.shape.bin(ik, ith)]
    }

    /// Sum of all bin values.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Frequency profile: energy summed over direction for each frequency row.
    pub fn frequency_profile(&self) -> Vec<f64> {
        frequency_profile(self.shape, &self.values)
    }

    /// Consume the spectrum, returning its values.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// Check a flat energy buffer against a shape.
pub(crate) fn validate_energy(shape: SpectralShape, values: &[f64]) -> Result<(), PartitionError> {
    shape.check_len(values.len())?;
    if let Some((n, &v)) = values
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite() || **v < 0.0)
    {
        let (ik, ith) = shape.coords(n);
        return Err(PartitionError::domain(format!(
            "energy density must be non-negative and finite, got {} at (freq {}, dir {})",
            v, ik, ith
        )));
    }
    Ok(())
}

/// Sum a frequency-major grid over direction.
pub(crate) fn frequency_profile(shape: SpectralShape, values: &[f64]) -> Vec<f64> {
    values
        .chunks_exact(shape.n_dir())
        .map(|row| row.iter().sum())
        .collect()
}
