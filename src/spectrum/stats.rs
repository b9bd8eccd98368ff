//! Integrated spectral parameters.
//!
//! ```text
//! E(f)  = Δθ · Σθ E(f, θ)
//! m0    = ∫ E(f) df            (trapezoidal rule)
//!       + f_N · E(f_N) / 4     (f⁻⁵ high-frequency tail, when f_N > 1/3 Hz)
//! Hs    = 4 √m0
//! ```
//!
//! Δθ is taken in degrees, matching the energy density units of spectra
//! stored per degree.

use super::SpectralAxes;
use crate::error::PartitionError;

/// Frequency above which the f⁻⁵ tail contribution is added to m0.
const TAIL_MIN_FREQ: f64 = 0.333;

/// Absolute spacing between adjacent frequencies.
///
/// Returns `[1.0]` for a single frequency so callers always have a
/// resolution to divide by.
pub fn frequency_resolution(freq: &[f64]) -> Vec<f64> {
    if freq.len() > 1 {
        freq.windows(2).map(|w| (w[1] - w[0]).abs()).collect()
    } else {
        vec![1.0]
    }
}

/// Significant wave height of a frequency-major energy grid.
///
/// `values` may be a full spectrum or a partition (the spectrum masked to
/// one basin, zero elsewhere). An all-zero grid has Hs = 0.
///
/// # Errors
///
/// Returns a `Shape` error if `values.len()` does not match the axes shape.
pub fn significant_wave_height(
    values: &[f64],
    axes: &SpectralAxes,
) -> Result<f64, PartitionError> {
    axes.shape().check_len(values.len())?;
    Ok(hs_unchecked(values, axes))
}

/// Hs of a grid already known to match `axes`.
pub(crate) fn hs_unchecked(values: &[f64], axes: &SpectralAxes) -> f64 {
    let shape = axes.shape();
    debug_assert_eq!(values.len(), shape.n_bins());

    let freq = axes.freq();
    let ddir = if shape.n_dir() > 1 {
        axes.direction_resolution()
    } else {
        1.0
    };
    let ef: Vec<f64> = super::frequency_profile(shape, values)
        .into_iter()
        .map(|e| e * ddir)
        .collect();

    let mut m0: f64 = freq
        .windows(2)
        .zip(ef.windows(2))
        .map(|(f, e)| 0.5 * (f[1] - f[0]) * (e[0] + e[1]))
        .sum();

    let (f_last, e_last) = (freq[freq.len() - 1], ef[ef.len() - 1]);
    if f_last > TAIL_MIN_FREQ {
        m0 += 0.25 * e_last * f_last;
    }

    4.0 * m0.max(0.0).sqrt()
}
