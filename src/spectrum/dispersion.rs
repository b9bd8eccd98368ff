//! Linear wave dispersion.
//!
//! The dispersion relation ω² = g k tanh(k h) is solved with Hunt's (1979)
//! explicit approximation:
//!
//! ```text
//! y      = ω² h / g
//! (k h)² = y² + y / (1 + 0.6522 y + 0.4622 y² + 0.0864 y⁴ + 0.0675 y⁵)
//! c      = ω / k
//! ```
//!
//! Relative error is below 0.1% over the full depth range, and the deep
//! water limit c = g / ω is recovered for large y.

use std::f64::consts::PI;

use crate::error::PartitionError;
use crate::types::Depth;

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.81;

/// Hunt's coefficients for y¹..y⁶ (index 0 is y¹).
const HUNT_COEFFS: [f64; 6] = [0.6522, 0.4622, 0.0, 0.0864, 0.0675, 0.0];

/// Phase speed (m/s) for each frequency (Hz) at the given depth.
///
/// # Errors
///
/// Returns a `Domain` error if the depth is not positive and finite, or if
/// a frequency is not positive and finite. No NaN ever reaches the output.
///
/// # Example
///
/// ```
/// use specpart_rs::spectrum::celerity;
/// use specpart_rs::types::Depth;
///
/// let c = celerity(&[0.1], Depth::try_new(4000.0).unwrap()).unwrap();
/// // Deep water: c = g / (2πf) ≈ 15.6 m/s
/// assert!((c[0] - 15.61).abs() < 0.05);
/// ```
pub fn celerity(freq: &[f64], depth: Depth) -> Result<Vec<f64>, PartitionError> {
    let h = depth.meters();
    if !h.is_finite() || h <= 0.0 {
        return Err(PartitionError::domain(format!(
            "celerity requires a positive finite depth, got {}",
            h
        )));
    }

    freq.iter()
        .map(|&f| {
            if !f.is_finite() || f <= 0.0 {
                return Err(PartitionError::domain(format!(
                    "celerity requires positive finite frequencies, got {}",
                    f
                )));
            }
            let omega = 2.0 * PI * f;
            Ok(omega / wavenumber(omega, h))
        })
        .collect()
}

/// Wavenumber (rad/m) for angular frequency `omega` at depth `h`.
fn wavenumber(omega: f64, h: f64) -> f64 {
    let y = omega * omega * h / GRAVITY;
    let mut denom = 1.0;
    let mut yn = 1.0;
    for coeff in HUNT_COEFFS {
        yn *= y;
        denom += coeff * yn;
    }
    (y * y + y / denom).sqrt() / h
}
