//! Synthetic spectra shared by the integration tests.

#![allow(dead_code)]

use std::f64::consts::PI;

use specpart_rs::{SpectralAxes, Spectrum};

pub const N_FREQ: usize = 32;
pub const N_DIR: usize = 24;

/// Install a test logger once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Geometric frequencies from 0.0345 Hz (factor 1.1) and evenly spaced
/// directions.
pub fn axes(n_freq: usize, n_dir: usize) -> SpectralAxes {
    let freq = (0..n_freq).map(|i| 0.0345 * 1.1_f64.powi(i as i32)).collect();
    let dir = (0..n_dir).map(|i| 360.0 * i as f64 / n_dir as f64).collect();
    SpectralAxes::new(freq, dir).unwrap()
}

/// `N_FREQ` × `N_DIR` grid with 15° directions.
pub fn standard_axes() -> SpectralAxes {
    axes(N_FREQ, N_DIR)
}

/// Signed angular difference in degrees, in [-180, 180).
pub fn wrap_deg(d: f64) -> f64 {
    (d + 180.0).rem_euclid(360.0) - 180.0
}

/// Gaussian bump in (frequency, direction) with direction wrap-around.
pub fn gaussian_bump(
    axes: &SpectralAxes,
    fp: f64,
    dp: f64,
    amp: f64,
    sigma_f: f64,
    sigma_dir: f64,
) -> Vec<f64> {
    let mut out = Vec::with_capacity(axes.shape().n_bins());
    for &f in axes.freq() {
        for &d in axes.dir() {
            let x = (f - fp) / sigma_f;
            let y = wrap_deg(d - dp) / sigma_dir;
            out.push(amp * (-0.5 * (x * x + y * y)).exp());
        }
    }
    out
}

/// Standard test bump: σf = 0.015 Hz, σθ = 25°.
pub fn bump(axes: &SpectralAxes, fp: f64, dp: f64, amp: f64) -> Vec<f64> {
    gaussian_bump(axes, fp, dp, amp, 0.015, 25.0)
}

/// JONSWAP frequency shape (γ = 3.3) times a cos² directional spread.
pub fn jonswap(axes: &SpectralAxes, fp: f64, dp: f64) -> Vec<f64> {
    const ALPHA: f64 = 0.0081;
    const GAMMA: f64 = 3.3;
    let g = 9.81_f64;

    let mut out = Vec::with_capacity(axes.shape().n_bins());
    for &f in axes.freq() {
        let sigma = if f <= fp { 0.07 } else { 0.09 };
        let r = (-(f - fp).powi(2) / (2.0 * sigma * sigma * fp * fp)).exp();
        let ef = ALPHA * g * g * (2.0 * PI).powi(-4) * f.powi(-5)
            * (-1.25 * (fp / f).powi(4)).exp()
            * GAMMA.powf(r);
        for &d in axes.dir() {
            let delta = wrap_deg(d - dp);
            let spread = if delta.abs() < 90.0 {
                (2.0 / PI) * delta.to_radians().cos().powi(2) * (PI / 180.0)
            } else {
                0.0
            };
            out.push(ef * spread);
        }
    }
    out
}

/// Element-wise sum of grids.
pub fn sum_grids(grids: &[Vec<f64>]) -> Vec<f64> {
    let mut out = vec![0.0; grids[0].len()];
    for g in grids {
        for (o, v) in out.iter_mut().zip(g) {
            *o += v;
        }
    }
    out
}

pub fn spectrum(axes: &SpectralAxes, values: Vec<f64>) -> Spectrum {
    Spectrum::new(axes.shape(), values).unwrap()
}
