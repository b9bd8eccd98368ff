//! Secondary peak detection in frequency profiles.
//!
//! The watershed works on the 2-D grid and can merge two wave systems that
//! share a direction band but peak at different frequencies. Collapsing a
//! partition over direction and looking for a valley in the (smoothed)
//! frequency profile exposes such merges.

use std::f64::consts::PI;

use crate::config::SplitConfig;
use crate::error::PartitionError;
use crate::spectrum::{SpectralAxes, frequency_profile, frequency_resolution};

/// Local extrema of a smoothed frequency profile (frequency row indices).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inflections {
    /// Rows where the profile changes from rising to falling.
    pub maxima: Vec<usize>,
    /// Rows where the profile changes from falling to rising.
    pub minima: Vec<usize>,
}

/// Find local maxima and minima of an energy-vs-frequency profile.
///
/// The profile is smoothed with a normalized Hamming window spanning
/// `round(smooth_window_hz / Δf)` samples (Δf from the first frequency
/// pair) when that exceeds one sample. Samples that are negative after
/// smoothing or sit below `min_freq` are zeroed. Extrema are sign changes
/// of the discrete derivative; flat stretches never count as extrema.
///
/// A profile with a single frequency has no extrema.
///
/// # Errors
///
/// Returns a `Shape` error if `profile` and `freq` differ in length.
pub fn find_inflections(
    profile: &[f64],
    freq: &[f64],
    smooth_window_hz: f64,
    min_freq: f64,
) -> Result<Inflections, PartitionError> {
    if profile.len() != freq.len() {
        return Err(PartitionError::shape(format!(
            "profile has {} values for {} frequencies",
            profile.len(),
            freq.len()
        )));
    }
    Ok(inflections(profile, freq, smooth_window_hz, min_freq))
}

fn inflections(
    profile: &[f64],
    freq: &[f64],
    smooth_window_hz: f64,
    min_freq: f64,
) -> Inflections {
    if freq.len() < 2 {
        return Inflections::default();
    }

    let df = frequency_resolution(freq)[0];
    let window = (smooth_window_hz / df).round() as usize;
    let mut sf = if window > 1 {
        smooth_hamming(profile, window)
    } else {
        profile.to_vec()
    };

    for (s, &f) in sf.iter_mut().zip(freq) {
        if *s < 0.0 || f < min_freq {
            *s = 0.0;
        }
    }

    let signs: Vec<i8> = sf.windows(2).map(|w| sign(w[1] - w[0])).collect();
    let mut found = Inflections::default();
    for (i, pair) in signs.windows(2).enumerate() {
        match pair[1] - pair[0] {
            -2 => found.maxima.push(i + 1),
            2 => found.minima.push(i + 1),
            _ => {}
        }
    }
    found
}

fn sign(x: f64) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// Symmetric Hamming window of `n` points.
fn hamming(n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![1.0];
    }
    let denom = (n - 1) as f64;
    (0..n)
        .map(|k| 0.54 - 0.46 * (2.0 * PI * k as f64 / denom).cos())
        .collect()
}

/// Weighted moving average, centered, same length as the input.
///
/// Samples beyond the ends are treated as zero.
fn smooth_hamming(x: &[f64], n: usize) -> Vec<f64> {
    let w = hamming(n.min(x.len()));
    let wsum: f64 = w.iter().sum();
    let half = (w.len() - 1) / 2;
    let len = x.len() as isize;

    (0..x.len())
        .map(|i| {
            let mut acc = 0.0;
            for (j, &wj) in w.iter().enumerate() {
                let idx = (i + half) as isize - j as isize;
                if (0..len).contains(&idx) {
                    acc += x[idx as usize] * wj;
                }
            }
            acc / wsum
        })
        .collect()
}

/// Splits a partition holding two frequency-separated systems.
#[derive(Clone, Debug, Default)]
pub struct InflectionSplitter {
    config: SplitConfig,
}

impl InflectionSplitter {
    /// Create a splitter.
    pub fn new(config: SplitConfig) -> Self {
        Self { config }
    }

    /// Splitter settings.
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Frequency row of the first valley lying above the first peak.
    pub fn valley_row(&self, values: &[f64], axes: &SpectralAxes) -> Option<usize> {
        let profile = frequency_profile(axes.shape(), values);
        let found = inflections(
            &profile,
            axes.freq(),
            self.config.smooth_window_hz,
            self.config.min_freq,
        );
        let first_peak = *found.maxima.first()?;
        found.minima.into_iter().find(|&m| m > first_peak)
    }

    /// Bins to move out of the partition into a new one, if any.
    ///
    /// `values` is the spectrum masked to one partition. The bins with
    /// energy below the valley row form the secondary system; they are only
    /// split off when there are more than `min_bins` of them.
    pub fn split(&self, values: &[f64], axes: &SpectralAxes) -> Option<Vec<usize>> {
        if !self.config.enabled {
            return None;
        }
        let cut = self.valley_row(values, axes)?;
        let limit = axes.shape().bin(cut, 0);
        let low: Vec<usize> = (0..limit).filter(|&n| values[n] > 0.0).collect();
        (low.len() > self.config.min_bins).then_some(low)
    }
}
