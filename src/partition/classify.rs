//! Wind-sea / swell classification and ranking of watershed basins.
//!
//! A basin is wind-sea when a large enough share of its energy sits in bins
//! whose phase speed is slower than the wind forcing (wave-age criterion):
//!
//! ```text
//! wind-driven(f, θ)  ⇔  agefac · U · cos(θ - θ_wind) > c(f, depth)
//! W = Σ E(wind-driven bins) / Σ E(basin)
//! W > wscut  ⇒  basin joins the wind-sea partition
//! ```
//!
//! All wind-sea basins are merged into partition 0. The remaining swell
//! basins are ranked by significant wave height, the largest `swells` kept,
//! and the stack padded with empty partitions to exactly `swells + 1`.

use crate::config::ClassifierConfig;
use crate::error::PartitionError;
use crate::partition::{InflectionSplitter, LabelGrid};
use crate::spectrum::{SpectralAxes, Spectrum, celerity, hs_unchecked};
use crate::types::{Depth, SpectralShape, WindForcing};

/// One wave system: the spectrum restricted to a set of bins.
#[derive(Clone, Debug, PartialEq)]
pub struct Partition {
    values: Vec<f64>,
    hs: f64,
}

impl Partition {
    /// Mask `spectrum` to the bins selected by `keep`.
    fn masked(spectrum: &[f64], axes: &SpectralAxes, keep: impl Fn(usize) -> bool) -> Self {
        let values: Vec<f64> = spectrum
            .iter()
            .enumerate()
            .map(|(n, &e)| if keep(n) { e } else { 0.0 })
            .collect();
        let hs = hs_unchecked(&values, axes);
        Self { values, hs }
    }

    /// Partition with no energy.
    pub fn empty(shape: SpectralShape) -> Self {
        Self {
            values: vec![0.0; shape.n_bins()],
            hs: 0.0,
        }
    }

    /// Partition with every value missing (NaN).
    pub fn missing(shape: SpectralShape) -> Self {
        Self {
            values: vec![f64::NAN; shape.n_bins()],
            hs: f64::NAN,
        }
    }

    /// Frequency-major energy values, zero outside the partition.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Significant wave height of the partition.
    #[inline]
    pub fn hs(&self) -> f64 {
        self.hs
    }

    /// Sum of all bin values.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Check if the partition holds no energy.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }
}

/// Ordered partitions of one spectrum: `[wind-sea, swell 1, …, swell N]`.
///
/// Swells are in non-increasing order of significant wave height; slots
/// without a swell hold empty partitions.
#[derive(Clone, Debug, PartialEq)]
pub struct PartitionStack {
    shape: SpectralShape,
    partitions: Vec<Partition>,
}

impl PartitionStack {
    /// Stack of `n_partitions` missing (NaN) partitions.
    pub fn missing(shape: SpectralShape, n_partitions: usize) -> Self {
        Self {
            shape,
            partitions: (0..n_partitions).map(|_| Partition::missing(shape)).collect(),
        }
    }

    /// Grid shape of every partition.
    #[inline]
    pub fn shape(&self) -> SpectralShape {
        self.shape
    }

    /// Number of partitions (swells + 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    /// Check if the stack has no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Partition in slot `i`.
    pub fn get(&self, i: usize) -> Option<&Partition> {
        self.partitions.get(i)
    }

    /// Wind-sea partition (slot 0).
    pub fn wind_sea(&self) -> &Partition {
        &self.partitions[0]
    }

    /// Swell partitions in ranked order (slots 1..).
    pub fn swells(&self) -> &[Partition] {
        &self.partitions[1..]
    }

    /// Iterate over all partitions in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Partition> {
        self.partitions.iter()
    }

    /// Significant wave height of every slot.
    pub fn hs(&self) -> Vec<f64> {
        self.partitions.iter().map(Partition::hs).collect()
    }

    /// Summed energy of all slots.
    pub fn total(&self) -> f64 {
        self.partitions.iter().map(Partition::total).sum()
    }

    /// Consume the stack, returning its partitions.
    pub fn into_partitions(self) -> Vec<Partition> {
        self.partitions
    }
}

/// Classifies basins into wind-sea and ranked swells.
#[derive(Clone, Debug)]
pub struct PartitionClassifier {
    config: ClassifierConfig,
    splitter: InflectionSplitter,
}

impl PartitionClassifier {
    /// Create a classifier, validating the configuration.
    pub fn new(config: ClassifierConfig) -> Result<Self, PartitionError> {
        config.validate()?;
        let splitter = InflectionSplitter::new(config.split.clone());
        Ok(Self { config, splitter })
    }

    /// Classifier settings.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Build the partition stack of one spectrum from its watershed labels.
    ///
    /// Bins left unresolved by the watershed (label 0) belong to the
    /// wind-sea slot together with every basin classified as wind-sea.
    ///
    /// # Errors
    /// - `Shape` if spectrum, axes and labels disagree on the grid shape, or
    ///   a split needs a basin id beyond `u32::MAX`
    /// - `Domain` if the depth is invalid for the celerity computation
    pub fn classify(
        &self,
        spectrum: &Spectrum,
        axes: &SpectralAxes,
        labels: &LabelGrid,
        wind: WindForcing,
        depth: Depth,
    ) -> Result<PartitionStack, PartitionError> {
        let shape = spectrum.shape();
        for (what, other) in [("axes", axes.shape()), ("labels", labels.shape())] {
            if other != shape {
                return Err(PartitionError::shape(format!(
                    "{} shape {} does not match spectrum shape {}",
                    what, other, shape
                )));
            }
        }

        let values = spectrum.values();
        let wind_driven = self.wind_driven_mask(axes, wind, depth)?;

        let mut part = labels.labels().to_vec();
        // Split-off basins are appended with fresh ids above every existing
        // one, so the queue stays in ascending id order.
        let mut queue = labels.basin_ids();
        let mut max_id = queue.last().copied().unwrap_or(0);
        let mut swell_hs: Vec<(u32, f64)> = Vec::new();

        let mut next = 0;
        while next < queue.len() {
            let id = queue[next];
            next += 1;
            let mut masked: Vec<f64> = values
                .iter()
                .zip(&part)
                .map(|(&e, &l)| if l == id { e } else { 0.0 })
                .collect();

            if let Some(low) = self.splitter.split(&masked, axes) {
                max_id = max_id.checked_add(1).ok_or_else(|| {
                    PartitionError::shape(format!(
                        "no basin id left for the low-frequency part of basin {}",
                        id
                    ))
                })?;
                queue.push(max_id);
                log::debug!(
                    "basin {} split at frequency valley: {} bins moved to basin {}",
                    id,
                    low.len(),
                    max_id
                );
                for n in low {
                    part[n] = max_id;
                    masked[n] = 0.0;
                }
            }

            let total: f64 = masked.iter().sum();
            let driven: f64 = masked
                .iter()
                .zip(&wind_driven)
                .filter(|(_, w)| **w)
                .map(|(e, _)| e)
                .sum();
            let fraction = if total > 0.0 { driven / total } else { 0.0 };

            if fraction > self.config.wind_cutoff {
                log::debug!(
                    "basin {} is wind-sea (wind-driven fraction {:.3})",
                    id,
                    fraction
                );
                for l in part.iter_mut().filter(|l| **l == id) {
                    *l = 0;
                }
            } else {
                let hs = hs_unchecked(&masked, axes);
                log::debug!(
                    "basin {} is swell (wind-driven fraction {:.3}, hs {:.3})",
                    id,
                    fraction,
                    hs
                );
                swell_hs.push((id, hs));
            }
        }

        swell_hs.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        if swell_hs.len() > self.config.swells {
            log::debug!(
                "keeping {} of {} swell partitions",
                self.config.swells,
                swell_hs.len()
            );
        }

        let mut partitions = Vec::with_capacity(self.config.swells + 1);
        partitions.push(Partition::masked(values, axes, |n| part[n] == 0));
        for &(swell_id, _) in swell_hs.iter().take(self.config.swells) {
            partitions.push(Partition::masked(values, axes, |n| part[n] == swell_id));
        }
        partitions.resize_with(self.config.swells + 1, || Partition::empty(shape));

        Ok(PartitionStack { shape, partitions })
    }

    /// Bins whose phase speed is below the projected wind forcing.
    fn wind_driven_mask(
        &self,
        axes: &SpectralAxes,
        wind: WindForcing,
        depth: Depth,
    ) -> Result<Vec<bool>, PartitionError> {
        let c = celerity(axes.freq(), depth)?;
        let forcing: Vec<f64> = axes
            .dir()
            .iter()
            .map(|&d| self.config.age_factor * wind.projected_speed(d))
            .collect();

        Ok(c
            .iter()
            .flat_map(|&ck| forcing.iter().map(move |&up| up > ck))
            .collect())
    }
}

impl Default for PartitionClassifier {
    fn default() -> Self {
        let config = ClassifierConfig::default();
        let splitter = InflectionSplitter::new(config.split.clone());
        Self { config, splitter }
    }
}
