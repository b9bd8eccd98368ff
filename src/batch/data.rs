//! Batch input and output containers.

use crate::error::PartitionError;
use crate::partition::PartitionStack;
use crate::spectrum::{SpectralAxes, Spectrum};
use crate::types::{Depth, SpectralShape, WindForcing};

// =============================================================================
// Input
// =============================================================================

/// A named non-spectral dimension (time, site, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchDim {
    pub name: String,
    pub size: usize,
}

impl BatchDim {
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

/// A collection of spectra sharing one set of frequency/direction axes.
///
/// Values are stored row-major over `dims` followed by the spectral
/// `(freq, dir)` axes, so spectrum `i` occupies one contiguous block of
/// `n_freq * n_dir` values.
#[derive(Clone, Debug)]
pub struct SpectralBatch {
    axes: SpectralAxes,
    dims: Vec<BatchDim>,
    values: Vec<f64>,
}

impl SpectralBatch {
    /// Create a batch, checking that `values` covers every spectrum.
    ///
    /// Energy values themselves are validated per spectrum when the batch
    /// is run, so one bad spectrum can be marked missing on its own.
    pub fn new(
        axes: SpectralAxes,
        dims: Vec<BatchDim>,
        values: Vec<f64>,
    ) -> Result<Self, PartitionError> {
        let n_spectra: usize = dims.iter().map(|d| d.size).product();
        let expected = n_spectra * axes.shape().n_bins();
        if values.len() != expected {
            return Err(PartitionError::shape(format!(
                "batch of {} spectra on a {} grid needs {} values, got {}",
                n_spectra,
                axes.shape(),
                expected,
                values.len()
            )));
        }
        Ok(Self { axes, dims, values })
    }

    /// Batch holding a single spectrum with no extra dimensions.
    pub fn single(axes: SpectralAxes, spectrum: Spectrum) -> Result<Self, PartitionError> {
        axes.shape().check_len(spectrum.values().len())?;
        Self::new(axes, Vec::new(), spectrum.into_values())
    }

    #[inline]
    pub fn axes(&self) -> &SpectralAxes {
        &self.axes
    }

    #[inline]
    pub fn dims(&self) -> &[BatchDim] {
        &self.dims
    }

    /// Number of spectra (product of the dimension sizes).
    pub fn n_spectra(&self) -> usize {
        self.dims.iter().map(|d| d.size).product()
    }

    /// Raw values of spectrum `i`.
    pub fn spectrum_values(&self, i: usize) -> &[f64] {
        let n = self.axes.shape().n_bins();
        &self.values[i * n..(i + 1) * n]
    }

    /// Validated spectrum `i`.
    pub fn spectrum(&self, i: usize) -> Result<Spectrum, PartitionError> {
        Spectrum::new(self.axes.shape(), self.spectrum_values(i).to_vec())
    }
}

/// A forcing variable, either broadcast or given per spectrum.
#[derive(Clone, Debug, PartialEq)]
pub enum ForcingField {
    Uniform(f64),
    PerSpectrum(Vec<f64>),
}

impl ForcingField {
    /// Value for spectrum `i`, or `None` past the end of a per-spectrum field.
    pub fn at(&self, i: usize) -> Option<f64> {
        match self {
            ForcingField::Uniform(v) => Some(*v),
            ForcingField::PerSpectrum(values) => values.get(i).copied(),
        }
    }

    fn value(&self, name: &str, i: usize) -> Result<f64, PartitionError> {
        self.at(i).ok_or_else(|| {
            PartitionError::shape(format!("{} has no value for spectrum {}", name, i))
        })
    }

    fn check_len(&self, name: &str, n_spectra: usize) -> Result<(), PartitionError> {
        match self {
            ForcingField::PerSpectrum(values) if values.len() != n_spectra => {
                Err(PartitionError::shape(format!(
                    "{} has {} values for {} spectra",
                    name,
                    values.len(),
                    n_spectra
                )))
            }
            _ => Ok(()),
        }
    }
}

impl From<f64> for ForcingField {
    fn from(v: f64) -> Self {
        ForcingField::Uniform(v)
    }
}

impl From<Vec<f64>> for ForcingField {
    fn from(values: Vec<f64>) -> Self {
        ForcingField::PerSpectrum(values)
    }
}

/// Wind and depth forcing for every spectrum of a batch.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchForcing {
    /// Wind speed (m/s).
    pub wind_speed: ForcingField,
    /// Wind direction (degrees, same convention as the spectral directions).
    pub wind_dir: ForcingField,
    /// Water depth (m).
    pub depth: ForcingField,
}

impl BatchForcing {
    pub fn new(
        wind_speed: impl Into<ForcingField>,
        wind_dir: impl Into<ForcingField>,
        depth: impl Into<ForcingField>,
    ) -> Self {
        Self {
            wind_speed: wind_speed.into(),
            wind_dir: wind_dir.into(),
            depth: depth.into(),
        }
    }

    /// Check that per-spectrum fields match the batch size.
    pub fn check(&self, n_spectra: usize) -> Result<(), PartitionError> {
        self.wind_speed.check_len("wind_speed", n_spectra)?;
        self.wind_dir.check_len("wind_dir", n_spectra)?;
        self.depth.check_len("depth", n_spectra)
    }

    /// Validated forcing for spectrum `i`.
    ///
    /// # Errors
    /// - `Shape` if a per-spectrum field has no value at `i`
    /// - `Domain` if the wind or depth values are invalid
    pub fn at(&self, i: usize) -> Result<(WindForcing, Depth), PartitionError> {
        let wind = WindForcing::try_new(
            self.wind_speed.value("wind_speed", i)?,
            self.wind_dir.value("wind_dir", i)?,
        )?;
        let depth = Depth::try_new(self.depth.value("depth", i)?)?;
        Ok((wind, depth))
    }
}

// =============================================================================
// Output
// =============================================================================

/// The partition axis added to batch output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartAxis {
    values: Vec<usize>,
}

impl PartAxis {
    pub const NAME: &'static str = "part";
    pub const STANDARD_NAME: &'static str = "spectral_partition_number";
    pub const UNITS: &'static str = "";

    /// Axis with `n_partitions` entries `0..n_partitions`.
    pub fn new(n_partitions: usize) -> Self {
        Self {
            values: (0..n_partitions).collect(),
        }
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    pub fn standard_name(&self) -> &'static str {
        Self::STANDARD_NAME
    }

    pub fn units(&self) -> &'static str {
        Self::UNITS
    }

    pub fn values(&self) -> &[usize] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Partitioned spectra of a whole batch.
///
/// Data layout is `[dims..., part, freq, dir]`: the partition axis follows
/// the batch dimensions and precedes the spectral axes.
#[derive(Clone, Debug)]
pub struct PartitionedBatch {
    dims: Vec<BatchDim>,
    part: PartAxis,
    shape: SpectralShape,
    data: Vec<f64>,
    hs: Vec<f64>,
    missing: Vec<bool>,
}

impl PartitionedBatch {
    /// Assemble per-spectrum stacks in batch order.
    pub(crate) fn assemble(
        dims: Vec<BatchDim>,
        shape: SpectralShape,
        n_partitions: usize,
        results: Vec<(PartitionStack, bool)>,
    ) -> Self {
        let n_spectra = results.len();
        let mut data = Vec::with_capacity(n_spectra * n_partitions * shape.n_bins());
        let mut hs = Vec::with_capacity(n_spectra * n_partitions);
        let mut missing = Vec::with_capacity(n_spectra);

        for (stack, is_missing) in results {
            debug_assert_eq!(stack.len(), n_partitions);
            hs.extend(stack.hs());
            for partition in stack.into_partitions() {
                data.extend_from_slice(partition.values());
            }
            missing.push(is_missing);
        }

        Self {
            dims,
            part: PartAxis::new(n_partitions),
            shape,
            data,
            hs,
            missing,
        }
    }

    #[inline]
    pub fn dims(&self) -> &[BatchDim] {
        &self.dims
    }

    #[inline]
    pub fn part_axis(&self) -> &PartAxis {
        &self.part
    }

    #[inline]
    pub fn shape(&self) -> SpectralShape {
        self.shape
    }

    pub fn n_spectra(&self) -> usize {
        self.missing.len()
    }

    pub fn n_partitions(&self) -> usize {
        self.part.len()
    }

    /// All values in `[dims..., part, freq, dir]` order.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Values of partition `part` of spectrum `i`.
    pub fn partition(&self, i: usize, part: usize) -> &[f64] {
        let n = self.shape.n_bins();
        let start = (i * self.n_partitions() + part) * n;
        &self.data[start..start + n]
    }

    /// Significant wave height of every partition of spectrum `i`.
    pub fn hs(&self, i: usize) -> &[f64] {
        let np = self.n_partitions();
        &self.hs[i * np..(i + 1) * np]
    }

    /// Whether spectrum `i` failed and was filled with NaN.
    pub fn is_missing(&self, i: usize) -> bool {
        self.missing[i]
    }

    pub fn missing(&self) -> &[bool] {
        &self.missing
    }

    pub fn n_missing(&self) -> usize {
        self.missing.iter().filter(|&&m| m).count()
    }

    /// Values transposed to `[part, dims..., freq, dir]` order.
    pub fn to_part_major(&self) -> Vec<f64> {
        let n_spectra = self.n_spectra();
        let mut out = Vec::with_capacity(self.data.len());
        for part in 0..self.n_partitions() {
            for i in 0..n_spectra {
                out.extend_from_slice(self.partition(i, part));
            }
        }
        out
    }
}
