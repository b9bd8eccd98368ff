//! Per-spectrum partitioning pipeline.

use crate::config::PartitionConfig;
use crate::error::PartitionError;
use crate::partition::{
    LabelGrid, NeighborTopology, PartitionClassifier, PartitionStack, WatershedLabeler,
};
use crate::spectrum::{SpectralAxes, Spectrum};
use crate::types::{Depth, WindForcing};

/// Output of partitioning one spectrum.
#[derive(Clone, Debug)]
pub struct PartitionOutcome {
    /// Raw watershed labels before classification.
    pub labels: LabelGrid,
    /// Ordered partitions.
    pub stack: PartitionStack,
}

/// Runs watershed labeling and classification on single spectra.
///
/// Holds no per-spectrum state, so one partitioner can be shared by
/// reference across worker threads.
#[derive(Clone, Debug, Default)]
pub struct SpectralPartitioner {
    labeler: WatershedLabeler,
    classifier: PartitionClassifier,
}

impl SpectralPartitioner {
    /// Create a partitioner, validating the configuration.
    pub fn new(config: &PartitionConfig) -> Result<Self, PartitionError> {
        Ok(Self {
            labeler: WatershedLabeler::new(config.watershed.clone())?,
            classifier: PartitionClassifier::new(config.classifier.clone())?,
        })
    }

    /// Number of partitions produced per spectrum.
    pub fn n_partitions(&self) -> usize {
        self.classifier.config().swells + 1
    }

    /// Partition one spectrum.
    pub fn partition(
        &self,
        spectrum: &Spectrum,
        axes: &SpectralAxes,
        topology: &NeighborTopology,
        wind: WindForcing,
        depth: Depth,
    ) -> Result<PartitionStack, PartitionError> {
        Ok(self
            .partition_with_labels(spectrum, axes, topology, wind, depth)?
            .stack)
    }

    /// Partition one spectrum, also returning the raw watershed labels.
    pub fn partition_with_labels(
        &self,
        spectrum: &Spectrum,
        axes: &SpectralAxes,
        topology: &NeighborTopology,
        wind: WindForcing,
        depth: Depth,
    ) -> Result<PartitionOutcome, PartitionError> {
        let labels = self.labeler.label(spectrum, topology)?;
        let stack = self
            .classifier
            .classify(spectrum, axes, &labels, wind, depth)?;
        Ok(PartitionOutcome { labels, stack })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_on_constant_spectrum() {
        let freq = (0..8).map(|i| 0.06 + 0.01 * i as f64).collect();
        let dir = (0..6).map(|i| 60.0 * i as f64).collect();
        let axes = SpectralAxes::new(freq, dir).unwrap();
        let shape = axes.shape();
        let topo = NeighborTopology::build(shape);
        let spectrum = Spectrum::new(shape, vec![0.3; 48]).unwrap();

        let outcome = SpectralPartitioner::default()
            .partition_with_labels(
                &spectrum,
                &axes,
                &topo,
                WindForcing::CALM,
                Depth::try_new(100.0).unwrap(),
            )
            .unwrap();
        assert_eq!(outcome.labels.n_basins(), 1);
        assert_eq!(outcome.stack.len(), 4);
        assert_eq!(outcome.stack.swells()[0].values(), spectrum.values());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PartitionConfig::default().with_max_levels(0);
        assert!(SpectralPartitioner::new(&config).is_err());
    }
}
