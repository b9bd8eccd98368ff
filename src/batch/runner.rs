//! Batch runner: the per-spectrum pipeline mapped over a collection.

use std::sync::Arc;

use crate::batch::{BatchForcing, PartitionedBatch, SpectralBatch};
use crate::config::PartitionConfig;
use crate::error::PartitionError;
use crate::partition::{NeighborTopology, PartitionStack, SpectralPartitioner, TopologyCache};

/// What to do when one spectrum of a batch fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the batch and return the error.
    #[default]
    FailFast,
    /// Fill the spectrum's partitions with NaN, flag it and carry on.
    MarkMissing,
}

/// Partitions every spectrum of a batch independently.
///
/// Neighbor topologies are built once per grid shape and kept for the
/// lifetime of the runner.
#[derive(Clone, Debug)]
pub struct BatchRunner {
    partitioner: SpectralPartitioner,
    cache: TopologyCache,
    policy: FailurePolicy,
}

impl BatchRunner {
    /// Create a runner, validating the configuration.
    pub fn new(config: &PartitionConfig) -> Result<Self, PartitionError> {
        Ok(Self {
            partitioner: SpectralPartitioner::new(config)?,
            cache: TopologyCache::new(),
            policy: FailurePolicy::default(),
        })
    }

    /// Set the failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[inline]
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    #[inline]
    pub fn partitioner(&self) -> &SpectralPartitioner {
        &self.partitioner
    }

    /// Topologies built so far.
    #[inline]
    pub fn cache(&self) -> &TopologyCache {
        &self.cache
    }

    /// Partition all spectra sequentially, in batch order.
    ///
    /// # Errors
    /// - `Shape` if a per-spectrum forcing field has the wrong length
    /// - under [`FailurePolicy::FailFast`], the first per-spectrum error
    pub fn run(
        &mut self,
        batch: &SpectralBatch,
        forcing: &BatchForcing,
    ) -> Result<PartitionedBatch, PartitionError> {
        let topology = self.prepare(batch, forcing)?;
        let this = &*self;
        let results = (0..batch.n_spectra())
            .map(|i| this.resolve(batch, i, this.partition_one(batch, forcing, &topology, i)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(this.finish(batch, results))
    }

    /// Partition all spectra across the rayon thread pool.
    ///
    /// Output order matches batch order. Under [`FailurePolicy::FailFast`]
    /// the returned error is from some failing spectrum, not necessarily
    /// the first.
    #[cfg(feature = "parallel")]
    pub fn run_parallel(
        &mut self,
        batch: &SpectralBatch,
        forcing: &BatchForcing,
    ) -> Result<PartitionedBatch, PartitionError> {
        use rayon::prelude::*;

        let topology = self.prepare(batch, forcing)?;
        let this = &*self;
        let results = (0..batch.n_spectra())
            .into_par_iter()
            .map(|i| this.resolve(batch, i, this.partition_one(batch, forcing, &topology, i)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(this.finish(batch, results))
    }

    fn prepare(
        &mut self,
        batch: &SpectralBatch,
        forcing: &BatchForcing,
    ) -> Result<Arc<NeighborTopology>, PartitionError> {
        forcing.check(batch.n_spectra())?;
        log::info!(
            "partitioning {} spectra on a {} grid into {} partitions",
            batch.n_spectra(),
            batch.axes().shape(),
            self.partitioner.n_partitions()
        );
        Ok(self.cache.get_or_build(batch.axes().shape()))
    }

    fn partition_one(
        &self,
        batch: &SpectralBatch,
        forcing: &BatchForcing,
        topology: &NeighborTopology,
        i: usize,
    ) -> Result<PartitionStack, PartitionError> {
        let spectrum = batch.spectrum(i)?;
        let (wind, depth) = forcing.at(i)?;
        self.partitioner
            .partition(&spectrum, batch.axes(), topology, wind, depth)
    }

    fn resolve(
        &self,
        batch: &SpectralBatch,
        i: usize,
        result: Result<PartitionStack, PartitionError>,
    ) -> Result<(PartitionStack, bool), PartitionError> {
        match (result, self.policy) {
            (Ok(stack), _) => Ok((stack, false)),
            (Err(e), FailurePolicy::FailFast) => Err(e),
            (Err(e), FailurePolicy::MarkMissing) => {
                log::warn!("spectrum {} marked missing: {}", i, e);
                Ok((
                    PartitionStack::missing(batch.axes().shape(), self.partitioner.n_partitions()),
                    true,
                ))
            }
        }
    }

    fn finish(&self, batch: &SpectralBatch, results: Vec<(PartitionStack, bool)>) -> PartitionedBatch {
        let out = PartitionedBatch::assemble(
            batch.dims().to_vec(),
            batch.axes().shape(),
            self.partitioner.n_partitions(),
            results,
        );
        log::info!(
            "partitioned {} spectra ({} missing)",
            out.n_spectra(),
            out.n_missing()
        );
        out
    }
}
