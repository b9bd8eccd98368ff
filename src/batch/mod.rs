//! Partitioning of many spectra at once.
//!
//! A [`SpectralBatch`] holds spectra laid out over any number of named
//! dimensions (time, site, ...) with shared frequency/direction axes.
//! [`BatchRunner`] applies the per-spectrum pipeline to each of them and
//! returns a [`PartitionedBatch`] with an extra `part` axis of length
//! `swells + 1`, placed between the batch dimensions and the spectral axes.
//!
//! Spectra are independent. With the `parallel` feature enabled,
//! [`BatchRunner::run_parallel`] spreads them over the rayon thread pool;
//! the output order always matches the input order.

mod data;
mod runner;

pub use data::{BatchDim, BatchForcing, ForcingField, PartAxis, PartitionedBatch, SpectralBatch};
pub use runner::{BatchRunner, FailurePolicy};
