//! # specpart-rs
//!
//! Watershed partitioning of 2-D directional ocean wave spectra.
//!
//! A spectrum `E(f, θ)` is split into separate wave systems by an immersion
//! watershed on the energy surface. The resulting basins are refined by
//! looking for valleys in their frequency profiles, classified as wind-sea
//! or swell with a wave-age criterion, and ranked by significant wave
//! height. The output of each spectrum is a fixed-size stack
//! `[wind-sea, swell 1, …, swell N]`.
//!
//! This crate provides:
//! - Validated spectral grids and axes ([`Spectrum`], [`SpectralAxes`])
//! - Neighbor topology with direction wrap-around ([`NeighborTopology`])
//! - Watershed labeling ([`WatershedLabeler`])
//! - Secondary peak splitting ([`InflectionSplitter`])
//! - Wind-sea / swell classification ([`PartitionClassifier`])
//! - Batch processing with optional rayon parallelism ([`BatchRunner`])
//!
//! The crate logs through the `log` facade and never installs a logger.

pub mod batch;
pub mod config;
pub mod error;
pub mod partition;
pub mod spectrum;
pub mod types;

pub use batch::{
    BatchDim, BatchForcing, BatchRunner, FailurePolicy, ForcingField, PartAxis, PartitionedBatch,
    SpectralBatch,
};
pub use config::{ClassifierConfig, PartitionConfig, SplitConfig, WatershedConfig};
pub use error::{ErrorKind, PartitionError};
pub use partition::{
    InflectionSplitter, LabelGrid, NeighborTopology, Partition, PartitionClassifier,
    PartitionStack, SpectralPartitioner, TopologyCache, WatershedLabeler,
};
pub use spectrum::{SpectralAxes, Spectrum, celerity, significant_wave_height};
pub use types::{Depth, SpectralShape, WindForcing};
