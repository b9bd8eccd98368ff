//! Watershed partitioning of directional wave spectra.
//!
//! The per-spectrum pipeline is:
//!
//! ```text
//! shape ──► NeighborTopology (cached per shape)
//!                 │
//! spectrum ──► WatershedLabeler ──► LabelGrid
//!                                      │
//!                       PartitionClassifier (+ InflectionSplitter)
//!                                      │
//!                                      ▼
//!                PartitionStack [wind-sea, swell 1, …, swell N]
//! ```
//!
//! Each step is sequential: the flood has strict level and distance-ring
//! ordering. Parallelism happens across spectra, in [`crate::batch`].
//!
//! # Example
//!
//! ```
//! use specpart_rs::partition::{NeighborTopology, SpectralPartitioner};
//! use specpart_rs::spectrum::{SpectralAxes, Spectrum};
//! use specpart_rs::types::{Depth, WindForcing};
//!
//! let freq: Vec<f64> = (0..30).map(|i| 0.04 + 0.01 * i as f64).collect();
//! let dir: Vec<f64> = (0..24).map(|i| 15.0 * i as f64).collect();
//! let axes = SpectralAxes::new(freq, dir).unwrap();
//! let topology = NeighborTopology::build(axes.shape());
//!
//! let values: Vec<f64> = (0..axes.shape().n_bins())
//!     .map(|n| {
//!         let (ik, ith) = axes.shape().coords(n);
//!         let dk = ik as f64 - 8.0;
//!         let dth = ith as f64 - 6.0;
//!         (-(dk * dk + dth * dth) / 8.0).exp()
//!     })
//!     .collect();
//! let spectrum = Spectrum::new(axes.shape(), values).unwrap();
//!
//! let stack = SpectralPartitioner::default()
//!     .partition(&spectrum, &axes, &topology, WindForcing::CALM, Depth::try_new(50.0).unwrap())
//!     .unwrap();
//! assert_eq!(stack.len(), 4);
//! assert!(stack.swells()[0].hs() > 0.0);
//! ```

mod classify;
mod inflection;
mod pipeline;
mod topology;
mod watershed;

pub use classify::{Partition, PartitionClassifier, PartitionStack};
pub use inflection::{InflectionSplitter, Inflections, find_inflections};
pub use pipeline::{PartitionOutcome, SpectralPartitioner};
pub use topology::{MAX_NEIGHBORS, NeighborTopology, TopologyCache};
pub use watershed::{LabelGrid, WatershedLabeler};
