//! Bin adjacency for frequency-direction grids.
//!
//! Every bin is connected to its 8 surrounding bins. The direction axis is
//! periodic (the first and last direction columns are adjacent) while the
//! frequency axis is bounded, so bins in the first and last frequency rows
//! have only 5 neighbors.
//!
//! ```text
//!   ik+1   TL  T  TR
//!   ik      L  n  R        L/R, TL/TR, BL/BR wrap in direction
//!   ik-1   BL  B  BR       T/B never wrap in frequency
//! ```
//!
//! The adjacency depends only on the grid shape, so it is built once and
//! shared read-only across all spectra of that shape (see [`TopologyCache`]).

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::PartitionError;
use crate::types::SpectralShape;

/// Maximum number of neighbors of a bin.
pub const MAX_NEIGHBORS: usize = 8;

/// Neighbor lists for every bin of a grid shape, in compressed row form.
///
/// Neighbors of bin `n` are `indices[offsets[n]..offsets[n + 1]]`, in the
/// order below, bottom, left, right, then the four diagonals. Duplicates
/// (possible when `n_dir <= 2`) and self-links (`n_dir == 1`) are dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighborTopology {
    shape: SpectralShape,
    offsets: Vec<usize>,
    indices: Vec<usize>,
}

impl NeighborTopology {
    /// Build the adjacency for a grid shape.
    pub fn build(shape: SpectralShape) -> Self {
        let nk = shape.n_freq();
        let nth = shape.n_dir();
        let nspec = shape.n_bins();

        let mut offsets = Vec::with_capacity(nspec + 1);
        let mut indices = Vec::with_capacity(nspec * MAX_NEIGHBORS);
        offsets.push(0);

        for n in 0..nspec {
            let (ik, ith) = shape.coords(n);
            let has_below = ik > 0;
            let has_above = ik + 1 < nk;

            // Direction columns either side, wrapped.
            let left = if ith > 0 { n - 1 } else { n + nth - 1 };
            let right = if ith + 1 < nth { n + 1 } else { n + 1 - nth };

            let start = indices.len();
            let mut push = |m: usize| {
                if m != n && !indices[start..].contains(&m) {
                    indices.push(m);
                }
            };

            if has_below {
                push(n - nth);
            }
            if has_above {
                push(n + nth);
            }
            push(left);
            push(right);
            if has_below {
                push(left - nth);
            }
            if has_above {
                push(left + nth);
            }
            if has_below {
                push(right - nth);
            }
            if has_above {
                push(right + nth);
            }

            offsets.push(indices.len());
        }

        Self {
            shape,
            offsets,
            indices,
        }
    }

    /// Grid shape this topology was built for.
    #[inline]
    pub fn shape(&self) -> SpectralShape {
        self.shape
    }

    /// Number of bins.
    #[inline]
    pub fn n_bins(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Neighbor indices of bin `n`.
    #[inline]
    pub fn neighbors(&self, n: usize) -> &[usize] {
        &self.indices[self.offsets[n]..self.offsets[n + 1]]
    }

    /// Total number of directed neighbor links.
    pub fn n_links(&self) -> usize {
        self.indices.len()
    }

    /// Fail with a `Shape` error unless `shape` matches this topology.
    pub fn check_shape(&self, shape: SpectralShape) -> Result<(), PartitionError> {
        if shape != self.shape {
            return Err(PartitionError::shape(format!(
                "grid shape {} does not match neighbor topology built for {}",
                shape, self.shape
            )));
        }
        Ok(())
    }
}

/// Lazily populated map from grid shape to shared topology.
///
/// Entries are never mutated once inserted, so the returned `Arc`s can be
/// handed to worker threads freely.
#[derive(Clone, Debug, Default)]
pub struct TopologyCache {
    entries: HashMap<SpectralShape, Arc<NeighborTopology>>,
}

impl TopologyCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Topology for `shape`, building it on first request.
    pub fn get_or_build(&mut self, shape: SpectralShape) -> Arc<NeighborTopology> {
        self.entries
            .entry(shape)
            .or_insert_with(|| {
                log::debug!("building neighbor topology for {} grid", shape);
                Arc::new(NeighborTopology::build(shape))
            })
            .clone()
    }

    /// Cached topology for `shape`, if already built.
    pub fn get(&self, shape: SpectralShape) -> Option<Arc<NeighborTopology>> {
        self.entries.get(&shape).cloned()
    }

    /// Number of cached shapes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
