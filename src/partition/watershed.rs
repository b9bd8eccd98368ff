//! Immersion-simulation watershed labeling of a spectral grid.
//!
//! The spectrum is turned upside down into an elevation field
//! `z = max(E) - E`, so energy peaks become valleys, and the field is
//! flooded level by level from the lowest elevation upwards:
//!
//! 1. Elevations are quantized into `max_levels` integer levels and the bins
//!    sorted by elevation.
//! 2. At each level, the bins of that level are masked. Masked bins touching
//!    an already labeled bin seed a breadth-first queue.
//! 3. The queue is drained in distance rings separated by a sentinel. A bin
//!    reached from a single basin joins it; a bin reached from two
//!    different basins becomes a watershed line (label 0).
//! 4. Masked bins the queue never reached are new local minima: each
//!    connected group gets a fresh basin id.
//! 5. Leftover watershed bins are relaxed into the neighboring basin of
//!    closest elevation, for a bounded number of passes.
//!
//! Basin ids are creation order only; they carry no ranking.
//!
//! Reference: Vincent & Soille (1991), as adapted for wave spectra by
//! Hanson & Phillips (2001).

use std::collections::VecDeque;

use crate::config::WatershedConfig;
use crate::error::PartitionError;
use crate::partition::NeighborTopology;
use crate::spectrum::Spectrum;
use crate::types::SpectralShape;

/// Not yet reached by the flood.
const INIT: i32 = -1;
/// Reached at the current level, connectivity not yet resolved.
const MASK: i32 = -2;
/// Watershed line between basins.
const WSHED: i32 = 0;
/// Queue marker separating breadth-first distance rings.
const FICTITIOUS: usize = usize::MAX;

/// Per-bin basin labels produced by the watershed.
///
/// `0` marks watershed bins left unresolved after relaxation; positive
/// values are basin ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelGrid {
    shape: SpectralShape,
    labels: Vec<u32>,
}

impl LabelGrid {
    /// Wrap precomputed frequency-major labels.
    pub fn from_labels(shape: SpectralShape, labels: Vec<u32>) -> Result<Self, PartitionError> {
        shape.check_len(labels.len())?;
        Ok(Self { shape, labels })
    }

    /// Grid shape.
    #[inline]
    pub fn shape(&self) -> SpectralShape {
        self.shape
    }

    /// Frequency-major labels.
    #[inline]
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Label at (frequency row, direction column).
    #[inline]
    pub fn get(&self, ik: usize, ith: usize) -> u32 {
        self.labels[self.shape.bin(ik, ith)]
    }

    /// Distinct basin ids (> 0), ascending.
    pub fn basin_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.labels.iter().copied().filter(|&l| l > 0).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Number of distinct basins.
    pub fn n_basins(&self) -> usize {
        self.basin_ids().len()
    }

    /// Number of bins carrying `label`.
    pub fn count(&self, label: u32) -> usize {
        self.labels.iter().filter(|&&l| l == label).count()
    }

    /// Number of unresolved watershed bins (label 0).
    pub fn n_unresolved(&self) -> usize {
        self.count(0)
    }

    /// Consume the grid, returning its labels.
    pub fn into_labels(self) -> Vec<u32> {
        self.labels
    }
}

/// Watershed labeler with fixed quantization settings.
#[derive(Clone, Debug, Default)]
pub struct WatershedLabeler {
    config: WatershedConfig,
}

impl WatershedLabeler {
    /// Create a labeler, validating the configuration.
    pub fn new(config: WatershedConfig) -> Result<Self, PartitionError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Labeler settings.
    pub fn config(&self) -> &WatershedConfig {
        &self.config
    }

    /// Label the basins of a spectrum.
    ///
    /// # Errors
    ///
    /// Returns a `Shape` error if the topology was built for another shape.
    /// A constant spectrum is valid input and yields a single basin.
    pub fn label(
        &self,
        spectrum: &Spectrum,
        topology: &NeighborTopology,
    ) -> Result<LabelGrid, PartitionError> {
        topology.check_shape(spectrum.shape())?;

        let mut flood = Flood::new(spectrum.values(), self.config.max_levels);
        flood.run(topology);
        let n_basins = flood.next_label;
        flood.relax(topology, self.config.relaxation_passes);

        let labels: Vec<u32> = flood
            .labels
            .iter()
            .map(|&l| {
                debug_assert!(l >= 0, "bin left at sentinel label {l}");
                l.max(0) as u32
            })
            .collect();
        let grid = LabelGrid {
            shape: spectrum.shape(),
            labels,
        };

        log::debug!(
            "watershed on {} grid: {} levels, {} basins, {} watershed bins unresolved",
            grid.shape,
            self.config.max_levels,
            n_basins,
            grid.n_unresolved()
        );

        Ok(grid)
    }
}

/// Working state of one flood.
struct Flood {
    /// Elevation (max energy minus energy).
    zp: Vec<f64>,
    /// Quantized elevation level.
    level: Vec<usize>,
    /// Bins sorted by ascending elevation.
    order: Vec<usize>,
    /// Working labels: INIT, MASK, WSHED or a basin id.
    labels: Vec<i32>,
    /// Breadth-first distance from labeled bins within the current level.
    dist: Vec<u32>,
    queue: VecDeque<usize>,
    stack: Vec<usize>,
    next_label: i32,
}

impl Flood {
    fn new(values: &[f64], max_levels: usize) -> Self {
        let n = values.len();
        let zmin = values.iter().copied().fold(f64::INFINITY, f64::min);
        let zmax = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let zp: Vec<f64> = values.iter().map(|&v| zmax - v).collect();
        let range = zmax - zmin;
        let fact = if range > 0.0 {
            (max_levels - 1) as f64 / range
        } else {
            0.0
        };
        let level: Vec<usize> = zp
            .iter()
            .map(|&z| ((z * fact).round() as usize).min(max_levels - 1))
            .collect();

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| zp[a].total_cmp(&zp[b]));

        Self {
            zp,
            level,
            order,
            labels: vec![INIT; n],
            dist: vec![0; n],
            queue: VecDeque::new(),
            stack: Vec::new(),
            next_label: 0,
        }
    }

    /// Flood the occupied levels in ascending order.
    ///
    /// Levels are non-decreasing along `order`, so each level is one
    /// contiguous run and empty levels are never visited.
    fn run(&mut self, topology: &NeighborTopology) {
        let mut start = 0;
        while start < self.order.len() {
            let ih = self.level[self.order[start]];
            let end = start
                + self.order[start..]
                    .iter()
                    .take_while(|&&ip| self.level[ip] == ih)
                    .count();
            self.mask_level(topology, start, end);
            self.propagate(topology);
            self.new_basins(topology, start, end);
            start = end;
        }
    }

    /// Mask the bins of one level and queue those touching labeled bins.
    fn mask_level(&mut self, topology: &NeighborTopology, start: usize, end: usize) {
        for m in start..end {
            let ip = self.order[m];
            self.labels[ip] = MASK;
            if topology.neighbors(ip).iter().any(|&j| self.labels[j] >= 0) {
                self.dist[ip] = 1;
                self.queue.push_back(ip);
            }
        }
    }

    /// Drain the queue ring by ring, extending existing basins.
    fn propagate(&mut self, topology: &NeighborTopology) {
        let mut cur_dist = 1;
        self.queue.push_back(FICTITIOUS);

        while let Some(mut ip) = self.queue.pop_front() {
            if ip == FICTITIOUS {
                if self.queue.is_empty() {
                    break;
                }
                self.queue.push_back(FICTITIOUS);
                cur_dist += 1;
                let Some(next) = self.queue.pop_front() else {
                    break;
                };
                ip = next;
            }

            for &ipp in topology.neighbors(ip) {
                let neighbor = self.labels[ipp];
                if neighbor >= 0 && self.dist[ipp] < cur_dist {
                    if neighbor > 0 {
                        let own = self.labels[ip];
                        if own == MASK || own == WSHED {
                            self.labels[ip] = neighbor;
                        } else if own != neighbor {
                            self.labels[ip] = WSHED;
                        }
                    } else if self.labels[ip] == MASK {
                        self.labels[ip] = WSHED;
                    }
                } else if neighbor == MASK && self.dist[ipp] == 0 {
                    self.dist[ipp] = cur_dist + 1;
                    self.queue.push_back(ipp);
                }
            }
        }
    }

    /// Give every still-masked group of the level a new basin id.
    fn new_basins(&mut self, topology: &NeighborTopology, start: usize, end: usize) {
        for m in start..end {
            let ip = self.order[m];
            self.dist[ip] = 0;
            if self.labels[ip] != MASK {
                continue;
            }

            self.next_label += 1;
            let label = self.next_label;
            self.labels[ip] = label;
            self.stack.clear();
            self.stack.push(ip);
            while let Some(i) = self.stack.pop() {
                for &j in topology.neighbors(i) {
                    if self.labels[j] == MASK {
                        self.labels[j] = label;
                        self.stack.push(j);
                    }
                }
            }
        }
    }

    /// Move watershed bins into the neighboring basin of closest elevation.
    ///
    /// Each pass reads a snapshot of the labels, so updates never cascade
    /// within a pass.
    fn relax(&mut self, topology: &NeighborTopology, passes: usize) {
        for _ in 0..passes {
            let boundary: Vec<usize> = (0..self.labels.len())
                .filter(|&i| self.labels[i] == WSHED)
                .collect();
            if boundary.is_empty() {
                break;
            }

            let updates: Vec<i32> = boundary
                .iter()
                .map(|&jl| {
                    let z = self.zp[jl];
                    topology
                        .neighbors(jl)
                        .iter()
                        .filter(|&&j| self.labels[j] != WSHED)
                        .min_by(|&&a, &&b| {
                            (self.zp[a] - z).abs().total_cmp(&(self.zp[b] - z).abs())
                        })
                        .map_or(WSHED, |&j| self.labels[j])
                })
                .collect();

            for (&jl, label) in boundary.iter().zip(updates) {
                self.labels[jl] = label;
            }
        }
    }
}
