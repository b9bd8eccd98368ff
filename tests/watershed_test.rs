//! Integration tests for neighbor topology and watershed labeling.

mod common;

use common::*;
use specpart_rs::{
    LabelGrid, NeighborTopology, SpectralShape, Spectrum, TopologyCache, WatershedConfig,
    WatershedLabeler,
};

fn label(values: Vec<f64>) -> LabelGrid {
    let axes = standard_axes();
    let topo = NeighborTopology::build(axes.shape());
    WatershedLabeler::default()
        .label(&spectrum(&axes, values), &topo)
        .unwrap()
}

/// Sorted basin sizes, a label-id independent summary of the regions.
fn basin_sizes(grid: &LabelGrid) -> Vec<usize> {
    let mut sizes: Vec<usize> = grid.basin_ids().iter().map(|&id| grid.count(id)).collect();
    sizes.sort_unstable();
    sizes
}

/// Shift the direction columns of a frequency-major grid by `k`.
fn rotate(values: &[f64], k: usize) -> Vec<f64> {
    let mut out = vec![0.0; values.len()];
    for (n, &v) in values.iter().enumerate() {
        let (ik, ith) = (n / N_DIR, n % N_DIR);
        out[ik * N_DIR + (ith + k) % N_DIR] = v;
    }
    out
}

#[test]
fn test_topology_symmetric_with_direction_wrap() {
    for (nk, nth) in [(32, 24), (5, 3), (1, 7), (9, 2)] {
        let shape = SpectralShape::new(nk, nth).unwrap();
        let topo = NeighborTopology::build(shape);
        for a in 0..shape.n_bins() {
            for &b in topo.neighbors(a) {
                assert!(
                    topo.neighbors(b).contains(&a),
                    "{}x{}: {} -> {} not symmetric",
                    nk,
                    nth,
                    a,
                    b
                );
            }
        }
    }
}

#[test]
fn test_topology_wraps_direction_not_frequency() {
    let shape = SpectralShape::new(N_FREQ, N_DIR).unwrap();
    let topo = NeighborTopology::build(shape);

    // Column 0 touches the last column in the same, lower and upper rows.
    let n = shape.bin(4, 0);
    for ik in [3, 4, 5] {
        assert!(topo.neighbors(n).contains(&shape.bin(ik, N_DIR - 1)));
    }

    // First and last frequency rows never link to each other.
    for ith in 0..N_DIR {
        let low = shape.bin(0, ith);
        assert!(topo.neighbors(low).iter().all(|&m| m < 2 * N_DIR));
        assert_eq!(topo.neighbors(low).len(), 5);
    }
}

#[test]
fn test_every_bin_labeled() {
    init_logging();
    let axes = standard_axes();
    let values = sum_grids(&[
        bump(&axes, 0.1, 60.0, 2.0),
        bump(&axes, 0.2, 200.0, 1.0),
        jonswap(&axes, 0.15, 300.0),
    ]);
    let grid = label(values);
    let n_basins = grid.n_basins() as u32;
    assert!(n_basins >= 1);
    // Ids are creation order, so they are exactly 1..=n_basins.
    assert_eq!(grid.basin_ids(), (1..=n_basins).collect::<Vec<_>>());
    assert!(grid.labels().iter().all(|&l| l <= n_basins));
}

#[test]
fn test_single_peak_is_one_basin() {
    let axes = standard_axes();
    let grid = label(bump(&axes, 0.1, 90.0, 1.0));
    assert_eq!(grid.basin_ids(), vec![1]);
    assert_eq!(grid.count(1), axes.shape().n_bins());
}

#[test]
fn test_jonswap_is_one_basin() {
    let axes = standard_axes();
    let grid = label(jonswap(&axes, 0.15, 270.0));
    assert_eq!(grid.n_basins(), 1);
    assert_eq!(grid.n_unresolved(), 0);
}

#[test]
fn test_peak_on_direction_seam_is_one_basin() {
    let axes = standard_axes();
    let grid = label(bump(&axes, 0.1, 0.0, 1.0));
    assert_eq!(grid.n_basins(), 1);
}

#[test]
fn test_two_systems_give_two_basins() {
    let axes = standard_axes();
    let values = sum_grids(&[bump(&axes, 0.1, 60.0, 2.0), bump(&axes, 0.1, 240.0, 1.0)]);
    let shape = axes.shape();
    let grid = label(values);

    assert_eq!(grid.n_basins(), 2);
    assert_eq!(grid.n_unresolved(), 0);
    let a = grid.get(shape_row(0.1), 4);
    let b = grid.get(shape_row(0.1), 16);
    assert_ne!(a, b);
    assert!(a > 0 && b > 0);
    assert_eq!(basin_sizes(&grid).iter().sum::<usize>(), shape.n_bins());
}

#[test]
fn test_three_and_four_systems() {
    let axes = standard_axes();
    let three = sum_grids(&[
        bump(&axes, 0.1, 0.0, 3.0),
        bump(&axes, 0.1, 120.0, 2.0),
        bump(&axes, 0.1, 240.0, 1.0),
    ]);
    assert_eq!(label(three).n_basins(), 3);

    let four = sum_grids(&[
        bump(&axes, 0.1, 0.0, 4.0),
        bump(&axes, 0.1, 90.0, 3.0),
        bump(&axes, 0.1, 180.0, 2.0),
        bump(&axes, 0.1, 270.0, 1.0),
    ]);
    assert_eq!(label(four).n_basins(), 4);
}

#[test]
fn test_regions_invariant_under_direction_rotation() {
    let axes = standard_axes();
    let values = sum_grids(&[bump(&axes, 0.1, 60.0, 2.0), bump(&axes, 0.1, 240.0, 1.0)]);
    let reference = basin_sizes(&label(values.clone()));
    for k in [3, 7] {
        assert_eq!(basin_sizes(&label(rotate(&values, k))), reference, "shift {k}");
    }
}

#[test]
fn test_coarse_quantization_keeps_basin_count() {
    let axes = standard_axes();
    let topo = NeighborTopology::build(axes.shape());
    let values = sum_grids(&[bump(&axes, 0.1, 60.0, 2.0), bump(&axes, 0.1, 240.0, 1.0)]);
    let spectrum = spectrum(&axes, values);

    for levels in [10, 50, 200] {
        let labeler = WatershedLabeler::new(WatershedConfig::default().with_max_levels(levels))
            .unwrap();
        let grid = labeler.label(&spectrum, &topo).unwrap();
        assert_eq!(grid.n_basins(), 2, "max_levels {levels}");
    }
}

#[test]
fn test_labeling_is_deterministic() {
    let axes = standard_axes();
    let values = sum_grids(&[bump(&axes, 0.08, 30.0, 1.0), jonswap(&axes, 0.2, 200.0)]);
    assert_eq!(label(values.clone()), label(values));
}

#[test]
fn test_constant_and_zero_spectra() {
    let axes = standard_axes();
    let n = axes.shape().n_bins();
    assert_eq!(label(vec![0.7; n]).basin_ids(), vec![1]);

    let topo = NeighborTopology::build(axes.shape());
    let grid = WatershedLabeler::default()
        .label(&Spectrum::zeros(axes.shape()), &topo)
        .unwrap();
    assert_eq!(grid.count(1), n);
}

#[test]
fn test_cache_shares_topology_between_shapes() {
    let mut cache = TopologyCache::new();
    let a = SpectralShape::new(N_FREQ, N_DIR).unwrap();
    let b = SpectralShape::new(N_FREQ, 36).unwrap();
    let t1 = cache.get_or_build(a);
    let t2 = cache.get_or_build(b);
    let t3 = cache.get_or_build(a);
    assert_eq!(cache.len(), 2);
    assert!(std::sync::Arc::ptr_eq(&t1, &t3));
    assert_eq!(t2.shape(), b);
}

/// Frequency row closest to `f` on the standard axes.
fn shape_row(f: f64) -> usize {
    standard_axes()
        .freq()
        .iter()
        .enumerate()
        .min_by(|a, b| (a.1 - f).abs().total_cmp(&(b.1 - f).abs()))
        .map(|(i, _)| i)
        .unwrap()
}
