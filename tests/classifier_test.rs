//! End-to-end tests of the per-spectrum pipeline: watershed, splitting and
//! wind-sea / swell classification.

mod common;

use common::*;
use specpart_rs::{
    ClassifierConfig, Depth, LabelGrid, NeighborTopology, PartitionClassifier, PartitionConfig,
    PartitionStack, SpectralAxes, SpectralPartitioner, WindForcing,
};

fn deep() -> Depth {
    Depth::try_new(1000.0).unwrap()
}

fn partition(axes: &SpectralAxes, values: Vec<f64>, wind: WindForcing) -> PartitionStack {
    init_logging();
    let topo = NeighborTopology::build(axes.shape());
    SpectralPartitioner::default()
        .partition(&spectrum(axes, values), axes, &topo, wind, deep())
        .unwrap()
}

fn assert_close(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol * b.abs().max(1.0), "{a} != {b}");
}

#[test]
fn test_single_swell_fills_first_slot() {
    let axes = standard_axes();
    let values = bump(&axes, 0.1, 90.0, 1.0);
    let total: f64 = values.iter().sum();
    let stack = partition(&axes, values.clone(), WindForcing::CALM);

    assert_eq!(stack.len(), 4);
    assert!(stack.wind_sea().is_empty());
    assert_eq!(stack.swells()[0].values(), values.as_slice());
    assert!(stack.swells()[1].is_empty() && stack.swells()[2].is_empty());
    assert_close(stack.total(), total, 1e-12);
    assert_close(stack.swells()[0].hs(), 6.1446, 1e-3);
}

#[test]
fn test_two_swells_ranked_by_hs() {
    let axes = standard_axes();
    let values = sum_grids(&[bump(&axes, 0.1, 60.0, 2.0), bump(&axes, 0.1, 240.0, 1.0)]);
    let total: f64 = values.iter().sum();
    let stack = partition(&axes, values, WindForcing::CALM);

    let hs = stack.hs();
    assert_eq!(hs[0], 0.0);
    assert!(hs[1] > hs[2] && hs[2] > 0.0, "{hs:?}");
    assert_eq!(hs[3], 0.0);
    assert_close(hs[1], 8.6889, 1e-3);
    assert_close(hs[2], 6.1458, 1e-3);

    // The strongest system's peak sits in the first swell slot.
    let peak = axes.shape().bin(11, 4);
    assert!(stack.swells()[0].values()[peak] > 0.0);
    assert_eq!(stack.swells()[1].values()[peak], 0.0);
    assert_close(stack.total(), total, 1e-12);
}

#[test]
fn test_wind_sea_and_swell_separated() {
    let axes = standard_axes();
    let wind_sea = gaussian_bump(&axes, 0.25, 270.0, 1.0, 0.03, 30.0);
    let swell = gaussian_bump(&axes, 0.08, 90.0, 2.0, 0.01, 25.0);
    let values = sum_grids(&[wind_sea, swell]);
    let wind = WindForcing::try_new(15.0, 270.0).unwrap();
    let stack = partition(&axes, values, wind);

    let hs = stack.hs();
    assert_close(hs[0], 9.5192, 1e-3);
    assert_close(hs[1], 7.0952, 1e-3);
    assert_eq!(&hs[2..], &[0.0, 0.0]);

    let shape = axes.shape();
    // Wind-sea peak near (0.25 Hz, 270°), swell peak near (0.08 Hz, 90°).
    assert!(stack.wind_sea().values()[shape.bin(21, 18)] > 0.0);
    assert!(stack.swells()[0].values()[shape.bin(9, 6)] > 0.0);
}

#[test]
fn test_jonswap_wind_sea_depends_on_wind_direction() {
    let axes = standard_axes();
    let values = jonswap(&axes, 0.15, 270.0);

    let aligned = partition(&axes, values.clone(), WindForcing::try_new(12.0, 270.0).unwrap());
    assert!(!aligned.wind_sea().is_empty());
    assert!(aligned.swells().iter().all(|p| p.is_empty()));
    assert_close(aligned.wind_sea().hs(), 2.196, 1e-3);

    let opposed = partition(&axes, values, WindForcing::try_new(12.0, 90.0).unwrap());
    assert!(opposed.wind_sea().is_empty());
    assert_close(opposed.swells()[0].hs(), 2.196, 1e-3);
}

#[test]
fn test_excess_systems_dropped() {
    let axes = standard_axes();
    let values = sum_grids(&[
        bump(&axes, 0.1, 0.0, 4.0),
        bump(&axes, 0.1, 90.0, 3.0),
        bump(&axes, 0.1, 180.0, 2.0),
        bump(&axes, 0.1, 270.0, 1.0),
    ]);
    let total: f64 = values.iter().sum();
    let stack = partition(&axes, values, WindForcing::CALM);

    assert_eq!(stack.len(), 4);
    let hs = stack.hs();
    assert!(hs[1] > hs[2] && hs[2] > hs[3] && hs[3] > 0.0, "{hs:?}");
    // The weakest system is not in the output.
    assert!(stack.total() < total);
    let weakest_peak = axes.shape().bin(11, 18);
    assert!(stack.iter().all(|p| p.values()[weakest_peak] == 0.0));
}

#[test]
fn test_stack_size_follows_config() {
    let axes = standard_axes();
    let topo = NeighborTopology::build(axes.shape());
    let values = sum_grids(&[bump(&axes, 0.1, 60.0, 2.0), bump(&axes, 0.1, 240.0, 1.0)]);
    let spectrum = spectrum(&axes, values);

    for swells in [0, 1, 2, 5] {
        let partitioner =
            SpectralPartitioner::new(&PartitionConfig::default().with_swells(swells)).unwrap();
        let stack = partitioner
            .partition(&spectrum, &axes, &topo, WindForcing::CALM, deep())
            .unwrap();
        assert_eq!(stack.len(), swells + 1);
    }
}

#[test]
fn test_merged_basin_split_at_frequency_valley() {
    let axes = standard_axes();
    let shape = axes.shape();
    let values = sum_grids(&[
        gaussian_bump(&axes, 0.07, 90.0, 2.0, 0.008, 30.0),
        gaussian_bump(&axes, 0.2, 90.0, 1.0, 0.02, 30.0),
    ]);
    let spectrum = spectrum(&axes, values);
    // One basin covering both systems.
    let labels = LabelGrid::from_labels(shape, vec![1; shape.n_bins()]).unwrap();

    let stack = PartitionClassifier::default()
        .classify(&spectrum, &axes, &labels, WindForcing::CALM, deep())
        .unwrap();
    let hs = stack.hs();
    assert_close(hs[1], 7.7724, 1e-3);
    assert_close(hs[2], 6.9518, 1e-3);
    assert_eq!(hs[3], 0.0);

    // Low-frequency rows go to one partition, high-frequency rows to the other.
    let low_row = shape.bin(8, 6);
    let high_row = shape.bin(20, 6);
    let (a, b) = (&stack.swells()[0], &stack.swells()[1]);
    assert!((a.values()[low_row] > 0.0) != (b.values()[low_row] > 0.0));
    assert!((a.values()[high_row] > 0.0) != (b.values()[high_row] > 0.0));
    assert!((a.values()[low_row] > 0.0) != (a.values()[high_row] > 0.0));

    let unsplit = PartitionClassifier::new(ClassifierConfig::default().with_split(false))
        .unwrap()
        .classify(&spectrum, &axes, &labels, WindForcing::CALM, deep())
        .unwrap();
    assert_close(unsplit.hs()[1], 10.4277, 1e-3);
    assert_eq!(unsplit.hs()[2], 0.0);
}

#[test]
fn test_shallow_water_turns_more_energy_into_wind_sea() {
    // Slower waves in shallow water are overtaken by weaker winds.
    let axes = standard_axes();
    let values = bump(&axes, 0.1, 90.0, 1.0);
    let topo = NeighborTopology::build(axes.shape());
    let spectrum = spectrum(&axes, values);
    let wind = WindForcing::try_new(8.0, 90.0).unwrap();
    let partitioner = SpectralPartitioner::default();

    let deep_stack = partitioner
        .partition(&spectrum, &axes, &topo, wind, deep())
        .unwrap();
    let shallow_stack = partitioner
        .partition(&spectrum, &axes, &topo, wind, Depth::try_new(2.0).unwrap())
        .unwrap();
    assert!(deep_stack.wind_sea().is_empty());
    assert!(!shallow_stack.wind_sea().is_empty());
}

#[test]
fn test_single_bump_on_36_by_24_grid() {
    init_logging();
    let axes = axes(36, 24);
    let shape = axes.shape();
    let peak = shape.bin(10, 5);
    let values = bump(&axes, axes.freq()[10], axes.dir()[5], 1.0);
    assert!(values.iter().all(|&v| v <= values[peak]));

    let topo = NeighborTopology::build(shape);
    let outcome = SpectralPartitioner::default()
        .partition_with_labels(
            &spectrum(&axes, values.clone()),
            &axes,
            &topo,
            WindForcing::CALM,
            deep(),
        )
        .unwrap();

    let labels = &outcome.labels;
    assert_eq!(labels.n_basins(), 1);
    let basin = labels.labels()[peak];
    assert_eq!(labels.count(basin) + labels.n_unresolved(), shape.n_bins());

    let stack = &outcome.stack;
    assert_eq!(stack.len(), 4);
    assert_eq!(stack.swells()[0].values(), values.as_slice());
    assert!(stack.wind_sea().is_empty());
    assert!(stack.swells()[1..].iter().all(|p| p.is_empty()));
}

#[test]
fn test_uniform_grid_under_strong_wind_is_all_wind_sea() {
    init_logging();
    let axes = axes(36, 24);
    let shape = axes.shape();
    let values = vec![1.0; shape.n_bins()];
    let topo = NeighborTopology::build(shape);
    let wind = WindForcing::try_new(200.0, 90.0).unwrap();

    let outcome = SpectralPartitioner::default()
        .partition_with_labels(&spectrum(&axes, values.clone()), &axes, &topo, wind, deep())
        .unwrap();

    assert_eq!(outcome.labels.basin_ids(), vec![1]);
    assert_eq!(outcome.labels.count(1), shape.n_bins());
    assert_eq!(outcome.stack.wind_sea().values(), values.as_slice());
    assert!(outcome.stack.swells().iter().all(|p| p.is_empty()));
}
