//! Benchmarks for lattice construction
//!
//! Measures performance of:
//! - Building each topology at increasing sizes
//! - Stacked boundary saturation
//! - Maxi field placement (nearest-point scan on honeycomb lattices)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kinetoplast_lattice::{Dims, Lattice, LatticeConfig, SaturationMode, Topology};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn config(topology: Topology, side: usize) -> LatticeConfig {
    LatticeConfig {
        topology,
        dims: Dims::planar(side, side),
        spacing: 1.0,
        radius: 1.0,
        flag_boundary: true,
    }
}

/// Benchmark building planar lattices of each topology
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for topology in [Topology::Random, Topology::Rectangular, Topology::Triangular, Topology::Hexagonal] {
        for &side in &[16usize, 64, 256] {
            group.throughput(Throughput::Elements((side * side) as u64));
            group.bench_with_input(
                BenchmarkId::new(topology.to_string(), side),
                &side,
                |b, &side| {
                    let mut rng = StdRng::seed_from_u64(42);
                    b.iter(|| Lattice::build(black_box(config(topology, side)), &mut rng))
                },
            );
        }
    }
    group.finish();
}

/// Benchmark stacked boundary saturation
fn bench_saturate(c: &mut Criterion) {
    let mut group = c.benchmark_group("super_saturate_boundary");
    let mut rng = StdRng::seed_from_u64(42);

    for &extra in &[1u32, 4, 16] {
        let lattice = Lattice::build(config(Topology::Rectangular, 128), &mut rng).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(extra), &extra, |b, &extra| {
            b.iter(|| {
                let mut lattice = lattice.clone();
                lattice
                    .super_saturate_boundary(black_box(extra), SaturationMode::Stacked, &mut rng)
                    .unwrap();
                lattice
            })
        });
    }
    group.finish();
}

/// Benchmark maxi field placement
fn bench_maxi_fields(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_maxi_fields");
    let mut rng = StdRng::seed_from_u64(42);

    for topology in [Topology::Rectangular, Topology::Hexagonal] {
        let lattice = Lattice::build(config(topology, 64), &mut rng).unwrap();
        group.bench_function(topology.to_string(), |b| {
            b.iter(|| {
                let mut lattice = lattice.clone();
                lattice.add_maxi_fields(4.0, black_box(32), &mut rng).unwrap();
                lattice
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_saturate, bench_maxi_fields);
criterion_main!(benches);
