//! Benchmarks for graph compilation
//!
//! Measures performance of:
//! - Overlap compilation of random lattices (pair evaluation dominated)
//! - Contact compilation of regular lattices
//! - Stacked boundary expansion

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kinetoplast_graph::{compile, CompileOptions};
use kinetoplast_lattice::{Dims, Lattice, LatticeConfig, SaturationMode, Topology};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn lattice(topology: Topology, side: usize, saturation: u32) -> Lattice {
    let config = LatticeConfig {
        topology,
        dims: Dims::planar(side, side),
        spacing: 1.0,
        radius: 1.0,
        flag_boundary: saturation > 0,
    };
    let mut rng = StdRng::seed_from_u64(42);
    let mut lattice = Lattice::build(config, &mut rng).unwrap();
    if saturation > 0 {
        lattice
            .super_saturate_boundary(saturation, SaturationMode::Stacked, &mut rng)
            .unwrap();
    }
    lattice
}

/// Benchmark overlap compilation of random lattices
fn bench_overlap(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_overlap");
    group.sample_size(10);

    for &side in &[8usize, 16, 32] {
        let lattice = lattice(Topology::Random, side, 0);
        group.throughput(Throughput::Elements((side * side) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(side), &lattice, |b, lattice| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| compile(lattice.clone(), &CompileOptions::default(), &mut rng))
        });
    }
    group.finish();
}

/// Benchmark contact compilation of regular lattices
fn bench_contact(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_contact");

    for topology in [Topology::Rectangular, Topology::Triangular, Topology::Hexagonal] {
        for &side in &[32usize, 128] {
            let lattice = lattice(topology, side, 0);
            group.bench_with_input(
                BenchmarkId::new(topology.to_string(), side),
                &lattice,
                |b, lattice| {
                    let mut rng = StdRng::seed_from_u64(7);
                    b.iter(|| compile(lattice.clone(), &CompileOptions::default(), &mut rng))
                },
            );
        }
    }
    group.finish();
}

/// Benchmark compilation with stacked boundaries, plain and ringed
fn bench_saturated(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_saturated");

    for &saturation in &[1u32, 8, 32] {
        let lattice = lattice(Topology::Rectangular, 64, saturation);
        for ringed in [false, true] {
            let options = CompileOptions { rule: None, ringed };
            let name = if ringed { "ringed" } else { "plain" };
            group.bench_with_input(BenchmarkId::new(name, saturation), &lattice, |b, lattice| {
                let mut rng = StdRng::seed_from_u64(7);
                b.iter(|| compile(lattice.clone(), &options, &mut rng))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_overlap, bench_contact, bench_saturated);
criterion_main!(benches);
