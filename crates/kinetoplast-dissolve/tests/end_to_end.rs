use kinetoplast_dissolve::{average_runs, Dissolution, DissolutionConfig};
use kinetoplast_graph::{compile, CompileOptions, NetworkTemplate};
use kinetoplast_lattice::{Dims, Lattice, LatticeConfig, SaturationMode, Topology};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn random_template(seed: u64) -> NetworkTemplate {
    let config = LatticeConfig {
        topology: Topology::Random,
        dims: Dims::planar(6, 6),
        flag_boundary: true,
        ..Default::default()
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let mut lattice = Lattice::build(config, &mut rng).unwrap();
    lattice
        .super_saturate_boundary(2, SaturationMode::Random, &mut rng)
        .unwrap();
    lattice.add_maxi_fields(2.5, 3, &mut rng).unwrap();
    let options = CompileOptions {
        ringed: true,
        ..Default::default()
    };
    compile(lattice, &options, &mut rng).unwrap()
}

#[test]
fn restored_template_replays_identically() {
    let template = random_template(11);
    let json = serde_json::to_string(&template).unwrap();
    let restored: NetworkTemplate = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, template);

    let config = DissolutionConfig {
        batch_size: 3,
        track_boundary: true,
        seed: 5,
        ..Default::default()
    };
    let original = Dissolution::new(&template, config).unwrap().run();
    let replayed = Dissolution::new(&restored, config).unwrap().run();
    assert_eq!(original, replayed);
}

#[test]
fn rectangular_grid_dissolves_to_singletons() {
    let config = LatticeConfig {
        topology: Topology::Rectangular,
        dims: Dims::planar(4, 4),
        ..Default::default()
    };
    let mut rng = StdRng::seed_from_u64(0);
    let lattice = Lattice::build(config, &mut rng).unwrap();
    let template = compile(lattice, &CompileOptions::default(), &mut rng).unwrap();

    let steps = Dissolution::new(&template, DissolutionConfig::default())
        .unwrap()
        .run();
    assert_eq!(steps[0].snapshot.components, vec![(16, 1)]);
    assert!((9..=16).contains(&steps.len()));
    assert!(steps.last().unwrap().snapshot.largest() <= 1);
    assert!(steps
        .windows(2)
        .all(|pair| pair[0].dissolutions <= pair[1].dissolutions));
}

#[test]
fn trials_share_one_template() {
    let template = random_template(3);
    let runs: Vec<_> = (0..4)
        .map(|seed| {
            let config = DissolutionConfig {
                seed,
                ..Default::default()
            };
            Dissolution::new(&template, config).unwrap().run()
        })
        .collect();
    let shortest = runs.iter().map(Vec::len).min().unwrap();

    let averaged = average_runs(&runs, 1);
    assert_eq!(averaged.len(), shortest);
    assert_eq!(averaged[0].dissolutions, 0);
    let first_largest = runs.iter().map(|run| run[0].snapshot.largest() as f64).sum::<f64>() / 4.0;
    assert!((averaged[0].sizes[0] - first_largest).abs() < 1e-12);
}
