//! Template preparation and parallel trials.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use kinetoplast_dissolve::{average_runs, AveragedStep, Dissolution, DissolutionStep};
use kinetoplast_graph::{compile, NetworkTemplate};
use kinetoplast_lattice::Lattice;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::error::Result;

/// Build the network described by `config`, seeded from `config.seed`.
pub fn build_template(config: &SimulationConfig) -> Result<NetworkTemplate> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut lattice = Lattice::build(config.lattice(), &mut rng)?;
    if config.saturation > 0 {
        lattice.super_saturate_boundary(config.saturation, config.saturation_mode, &mut rng)?;
    }
    if config.maxi_count > 0 {
        lattice.add_maxi_fields(config.maxi_radius, config.maxi_count, &mut rng)?;
    }
    Ok(compile(lattice, &config.compile_options(), &mut rng)?)
}

pub fn load_template(path: &Path) -> Result<NetworkTemplate> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

pub fn save_template(template: &NetworkTemplate, path: &Path) -> Result<()> {
    std::fs::write(path, serde_json::to_string(template)?)?;
    Ok(())
}

/// Reuse the template at `config.template` if present, else build and save it.
pub fn prepare_template(config: &SimulationConfig) -> Result<NetworkTemplate> {
    match &config.template {
        Some(path) if path.exists() => {
            info!("Loading template from {}", path.display());
            load_template(path)
        }
        Some(path) => {
            let template = build_template(config)?;
            save_template(&template, path)?;
            info!("Saved template to {}", path.display());
            Ok(template)
        }
        None => build_template(config),
    }
}

/// Run every trial on the blocking pool.
pub async fn run_trials(
    template: Arc<NetworkTemplate>,
    config: &SimulationConfig,
) -> Result<Vec<Vec<DissolutionStep>>> {
    // Reject bad run parameters before spawning anything.
    Dissolution::new(&template, config.dissolution(0))?;

    let handles: Vec<_> = (0..config.trials)
        .map(|trial| {
            let template = Arc::clone(&template);
            let run_config = config.dissolution(trial);
            tokio::task::spawn_blocking(move || {
                let start = Instant::now();
                let steps = Dissolution::new(&template, run_config).map(Dissolution::run);
                debug!("Trial {} finished in {:?}", trial, start.elapsed());
                steps
            })
        })
        .collect();

    let mut runs = Vec::with_capacity(handles.len());
    for (trial, handle) in handles.into_iter().enumerate() {
        let steps = handle.await??;
        if let Some(last) = steps.last() {
            info!(
                "Trial {}: {} steps, {} dissolutions, largest component {}",
                trial,
                steps.len(),
                last.dissolutions,
                last.snapshot.largest()
            );
        }
        runs.push(steps);
    }
    Ok(runs)
}

/// Prepare the template, run all trials and average them.
pub async fn simulate(config: &SimulationConfig) -> Result<Vec<AveragedStep>> {
    let template = Arc::new(prepare_template(config)?);
    let runs = run_trials(template, config).await?;
    Ok(average_runs(&runs, config.min_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinetoplast_lattice::{Dims, Topology};

    fn small() -> SimulationConfig {
        SimulationConfig {
            topology: Topology::Rectangular,
            dims: Dims::planar(4, 4),
            trials: 3,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn averages_all_trials() {
        let averaged = simulate(&small()).await.unwrap();
        assert!(!averaged.is_empty());
        assert_eq!(averaged[0].dissolutions, 0);
        assert_eq!(averaged[0].sizes, vec![16.0]);
    }

    #[tokio::test]
    async fn template_is_saved_then_reused() {
        let dir = tempfile::tempdir().unwrap();
        let config = SimulationConfig {
            template: Some(dir.path().join("network.json")),
            saturation: 1,
            ringed: true,
            ..small()
        };
        let first = prepare_template(&config).unwrap();
        assert!(dir.path().join("network.json").exists());
        let second = prepare_template(&config).unwrap();
        assert_eq!(first.graph(), second.graph());

        let a = simulate(&config).await.unwrap();
        let b = simulate(&config).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn bad_batch_is_reported() {
        let config = SimulationConfig {
            batch_size: 0,
            ..small()
        };
        let err = simulate(&config).await.unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Dissolve(kinetoplast_dissolve::Error::ZeroBatch)
        ));
    }
}
