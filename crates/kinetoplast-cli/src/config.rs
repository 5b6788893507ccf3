//! Simulation settings read from `KINETOPLAST_*` environment variables.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use kinetoplast_dissolve::DissolutionConfig;
use kinetoplast_graph::CompileOptions;
use kinetoplast_lattice::{Dims, LatticeConfig, SaturationMode, Topology};

use crate::error::ConfigError;

/// Everything one invocation needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub topology: Topology,
    pub dims: Dims,
    pub spacing: f64,
    pub radius: f64,
    /// Extra points stacked on each boundary cell; zero leaves the boundary bare.
    pub saturation: u32,
    pub saturation_mode: SaturationMode,
    pub ringed: bool,
    pub maxi_radius: f64,
    pub maxi_count: usize,
    pub batch_size: usize,
    pub size_threshold: usize,
    pub track_boundary: bool,
    pub trials: usize,
    pub seed: u64,
    /// Components below this size are left out of the averaged series.
    pub min_size: usize,
    /// Load the template from here if it exists, otherwise save it here.
    pub template: Option<PathBuf>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            topology: Topology::Random,
            dims: Dims::default(),
            spacing: 1.0,
            radius: 1.0,
            saturation: 0,
            saturation_mode: SaturationMode::Stacked,
            ringed: false,
            maxi_radius: 3.0,
            maxi_count: 0,
            batch_size: 1,
            size_threshold: 1,
            track_boundary: false,
            trials: 1,
            seed: 42,
            min_size: 1,
            template: None,
        }
    }
}

impl SimulationConfig {
    /// Create config from environment variables, defaulting anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let read = |key: &'static str| lookup(key).filter(|value| !value.trim().is_empty());

        let dims = match read("KINETOPLAST_DIMS") {
            Some(value) => parse_dims("KINETOPLAST_DIMS", &value)?,
            None => defaults.dims,
        };

        let config = Self {
            topology: parse(read("KINETOPLAST_TOPOLOGY"), "KINETOPLAST_TOPOLOGY", defaults.topology)?,
            dims,
            spacing: parse(read("KINETOPLAST_SPACING"), "KINETOPLAST_SPACING", defaults.spacing)?,
            radius: parse(read("KINETOPLAST_RADIUS"), "KINETOPLAST_RADIUS", defaults.radius)?,
            saturation: parse(
                read("KINETOPLAST_SATURATION"),
                "KINETOPLAST_SATURATION",
                defaults.saturation,
            )?,
            saturation_mode: parse(
                read("KINETOPLAST_SATURATION_MODE"),
                "KINETOPLAST_SATURATION_MODE",
                defaults.saturation_mode,
            )?,
            ringed: parse(read("KINETOPLAST_RINGED"), "KINETOPLAST_RINGED", defaults.ringed)?,
            maxi_radius: parse(
                read("KINETOPLAST_MAXI_RADIUS"),
                "KINETOPLAST_MAXI_RADIUS",
                defaults.maxi_radius,
            )?,
            maxi_count: parse(
                read("KINETOPLAST_MAXI_COUNT"),
                "KINETOPLAST_MAXI_COUNT",
                defaults.maxi_count,
            )?,
            batch_size: parse(
                read("KINETOPLAST_BATCH_SIZE"),
                "KINETOPLAST_BATCH_SIZE",
                defaults.batch_size,
            )?,
            size_threshold: parse(
                read("KINETOPLAST_THRESHOLD"),
                "KINETOPLAST_THRESHOLD",
                defaults.size_threshold,
            )?,
            track_boundary: parse(
                read("KINETOPLAST_TRACK_BOUNDARY"),
                "KINETOPLAST_TRACK_BOUNDARY",
                defaults.track_boundary,
            )?,
            trials: parse(read("KINETOPLAST_TRIALS"), "KINETOPLAST_TRIALS", defaults.trials)?,
            seed: parse(read("KINETOPLAST_SEED"), "KINETOPLAST_SEED", defaults.seed)?,
            min_size: parse(read("KINETOPLAST_MIN_SIZE"), "KINETOPLAST_MIN_SIZE", defaults.min_size)?,
            template: read("KINETOPLAST_TEMPLATE").map(PathBuf::from),
        };

        if config.trials == 0 {
            return Err(ConfigError {
                variable: "KINETOPLAST_TRIALS",
                value: "0".into(),
                reason: "at least one trial is required".into(),
            });
        }
        Ok(config)
    }

    /// Boundary ids are needed by saturation, ring links and break tracking.
    pub fn flags_boundary(&self) -> bool {
        self.saturation > 0 || self.ringed || self.track_boundary
    }

    pub fn lattice(&self) -> LatticeConfig {
        LatticeConfig {
            topology: self.topology,
            dims: self.dims,
            spacing: self.spacing,
            radius: self.radius,
            flag_boundary: self.flags_boundary(),
        }
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            ringed: self.ringed,
            ..Default::default()
        }
    }

    /// Run parameters for trial `trial`, seeded `seed + trial`.
    pub fn dissolution(&self, trial: usize) -> DissolutionConfig {
        DissolutionConfig {
            batch_size: self.batch_size,
            size_threshold: self.size_threshold,
            track_boundary: self.track_boundary,
            seed: self.seed.wrapping_add(trial as u64),
        }
    }
}

fn parse<T>(value: Option<String>, variable: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match value {
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError {
            variable,
            reason: e.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

/// `X`, `XxY` or `XxYxZ`; missing axes default to 1.
fn parse_dims(variable: &'static str, value: &str) -> Result<Dims, ConfigError> {
    let invalid = |reason: String| ConfigError {
        variable,
        value: value.to_string(),
        reason,
    };
    let axes = value
        .split(['x', 'X', ','])
        .map(|axis| axis.trim().parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| invalid(e.to_string()))?;
    match axes.as_slice() {
        [x] => Ok(Dims::new(*x, 1, 1)),
        [x, y] => Ok(Dims::new(*x, *y, 1)),
        [x, y, z] => Ok(Dims::new(*x, *y, *z)),
        _ => Err(invalid("expected up to three axes".into())),
    }
}
