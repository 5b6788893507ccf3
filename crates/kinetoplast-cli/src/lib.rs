//! Kinetoplast CLI
//!
//! Environment-driven driver: builds (or restores) a network template,
//! runs dissolution trials in parallel and averages the results.

pub mod config;
pub mod error;
pub mod simulation;

pub use config::SimulationConfig;
pub use error::{ConfigError, Error, Result};
pub use simulation::{build_template, prepare_template, run_trials, simulate};
