//! Error types for the driver.

use thiserror::Error;

/// Result type for driver operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A configuration value that could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {variable}=`{value}`: {reason}")]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
    pub reason: String,
}

/// Errors that can stop a simulation.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad environment configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Lattice parameters rejected
    #[error("Lattice error: {0}")]
    Lattice(#[from] kinetoplast_lattice::Error),

    /// Graph compilation failed
    #[error("Compile error: {0}")]
    Compile(#[from] kinetoplast_graph::Error),

    /// Dissolution parameters rejected
    #[error("Dissolution error: {0}")]
    Dissolve(#[from] kinetoplast_dissolve::Error),

    /// Template serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A trial task panicked or was cancelled
    #[error("Trial failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
