//! Error types for kinetoplast-dissolve.

use thiserror::Error;

/// Result type for dissolution runs.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Each step must remove at least one node.
    #[error("batch size must be at least 1")]
    ZeroBatch,
}
