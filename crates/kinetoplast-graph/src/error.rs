//! Error types for kinetoplast-graph.

use thiserror::Error;

/// Result type for graph compilation.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Node ids are 32-bit.
    #[error("lattice holds {0} points, more than a graph can index")]
    TooManyNodes(usize),
}
