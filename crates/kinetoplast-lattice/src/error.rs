//! Error types for kinetoplast-lattice.

use thiserror::Error;

use crate::{SaturationMode, Topology};

/// Result type for lattice construction.
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration errors raised before any point is placed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A dimension was zero.
    #[error("dimension `{axis}` must be at least 1")]
    ZeroDimension { axis: &'static str },

    /// Spacing must be finite and positive.
    #[error("spacing must be positive and finite, got {0}")]
    InvalidSpacing(f64),

    /// Field radius must be finite and positive.
    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    /// Hexagonal lattices pair two sub-lattices per row and need even counts.
    #[error("hexagonal dimension `{axis}` must be even, got {value}")]
    OddHexDimension { axis: &'static str, value: usize },

    /// A planar topology was given more than one plane.
    #[error("{topology} lattices are planar, got depth {depth}")]
    PlanarDepth { topology: Topology, depth: usize },

    /// Boundary saturation needs boundary cells to have been flagged at build time.
    #[error("boundary saturation requires a lattice built with boundary flagging")]
    BoundaryNotFlagged,

    /// Saturating with zero extra points would leave the registry start below zero.
    #[error("boundary saturation must add at least one point per cell")]
    ZeroSaturation,

    /// Scattered saturation only makes sense where cells are axis-aligned boxes.
    #[error("{mode} saturation is not supported on {topology} lattices")]
    UnsupportedSaturation {
        topology: Topology,
        mode: SaturationMode,
    },
}
