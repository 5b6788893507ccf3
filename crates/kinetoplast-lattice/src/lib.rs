//! Kinetoplast Lattice
//!
//! Spatial arrangements of circular (2D) and spherical (3D) probability
//! fields, the input to network compilation.
//!
//! # Topologies
//!
//! - **Random**: one uniformly placed point per unit cell, planar or spatial
//! - **Rectangular** and **triangular**: regular planar grids
//! - **Hexagonal**: a honeycomb of two interleaved triangular sub-lattices
//!   offset by `(s/2, sqrt(1/12) s)`
//! - **Graphite**: honeycomb planes stacked one spacing apart, every odd
//!   plane shifted by one sub-lattice offset
//!
//! # Boundary Stacks
//!
//! With boundary flagging on, points in outer-ring cells carry the cell's
//! [`BoundaryCellId`]. [`Lattice::super_saturate_boundary`] grows each of
//! those cells into a stack, either with exact copies of the representative
//! or with freshly scattered points, and [`Lattice::boundary_saturation`]
//! reports the stack height used for boundary-break tracking.
//!
//! # Maxi Fields
//!
//! [`Lattice::add_maxi_fields`] salts the domain with larger fields. They
//! join their nearest cell and never belong to a boundary stack.

mod error;
mod lattice;
mod point;
mod position;
mod topology;

pub use error::{Error, Result};
pub use lattice::Lattice;
pub use point::{BoundaryCellId, Point, PointIndex};
pub use position::{CellCoord, GridShape, Position};
pub use topology::{Dims, LatticeConfig, SaturationMode, Topology, ROW_PITCH, SUBLATTICE_RISE};
