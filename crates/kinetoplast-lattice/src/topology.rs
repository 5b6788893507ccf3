//! Lattice topologies and build configuration.

use crate::position::GridShape;
use crate::{Error, Result};

/// sqrt(3) / 2: row pitch of a triangular lattice in units of spacing.
pub const ROW_PITCH: f64 = 0.866_025_403_784_438_6;

/// sqrt(1/12): vertical offset of the second hexagonal sub-lattice in units of spacing.
pub const SUBLATTICE_RISE: f64 = 0.288_675_134_594_812_9;

/// Arrangement of field centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topology {
    /// One uniformly placed point per unit cell, 2D or 3D.
    #[default]
    Random,
    /// Square grid.
    Rectangular,
    /// Rows offset by half a spacing on alternate rows.
    Triangular,
    /// Honeycomb built from two interleaved triangular sub-lattices.
    Hexagonal,
    /// Stacked honeycomb planes, alternate planes shifted.
    Graphite,
}

impl Topology {
    /// Deterministic topologies link by exact lattice geometry.
    pub const fn is_deterministic(&self) -> bool {
        !matches!(self, Topology::Random)
    }

    /// Topologies whose rows interleave two sub-lattices.
    pub const fn is_honeycomb(&self) -> bool {
        matches!(self, Topology::Hexagonal | Topology::Graphite)
    }

    /// Topologies restricted to a single plane.
    pub const fn is_planar(&self) -> bool {
        matches!(
            self,
            Topology::Rectangular | Topology::Triangular | Topology::Hexagonal
        )
    }

    /// Nearest-neighbor separation for deterministic topologies.
    pub fn bond_length(&self, spacing: f64) -> Option<f64> {
        match self {
            Topology::Random => None,
            Topology::Rectangular | Topology::Triangular => Some(spacing),
            Topology::Hexagonal | Topology::Graphite => Some(spacing / 3f64.sqrt()),
        }
    }

    /// How many columns deep the boundary ring is on the left and right edges.
    pub const fn boundary_depth(&self) -> usize {
        if self.is_honeycomb() {
            2
        } else {
            1
        }
    }
}

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Topology::Random => "random",
            Topology::Rectangular => "rectangular",
            Topology::Triangular => "triangular",
            Topology::Hexagonal => "hexagonal",
            Topology::Graphite => "graphite",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Topology {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(Topology::Random),
            "rectangular" | "rect" => Ok(Topology::Rectangular),
            "triangular" | "tri" => Ok(Topology::Triangular),
            "hexagonal" | "hex" => Ok(Topology::Hexagonal),
            "graphite" => Ok(Topology::Graphite),
            other => Err(format!("unknown topology `{other}`")),
        }
    }
}

/// Requested lattice extent along each axis.
///
/// For random, rectangular and triangular lattices this is the number of
/// cells. For honeycomb lattices `x` and `y` count sub-lattice points and
/// must be even; each row then holds `x - 1` cells and there are `y / 2` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dims {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Dims {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    pub const fn planar(x: usize, y: usize) -> Self {
        Self { x, y, z: 1 }
    }
}

impl Default for Dims {
    fn default() -> Self {
        Self::planar(10, 10)
    }
}

/// Parameters for [`crate::Lattice::build`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeConfig {
    pub topology: Topology,
    pub dims: Dims,
    /// Cell side for random lattices, point spacing for the rest.
    pub spacing: f64,
    /// Field radius of every standard point.
    pub radius: f64,
    /// Tag points in outer-ring cells with a boundary-cell id.
    pub flag_boundary: bool,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            topology: Topology::Random,
            dims: Dims::default(),
            spacing: 1.0,
            radius: 1.0,
            flag_boundary: false,
        }
    }
}

impl LatticeConfig {
    /// Check every parameter, returning the cell grid the build will fill.
    pub fn validate(&self) -> Result<GridShape> {
        let Dims { x, y, z } = self.dims;
        for (axis, value) in [("x", x), ("y", y), ("z", z)] {
            if value == 0 {
                return Err(Error::ZeroDimension { axis });
            }
        }
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(Error::InvalidSpacing(self.spacing));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(Error::InvalidRadius(self.radius));
        }
        if self.topology.is_planar() && z > 1 {
            return Err(Error::PlanarDepth {
                topology: self.topology,
                depth: z,
            });
        }
        if self.topology.is_honeycomb() {
            for (axis, value) in [("x", x), ("y", y)] {
                if value % 2 != 0 {
                    return Err(Error::OddHexDimension { axis, value });
                }
            }
            return Ok(GridShape::new(x - 1, y / 2, z));
        }
        Ok(GridShape::new(x, y, z))
    }
}

/// How [`crate::Lattice::super_saturate_boundary`] places extra points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SaturationMode {
    /// Independent uniform points inside each boundary cell.
    Random,
    /// Exact copies of each boundary cell's representative point.
    #[default]
    Stacked,
}

impl std::fmt::Display for SaturationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaturationMode::Random => f.write_str("random"),
            SaturationMode::Stacked => f.write_str("stacked"),
        }
    }
}

impl std::str::FromStr for SaturationMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(SaturationMode::Random),
            "stacked" => Ok(SaturationMode::Stacked),
            other => Err(format!("unknown saturation mode `{other}`")),
        }
    }
}
