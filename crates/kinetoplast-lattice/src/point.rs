//! Field points.

use crate::position::Position;

/// Index of a point in the lattice arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointIndex(pub u32);

impl PointIndex {
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Identifier shared by every point of one boundary stack.
///
/// Equal to the linear index of the boundary cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryCellId(pub u32);

impl std::fmt::Display for BoundaryCellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "boundary#{}", self.0)
    }
}

/// One probability field.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub center: Position,
    pub radius: f64,
    /// Present iff the point sits in a flagged boundary cell.
    pub boundary: Option<BoundaryCellId>,
    /// The point this one is an exact copy of.
    pub stacked_on: Option<PointIndex>,
}

impl Point {
    /// A standalone point with no boundary membership.
    pub const fn new(center: Position, radius: f64) -> Self {
        Self {
            center,
            radius,
            boundary: None,
            stacked_on: None,
        }
    }

    pub fn with_boundary(mut self, id: BoundaryCellId) -> Self {
        self.boundary = Some(id);
        self
    }

    pub const fn is_boundary(&self) -> bool {
        self.boundary.is_some()
    }

    pub const fn is_stacked(&self) -> bool {
        self.stacked_on.is_some()
    }
}
