//! Continuous positions and discrete cell coordinates.
//!
//! Every field center is a [`Position`] in three components; planar lattices
//! keep `z = 0`. Cells are addressed by a [`CellCoord`] of column, row and
//! plane, and a [`GridShape`] maps those onto a dense linear index.

use std::ops::{Add, Neg, Sub};

/// A field center in Euclidean space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    /// Origin of the coordinate system.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    /// Create a new position.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create a planar position (z = 0).
    pub const fn planar(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Euclidean distance between two positions.
    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).norm()
    }

    /// Distance ignoring the z component.
    pub fn planar_distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Length of the position vector.
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// True when every component is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Position {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Position {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Neg for Position {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }
}

/// Column, row and plane of a lattice cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoord {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl CellCoord {
    /// First cell of the lattice.
    pub const ORIGIN: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a new cell coordinate.
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Create a planar cell coordinate (z = 0).
    pub const fn planar(x: usize, y: usize) -> Self {
        Self { x, y, z: 0 }
    }

    /// Shift by a signed offset, returning `None` on underflow.
    ///
    /// Upper bounds are checked by [`GridShape::contains`].
    pub fn offset(&self, dx: i64, dy: i64, dz: i64) -> Option<Self> {
        Some(Self {
            x: shift(self.x, dx)?,
            y: shift(self.y, dy)?,
            z: shift(self.z, dz)?,
        })
    }
}

fn shift(value: usize, delta: i64) -> Option<usize> {
    let shifted = i64::try_from(value).ok()?.checked_add(delta)?;
    usize::try_from(shifted).ok()
}

impl std::fmt::Display for CellCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

/// Extent of the cell grid: columns per row, rows per plane, planes.
///
/// Linear cell indices run x fastest, then y, then z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridShape {
    pub columns: usize,
    pub rows: usize,
    pub planes: usize,
}

impl GridShape {
    pub const fn new(columns: usize, rows: usize, planes: usize) -> Self {
        Self {
            columns,
            rows,
            planes,
        }
    }

    /// Total number of cells.
    pub const fn cell_count(&self) -> usize {
        self.columns * self.rows * self.planes
    }

    pub const fn contains(&self, coord: CellCoord) -> bool {
        coord.x < self.columns && coord.y < self.rows && coord.z < self.planes
    }

    /// Linear index of a cell, if it lies inside the grid.
    pub const fn index(&self, coord: CellCoord) -> Option<usize> {
        if self.contains(coord) {
            Some((coord.z * self.rows + coord.y) * self.columns + coord.x)
        } else {
            None
        }
    }

    /// Cell coordinate of a linear index. Inverse of [`GridShape::index`].
    pub const fn coord(&self, index: usize) -> CellCoord {
        let x = index % self.columns;
        let y = (index / self.columns) % self.rows;
        let z = index / (self.columns * self.rows);
        CellCoord { x, y, z }
    }

    /// Iterate all cell coordinates in linear index order.
    pub fn iter(&self) -> impl Iterator<Item = CellCoord> + '_ {
        (0..self.cell_count()).map(move |i| self.coord(i))
    }
}
