//! The point arena and its cell index.
//!
//! A [`Lattice`] owns every [`Point`] in one flat vector. Cells hold point
//! indices in insertion order; the first index of a cell is its
//! representative, the point the builder placed there. Saturation and maxi
//! fields append after it.

use rand::Rng;

use crate::point::{BoundaryCellId, Point, PointIndex};
use crate::position::{CellCoord, GridShape, Position};
use crate::topology::{LatticeConfig, SaturationMode, Topology, ROW_PITCH, SUBLATTICE_RISE};
use crate::{Error, Result};

/// A built lattice of probability fields.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lattice {
    config: LatticeConfig,
    shape: GridShape,
    points: Vec<Point>,
    cells: Vec<Vec<PointIndex>>,
    /// Points per boundary stack, including the representative.
    saturation: u32,
}

impl Lattice {
    /// Build a lattice, placing exactly one point in every cell.
    ///
    /// `rng` is only drawn from for random topologies.
    pub fn build<R: Rng + ?Sized>(config: LatticeConfig, rng: &mut R) -> Result<Self> {
        let shape = config.validate()?;
        let cell_count = shape.cell_count();
        let mut lattice = Self {
            config,
            shape,
            points: Vec::with_capacity(cell_count),
            cells: vec![Vec::new(); cell_count],
            saturation: 1,
        };

        for (index, coord) in shape.iter().enumerate() {
            let mut point = Point::new(lattice.site(coord, rng), lattice.config.radius);
            if lattice.config.flag_boundary && lattice.is_boundary_cell(coord) {
                point = point.with_boundary(BoundaryCellId(index as u32));
            }
            lattice.push(index, point);
        }
        Ok(lattice)
    }

    /// Add `extra` points to every boundary cell.
    ///
    /// Stacked copies share the representative's position and record it in
    /// [`Point::stacked_on`]. Random points are drawn uniformly inside the
    /// cell and only exist for random topologies.
    pub fn super_saturate_boundary<R: Rng + ?Sized>(
        &mut self,
        extra: u32,
        mode: SaturationMode,
        rng: &mut R,
    ) -> Result<()> {
        if !self.config.flag_boundary {
            return Err(Error::BoundaryNotFlagged);
        }
        if extra == 0 {
            return Err(Error::ZeroSaturation);
        }
        if mode == SaturationMode::Random && self.topology().is_deterministic() {
            return Err(Error::UnsupportedSaturation {
                topology: self.topology(),
                mode,
            });
        }

        for index in 0..self.cells.len() {
            let Some(rep) = self.representative(index) else {
                continue;
            };
            let base = self.points[rep.as_usize()];
            let Some(id) = base.boundary else {
                continue;
            };
            let coord = self.shape.coord(index);
            for _ in 0..extra {
                let point = match mode {
                    SaturationMode::Stacked => Point {
                        stacked_on: Some(rep),
                        ..base
                    },
                    SaturationMode::Random => {
                        Point::new(self.site(coord, rng), self.config.radius).with_boundary(id)
                    }
                };
                self.push(index, point);
            }
        }
        self.saturation += extra;
        Ok(())
    }

    /// Scatter `count` fields of `radius` uniformly over the lattice domain.
    ///
    /// Each lands in its nearest cell and never carries a boundary id.
    pub fn add_maxi_fields<R: Rng + ?Sized>(
        &mut self,
        radius: f64,
        count: usize,
        rng: &mut R,
    ) -> Result<()> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(Error::InvalidRadius(radius));
        }
        let (lo, hi) = self.domain();
        for _ in 0..count {
            let center = Position::new(
                sample(rng, lo.x, hi.x),
                sample(rng, lo.y, hi.y),
                sample(rng, lo.z, hi.z),
            );
            let cell = self.nearest_cell(center);
            self.push(cell, Point::new(center, radius));
        }
        Ok(())
    }

    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    pub fn topology(&self) -> Topology {
        self.config.topology
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn spacing(&self) -> f64 {
        self.config.spacing
    }

    /// Radius of standard fields. Maxi fields differ.
    pub fn radius(&self) -> f64 {
        self.config.radius
    }

    /// True when fields are spheres rather than circles.
    pub fn is_spatial(&self) -> bool {
        self.shape.planes > 1 || self.topology() == Topology::Graphite
    }

    pub fn is_boundary_flagged(&self) -> bool {
        self.config.flag_boundary
    }

    /// Points per boundary stack, the starting count for boundary tracking.
    pub fn boundary_saturation(&self) -> u32 {
        self.saturation
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point(&self, index: PointIndex) -> Option<&Point> {
        self.points.get(index.as_usize())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points of the cell at `coord`, empty outside the grid.
    pub fn cell(&self, coord: CellCoord) -> &[PointIndex] {
        self.shape
            .index(coord)
            .map_or(&[][..], |index| self.cells[index].as_slice())
    }

    /// Points of the cell with linear index `index`.
    pub fn cell_at(&self, index: usize) -> &[PointIndex] {
        self.cells.get(index).map_or(&[][..], Vec::as_slice)
    }

    /// All cells in linear index order.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, &[PointIndex])> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, cell)| (self.shape.coord(index), cell.as_slice()))
    }

    /// The point the builder placed in a cell.
    pub fn representative(&self, index: usize) -> Option<PointIndex> {
        self.cells.get(index).and_then(|cell| cell.first().copied())
    }

    /// Whether a cell lies on the outer ring of its plane.
    ///
    /// Honeycomb rows interleave two sub-lattices, so their ring is two
    /// columns deep on the left and right.
    pub fn is_boundary_cell(&self, coord: CellCoord) -> bool {
        let depth = self.topology().boundary_depth();
        coord.y == 0
            || coord.y + 1 >= self.shape.rows
            || coord.x < depth
            || coord.x + depth >= self.shape.columns
    }

    fn push(&mut self, cell: usize, point: Point) -> PointIndex {
        let index = PointIndex(self.points.len() as u32);
        self.points.push(point);
        self.cells[cell].push(index);
        index
    }

    fn site<R: Rng + ?Sized>(&self, coord: CellCoord, rng: &mut R) -> Position {
        let s = self.config.spacing;
        let (x, y, z) = (coord.x as f64, coord.y as f64, coord.z as f64);
        match self.topology() {
            Topology::Random => {
                let px = (x + rng.gen::<f64>()) * s;
                let py = (y + rng.gen::<f64>()) * s;
                let pz = if self.is_spatial() {
                    (z + rng.gen::<f64>()) * s
                } else {
                    0.0
                };
                Position::new(px, py, pz)
            }
            Topology::Rectangular => Position::planar(x * s, y * s),
            Topology::Triangular => {
                let shift = if coord.y % 2 == 1 { 0.5 } else { 0.0 };
                Position::planar((x + shift) * s, y * ROW_PITCH * s)
            }
            Topology::Hexagonal | Topology::Graphite => honeycomb_site(coord, s),
        }
    }

    /// Axis-aligned box the maxi fields are drawn from.
    fn domain(&self) -> (Position, Position) {
        let s = self.config.spacing;
        if self.topology() == Topology::Random {
            let depth = if self.is_spatial() {
                self.shape.planes as f64 * s
            } else {
                0.0
            };
            let hi = Position::new(self.shape.columns as f64 * s, self.shape.rows as f64 * s, depth);
            return (Position::ORIGIN, hi);
        }

        let mut lo = Position::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut hi = -lo;
        for index in 0..self.cells.len() {
            if let Some(rep) = self.representative(index) {
                let c = self.points[rep.as_usize()].center;
                lo = Position::new(lo.x.min(c.x), lo.y.min(c.y), lo.z.min(c.z));
                hi = Position::new(hi.x.max(c.x), hi.y.max(c.y), hi.z.max(c.z));
            }
        }
        (lo, hi)
    }

    fn nearest_cell(&self, at: Position) -> usize {
        let s = self.config.spacing;
        let snap = |value: f64, len: usize, round: bool| -> usize {
            let cell = if round { (value / s).round() } else { (value / s).floor() };
            (cell.max(0.0) as usize).min(len.saturating_sub(1))
        };
        match self.topology() {
            Topology::Random | Topology::Rectangular => {
                let round = self.topology() == Topology::Rectangular;
                let coord = CellCoord::new(
                    snap(at.x, self.shape.columns, round),
                    snap(at.y, self.shape.rows, round),
                    snap(at.z, self.shape.planes, round),
                );
                self.shape.index(coord).unwrap_or(0)
            }
            Topology::Triangular | Topology::Hexagonal | Topology::Graphite => (0..self.cells.len())
                .filter_map(|index| {
                    let rep = self.representative(index)?;
                    Some((index, self.points[rep.as_usize()].center.distance(&at)))
                })
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map_or(0, |(index, _)| index),
        }
    }
}

impl std::ops::Index<PointIndex> for Lattice {
    type Output = Point;

    fn index(&self, index: PointIndex) -> &Point {
        &self.points[index.as_usize()]
    }
}

/// Honeycomb cell position.
///
/// Cells alternate between the two sub-lattices along a row, so every cell
/// sits half a spacing right of the previous one and is raised by the
/// sub-lattice rise when `x + y` is even. Odd planes shift by one more
/// sub-lattice offset.
fn honeycomb_site(coord: CellCoord, s: f64) -> Position {
    let raised = (coord.x + coord.y) % 2 == 0;
    let mut x = (coord.x as f64 + 1.0) * 0.5;
    let mut y = coord.y as f64 * ROW_PITCH;
    if raised {
        y += SUBLATTICE_RISE;
    }
    if coord.z % 2 == 1 {
        x += 0.5;
        y += SUBLATTICE_RISE;
    }
    Position::new(x * s, y * s, coord.z as f64 * s)
}

fn sample<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}
