//! Dense node ids over lattice cells.

use std::ops::Range;

use kinetoplast_lattice::{CellCoord, GridShape, Lattice, PointIndex};

use crate::{Error, Result};

/// Dense id of a graph node in `[0, N)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Bijection between `(cell, slot)` and [`NodeId`].
///
/// Ids are handed out cell by cell in linear index order (x fastest, then
/// y, then z) and by insertion order within a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexMap {
    shape: GridShape,
    /// `offsets[c]..offsets[c + 1]` are the ids of cell `c`.
    offsets: Vec<u32>,
    points: Vec<PointIndex>,
}

impl IndexMap {
    pub fn new(lattice: &Lattice) -> Result<Self> {
        if lattice.len() > u32::MAX as usize {
            return Err(Error::TooManyNodes(lattice.len()));
        }
        let shape = lattice.shape();
        let mut offsets = Vec::with_capacity(shape.cell_count() + 1);
        let mut points = Vec::with_capacity(lattice.len());
        offsets.push(0);
        for (_, cell) in lattice.cells() {
            points.extend_from_slice(cell);
            offsets.push(points.len() as u32);
        }
        Ok(Self {
            shape,
            offsets,
            points,
        })
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Node at `slot` of the cell at `coord`.
    pub fn node(&self, coord: CellCoord, slot: usize) -> Option<NodeId> {
        let range = self.cell_nodes(self.shape.index(coord)?);
        let id = range.start.checked_add(u32::try_from(slot).ok()?)?;
        range.contains(&id).then_some(NodeId(id))
    }

    /// Cell and slot of a node.
    pub fn locate(&self, node: NodeId) -> Option<(CellCoord, usize)> {
        if node.as_usize() >= self.len() {
            return None;
        }
        // First offset strictly greater than the id closes its cell.
        let cell = self.offsets.partition_point(|&start| start <= node.0) - 1;
        let slot = (node.0 - self.offsets[cell]) as usize;
        Some((self.shape.coord(cell), slot))
    }

    /// Lattice point behind a node.
    pub fn point(&self, node: NodeId) -> Option<PointIndex> {
        self.points.get(node.as_usize()).copied()
    }

    /// Ids of every node in the cell with linear index `cell`.
    pub fn cell_nodes(&self, cell: usize) -> Range<u32> {
        match (self.offsets.get(cell), self.offsets.get(cell + 1)) {
            (Some(&start), Some(&end)) => start..end,
            _ => 0..0,
        }
    }

    /// Lattice point of every node, in id order.
    pub fn points(&self) -> &[PointIndex] {
        &self.points
    }

    /// Iterate all node ids.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        (0..self.points.len() as u32).map(NodeId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinetoplast_lattice::{Dims, LatticeConfig, SaturationMode, Topology};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn saturated() -> Lattice {
        let config = LatticeConfig {
            topology: Topology::Rectangular,
            dims: Dims::planar(3, 3),
            flag_boundary: true,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let mut lattice = Lattice::build(config, &mut rng).unwrap();
        lattice
            .super_saturate_boundary(1, SaturationMode::Stacked, &mut rng)
            .unwrap();
        lattice
    }

    #[test]
    fn ids_follow_cells_then_slots() {
        let lattice = saturated();
        let index = IndexMap::new(&lattice).unwrap();
        assert_eq!(index.len(), 9 + 8);

        // Cell (0, 0) holds the builder point and one copy.
        assert_eq!(index.node(CellCoord::planar(0, 0), 0), Some(NodeId(0)));
        assert_eq!(index.node(CellCoord::planar(0, 0), 1), Some(NodeId(1)));
        assert_eq!(index.node(CellCoord::planar(0, 0), 2), None);
        // The center cell is not on the ring and holds one point.
        let center = index.node(CellCoord::planar(1, 1), 0).unwrap();
        assert_eq!(index.node(CellCoord::planar(1, 1), 1), None);
        assert_eq!(index.locate(center), Some((CellCoord::planar(1, 1), 0)));
    }

    #[test]
    fn locate_inverts_node() {
        let lattice = saturated();
        let index = IndexMap::new(&lattice).unwrap();
        for node in index.nodes() {
            let (coord, slot) = index.locate(node).unwrap();
            assert_eq!(index.node(coord, slot), Some(node));
            let point = index.point(node).unwrap();
            assert_eq!(lattice.cell(coord)[slot], point);
        }
        assert_eq!(index.locate(NodeId(index.len() as u32)), None);
    }

    #[test]
    fn every_point_has_one_node() {
        let lattice = saturated();
        let index = IndexMap::new(&lattice).unwrap();
        let mut seen: Vec<_> = index.points().to_vec();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), lattice.len());
    }
}
