//! Compiled, immutable network templates.

use kinetoplast_lattice::{BoundaryCellId, Lattice, Point};

use crate::graph::Graph;
use crate::index::{IndexMap, NodeId};

/// A lattice with its node index and compiled graph.
///
/// Templates are never mutated after compilation. Dissolution runs share
/// one template and track removals in their own overlay.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkTemplate {
    lattice: Lattice,
    index: IndexMap,
    graph: Graph,
}

impl NetworkTemplate {
    pub(crate) fn new(lattice: Lattice, index: IndexMap, graph: Graph) -> Self {
        Self {
            lattice,
            index,
            graph,
        }
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn index(&self) -> &IndexMap {
        &self.index
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Lattice point behind a node.
    pub fn point(&self, node: NodeId) -> Option<&Point> {
        self.index
            .point(node)
            .and_then(|point| self.lattice.point(point))
    }

    /// Boundary stack a node belongs to, if any.
    pub fn boundary_cell(&self, node: NodeId) -> Option<BoundaryCellId> {
        self.point(node).and_then(|point| point.boundary)
    }

    /// Points per boundary stack.
    pub fn boundary_saturation(&self) -> u32 {
        self.lattice.boundary_saturation()
    }

    pub fn into_parts(self) -> (Lattice, IndexMap, Graph) {
        (self.lattice, self.index, self.graph)
    }
}
