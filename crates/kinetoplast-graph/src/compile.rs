//! Lattice to graph compilation.
//!
//! # Primaries and Mirrors
//!
//! Only primary nodes are evaluated pairwise. A stacked copy mirrors the
//! point it duplicates, and in ring mode every non-representative member of
//! a boundary stack mirrors the stack representative. Once primary edges are
//! decided, each edge `(a, b)` links every member of `a`'s class to every
//! member of `b`'s class. Members of one class never link to each other.
//!
//! # Link Rules
//!
//! - [`LinkRule::Overlap`] scans cells within `ceil((r + r_max) / spacing)`
//!   of each primary, evaluates every unseen pair once through the
//!   [`PairRegistry`], and draws against the overlap probability.
//! - [`LinkRule::Contact`] tests a fixed set of neighbor cells per topology
//!   against the bond length. Maxi fields scan every primary with the
//!   boundary-crossing test.
//!
//! Ring mode then links all members of edge-adjacent boundary stacks in
//! each plane, on top of whatever the rule produced.

use std::time::Instant;

use kinetoplast_lattice::{CellCoord, GridShape, Lattice, Point, Topology};
use kinetoplast_overlap::{ContactRule, Dimension, OverlapModel};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::graph::{GraphBuilder, PairRegistry};
use crate::index::{IndexMap, NodeId};
use crate::template::NetworkTemplate;
use crate::Result;

const SQUARE: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const TRIANGLE_EVEN: [(i64, i64); 6] = [(1, 0), (-1, 0), (-1, 1), (0, 1), (-1, -1), (0, -1)];
const TRIANGLE_ODD: [(i64, i64); 6] = [(1, 0), (-1, 0), (0, 1), (1, 1), (0, -1), (1, -1)];

/// How primary pairs are decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkRule {
    /// Probabilistic overlap of field densities.
    Overlap,
    /// Exact nearest-neighbor contact.
    Contact,
}

impl LinkRule {
    /// Overlap for random lattices, contact for regular ones.
    pub fn for_topology(topology: Topology) -> Self {
        if topology.is_deterministic() {
            LinkRule::Contact
        } else {
            LinkRule::Overlap
        }
    }
}

/// Parameters for [`compile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompileOptions {
    /// Rule override; defaults to [`LinkRule::for_topology`].
    pub rule: Option<LinkRule>,
    /// Force adjacent boundary stacks into a connected ring.
    pub ringed: bool,
}

/// Compile a lattice into a network template.
///
/// `rng` is drawn from once per probabilistic pair evaluation.
pub fn compile<R: Rng + ?Sized>(
    lattice: Lattice,
    options: &CompileOptions,
    rng: &mut R,
) -> Result<NetworkTemplate> {
    let start = Instant::now();
    let index = IndexMap::new(&lattice)?;
    let rule = options
        .rule
        .unwrap_or_else(|| LinkRule::for_topology(lattice.topology()));
    info!(
        "Compiling {} lattice: {} nodes, {:?} rule{}",
        lattice.topology(),
        index.len(),
        rule,
        if options.ringed { ", ringed" } else { "" }
    );

    let network = Network::new(&lattice, &index, options.ringed);
    let primary_edges = match rule {
        LinkRule::Overlap => network.overlap_edges(rng),
        LinkRule::Contact => network.contact_edges(),
    };

    let mut builder = GraphBuilder::new(index.len());
    network.expand(&primary_edges, &mut builder);
    if options.ringed {
        if !lattice.is_boundary_flagged() {
            warn!("Ring mode requested on a lattice without boundary flags");
        }
        network.link_ring(&mut builder);
    }
    let graph = builder.finish();

    info!(
        "Compiled {} nodes, {} edges (avg degree {:.3}, min degree {}) in {:?}",
        graph.len(),
        graph.edge_count(),
        graph.average_degree(),
        graph.min_degree(),
        start.elapsed()
    );
    Ok(NetworkTemplate::new(lattice, index, graph))
}

/// Borrowed view over a lattice and its index used during compilation.
struct Network<'a> {
    lattice: &'a Lattice,
    index: &'a IndexMap,
    shape: GridShape,
    /// Class representative of every node.
    primary: Vec<NodeId>,
    /// Largest radius of any field.
    max_radius: f64,
}

impl<'a> Network<'a> {
    fn new(lattice: &'a Lattice, index: &'a IndexMap, ringed: bool) -> Self {
        let shape = index.shape();
        let mut node_of_point = vec![NodeId(0); lattice.len()];
        for node in index.nodes() {
            if let Some(point) = index.point(node) {
                node_of_point[point.as_usize()] = node;
            }
        }

        let mut primary: Vec<NodeId> = index.nodes().collect();
        for cell in 0..shape.cell_count() {
            let ids = index.cell_nodes(cell);
            let head = NodeId(ids.start);
            for id in ids.clone().skip(1) {
                let node = NodeId(id);
                let point = point_of(lattice, index, node);
                if let Some(original) = point.stacked_on {
                    primary[id as usize] = node_of_point[original.as_usize()];
                } else if ringed && point.is_boundary() {
                    primary[id as usize] = head;
                }
            }
        }

        let max_radius = lattice
            .points()
            .iter()
            .map(|p| p.radius)
            .fold(lattice.radius(), f64::max);

        Self {
            lattice,
            index,
            shape,
            primary,
            max_radius,
        }
    }

    fn is_primary(&self, node: NodeId) -> bool {
        self.primary[node.as_usize()] == node
    }

    fn point(&self, node: NodeId) -> Point {
        point_of(self.lattice, self.index, node)
    }

    fn cell_of(&self, node: NodeId) -> CellCoord {
        self.index
            .locate(node)
            .map_or(CellCoord::ORIGIN, |(coord, _)| coord)
    }

    /// Primary nodes of the cell at `coord`.
    fn primaries_in(&self, coord: CellCoord) -> impl Iterator<Item = NodeId> + '_ {
        let ids = self.shape.index(coord).map_or(0..0, |cell| self.index.cell_nodes(cell));
        ids.map(NodeId).filter(move |&node| self.is_primary(node))
    }

    fn primaries(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.index.nodes().filter(move |&node| self.is_primary(node))
    }

    fn overlap_edges<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<(NodeId, NodeId)> {
        let dimension = if self.lattice.is_spatial() {
            Dimension::Spatial
        } else {
            Dimension::Planar
        };
        let model = OverlapModel::new(dimension);
        let spacing = self.lattice.spacing();
        let mut registry = PairRegistry::new();
        let mut edges = Vec::new();

        for node in self.primaries() {
            let p = self.point(node);
            let reach = ((p.radius + self.max_radius) / spacing).ceil() as usize;
            let home = self.cell_of(node);
            for coord in window(self.shape, home, reach) {
                for other in self.primaries_in(coord) {
                    if other == node || !registry.insert(node, other) {
                        continue;
                    }
                    let q = self.point(other);
                    if model.are_linked(rng, p.center, p.radius, q.center, q.radius) {
                        edges.push((node, other));
                    }
                }
            }
        }
        debug!(
            "Evaluated {} pairs, {} primary links",
            registry.len(),
            edges.len()
        );
        edges
    }

    /// Graphite links every aligned pair in both adjacent planes, so an
    /// interior aligned node has three in-plane and two interlayer bonds.
    fn contact_edges(&self) -> Vec<(NodeId, NodeId)> {
        let topology = self.lattice.topology();
        let bond = topology
            .bond_length(self.lattice.spacing())
            .unwrap_or(self.lattice.spacing());
        let rule = ContactRule::new(bond);
        let standard = self.lattice.radius();
        let mut edges = Vec::new();

        for node in self.primaries() {
            let p = self.point(node);
            if p.radius != standard {
                for other in self.primaries() {
                    let q = self.point(other);
                    if other != node && rule.fields_cross(p.center, p.radius, q.center, q.radius) {
                        edges.push((node, other));
                    }
                }
                continue;
            }

            let home = self.cell_of(node);
            for &(dx, dy) in contact_offsets(topology, home) {
                let Some(coord) = home.offset(dx, dy, 0) else {
                    continue;
                };
                for other in self.primaries_in(coord) {
                    let q = self.point(other);
                    if q.radius == standard && rule.link_exists(p.center, p.radius, q.center, q.radius) {
                        edges.push((node, other));
                    }
                }
            }

            if topology == Topology::Graphite {
                for dz in [-1, 1] {
                    for dx in -1..=1 {
                        let Some(coord) = home.offset(dx, 0, dz) else {
                            continue;
                        };
                        for other in self.primaries_in(coord) {
                            let q = self.point(other);
                            if q.radius == standard && rule.aligned(p.center, q.center) {
                                edges.push((node, other));
                            }
                        }
                    }
                }
            }
        }
        debug!("Found {} primary contacts", edges.len());
        edges
    }

    /// Link every member of each endpoint's class.
    fn expand(&self, edges: &[(NodeId, NodeId)], builder: &mut GraphBuilder) {
        let mut members: Vec<Vec<NodeId>> = vec![Vec::new(); self.primary.len()];
        for (id, &head) in self.primary.iter().enumerate() {
            members[head.as_usize()].push(NodeId(id as u32));
        }
        for &(a, b) in edges {
            for &x in &members[a.as_usize()] {
                for &y in &members[b.as_usize()] {
                    builder.link(x, y);
                }
            }
        }
    }

    fn link_ring(&self, builder: &mut GraphBuilder) {
        let mut links = 0usize;
        for coord in self.shape.iter() {
            let here = self.boundary_members(coord);
            if here.is_empty() {
                continue;
            }
            for (dx, dy) in [(1, 0), (0, 1)] {
                let Some(next) = coord.offset(dx, dy, 0) else {
                    continue;
                };
                for &b in &self.boundary_members(next) {
                    for &a in &here {
                        builder.link(a, b);
                        links += 1;
                    }
                }
            }
        }
        debug!("Added {} ring links", links);
    }

    /// Nodes of a cell that belong to its boundary stack.
    fn boundary_members(&self, coord: CellCoord) -> Vec<NodeId> {
        let ids = self.shape.index(coord).map_or(0..0, |cell| self.index.cell_nodes(cell));
        ids.map(NodeId)
            .filter(|&node| self.point(node).is_boundary())
            .collect()
    }
}

fn point_of(lattice: &Lattice, index: &IndexMap, node: NodeId) -> Point {
    index
        .point(node)
        .and_then(|point| lattice.point(point))
        .copied()
        .unwrap_or_else(|| Point::new(Default::default(), 0.0))
}

/// Candidate neighbor cells in the same plane.
fn contact_offsets(topology: Topology, coord: CellCoord) -> &'static [(i64, i64)] {
    match topology {
        Topology::Triangular if coord.y % 2 == 0 => &TRIANGLE_EVEN,
        Topology::Triangular => &TRIANGLE_ODD,
        Topology::Random | Topology::Rectangular | Topology::Hexagonal | Topology::Graphite => &SQUARE,
    }
}

/// Cells within `reach` of `center` along every axis, clipped to the grid.
fn window(shape: GridShape, center: CellCoord, reach: usize) -> impl Iterator<Item = CellCoord> {
    let span = |c: usize, len: usize| c.saturating_sub(reach)..=(c + reach).min(len.saturating_sub(1));
    let xs = span(center.x, shape.columns);
    let ys = span(center.y, shape.rows);
    let zs = span(center.z, shape.planes);
    zs.flat_map(move |z| {
        let xs = xs.clone();
        ys.clone()
            .flat_map(move |y| xs.clone().map(move |x| CellCoord::new(x, y, z)))
    })
}
