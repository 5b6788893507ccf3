//! Symmetric adjacency over node ids.

use std::collections::{HashMap, HashSet};

use crate::index::NodeId;

/// Undirected simple graph. Neighbor lists are sorted and duplicate-free.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    adjacency: Vec<Vec<NodeId>>,
}

impl Graph {
    /// Build a graph over `nodes` nodes from an edge list.
    ///
    /// Self-loops and repeated edges are dropped.
    pub fn from_edges(nodes: usize, edges: impl IntoIterator<Item = (NodeId, NodeId)>) -> Self {
        let mut builder = GraphBuilder::new(nodes);
        for (a, b) in edges {
            builder.link(a, b);
        }
        builder.finish()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.adjacency
            .get(node.as_usize())
            .map_or(&[][..], Vec::as_slice)
    }

    pub fn adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Mean degree; zero for an empty graph.
    pub fn average_degree(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        2.0 * self.edge_count() as f64 / self.len() as f64
    }

    /// Smallest degree; zero for an empty graph.
    pub fn min_degree(&self) -> usize {
        self.adjacency.iter().map(Vec::len).min().unwrap_or(0)
    }

    /// Each undirected edge once, as `(low, high)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(a, neighbors)| {
            let a = NodeId(a as u32);
            neighbors
                .iter()
                .copied()
                .filter(move |&b| a < b)
                .map(move |b| (a, b))
        })
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        (0..self.adjacency.len() as u32).map(NodeId)
    }
}

/// Accumulates edges, then sorts and deduplicates neighbor lists.
#[derive(Debug, Clone)]
pub(crate) struct GraphBuilder {
    adjacency: Vec<Vec<NodeId>>,
}

impl GraphBuilder {
    pub(crate) fn new(nodes: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); nodes],
        }
    }

    pub(crate) fn link(&mut self, a: NodeId, b: NodeId) {
        if a == b || a.as_usize() >= self.adjacency.len() || b.as_usize() >= self.adjacency.len() {
            return;
        }
        self.adjacency[a.as_usize()].push(b);
        self.adjacency[b.as_usize()].push(a);
    }

    pub(crate) fn finish(mut self) -> Graph {
        for neighbors in &mut self.adjacency {
            neighbors.sort_unstable();
            neighbors.dedup();
        }
        Graph {
            adjacency: self.adjacency,
        }
    }
}

/// Unordered pairs already evaluated, keyed by the smaller id.
#[derive(Debug, Clone, Default)]
pub struct PairRegistry {
    seen: HashMap<u32, HashSet<u32>>,
    len: usize,
}

impl PairRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pair, returning `true` the first time it is seen.
    pub fn insert(&mut self, a: NodeId, b: NodeId) -> bool {
        let (low, high) = if a <= b { (a.0, b.0) } else { (b.0, a.0) };
        let fresh = self.seen.entry(low).or_default().insert(high);
        if fresh {
            self.len += 1;
        }
        fresh
    }

    pub fn contains(&self, a: NodeId, b: NodeId) -> bool {
        let (low, high) = if a <= b { (a.0, b.0) } else { (b.0, a.0) };
        self.seen.get(&low).is_some_and(|highs| highs.contains(&high))
    }

    /// Number of distinct pairs recorded.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
