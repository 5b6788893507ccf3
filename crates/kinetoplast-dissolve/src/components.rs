//! Connected components of the live subgraph.

use std::collections::BTreeMap;

use kinetoplast_graph::{Graph, NodeId};

use crate::events::ComponentSnapshot;

// ── Union-Find ──────────────────────────────────────────────────────────────

/// Disjoint sets with path compression and union by rank.
#[derive(Debug, Clone)]
pub(crate) struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub(crate) fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    pub(crate) fn union(&mut self, x: usize, y: usize) {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return;
        }
        match self.rank[rx].cmp(&self.rank[ry]) {
            std::cmp::Ordering::Less => self.parent[rx] = ry,
            std::cmp::Ordering::Greater => self.parent[ry] = rx,
            std::cmp::Ordering::Equal => {
                self.parent[ry] = rx;
                self.rank[rx] += 1;
            }
        }
    }
}

impl ComponentSnapshot {
    /// Component sizes of the subgraph induced by live nodes.
    ///
    /// `alive` is indexed by node id; ids past its end count as removed.
    pub fn of(graph: &Graph, alive: &[bool]) -> Self {
        let is_live = |node: NodeId| alive.get(node.as_usize()).copied().unwrap_or(false);

        let mut sets = UnionFind::new(graph.len());
        for node in graph.nodes().filter(|&node| is_live(node)) {
            for &neighbor in graph.neighbors(node) {
                if neighbor > node && is_live(neighbor) {
                    sets.union(node.as_usize(), neighbor.as_usize());
                }
            }
        }

        let mut sizes: BTreeMap<usize, usize> = BTreeMap::new();
        for node in graph.nodes().filter(|&node| is_live(node)) {
            *sizes.entry(sets.find(node.as_usize())).or_default() += 1;
        }
        let mut histogram: BTreeMap<usize, usize> = BTreeMap::new();
        for size in sizes.into_values() {
            *histogram.entry(size).or_default() += 1;
        }
        Self::from_histogram(histogram)
    }
}
