//! Choosing which nodes to dissolve.

use std::collections::VecDeque;

use kinetoplast_graph::NodeId;
use rand::seq::SliceRandom;
use rand::Rng;

/// Picks the next batch of nodes to remove.
pub trait RemovalPolicy {
    /// Choose up to `count` distinct nodes from `live`.
    fn choose(&mut self, live: &[NodeId], count: usize) -> Vec<NodeId>;
}

/// Uniform sampling without replacement.
#[derive(Debug, Clone)]
pub struct UniformRemoval<R> {
    rng: R,
}

impl<R: Rng> UniformRemoval<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RemovalPolicy for UniformRemoval<R> {
    fn choose(&mut self, live: &[NodeId], count: usize) -> Vec<NodeId> {
        live.choose_multiple(&mut self.rng, count).copied().collect()
    }
}

/// Removes nodes in a fixed order, skipping any that are no longer live.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRemoval {
    order: VecDeque<NodeId>,
}

impl ScriptedRemoval {
    pub fn new(order: impl IntoIterator<Item = NodeId>) -> Self {
        Self {
            order: order.into_iter().collect(),
        }
    }
}

impl RemovalPolicy for ScriptedRemoval {
    fn choose(&mut self, live: &[NodeId], count: usize) -> Vec<NodeId> {
        let mut batch = Vec::with_capacity(count);
        while batch.len() < count {
            let Some(node) = self.order.pop_front() else {
                break;
            };
            if live.contains(&node) && !batch.contains(&node) {
                batch.push(node);
            }
        }
        batch
    }
}
