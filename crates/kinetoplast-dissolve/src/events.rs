//! Records emitted by a dissolution run.

use serde::{Deserialize, Serialize};

/// Boundary ring breaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryEvent {
    /// The first batch to empty a boundary stack.
    FirstBreak,
    /// The next batch to empty another stack; the ring is now in two pieces.
    SecondBreak,
}

impl std::fmt::Display for BoundaryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryEvent::FirstBreak => f.write_str("boundary breaks here"),
            BoundaryEvent::SecondBreak => f.write_str("boundary splits in two here"),
        }
    }
}

/// Multiset of component sizes as `(size, count)` pairs, sizes strictly descending.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComponentSnapshot {
    pub components: Vec<(usize, usize)>,
}

impl ComponentSnapshot {
    /// Build from a histogram, dropping zero counts.
    pub fn from_histogram(histogram: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut components: Vec<_> = histogram
            .into_iter()
            .filter(|&(size, count)| size > 0 && count > 0)
            .collect();
        components.sort_unstable_by(|a, b| b.0.cmp(&a.0));
        Self { components }
    }

    /// Size of the largest component, zero when nothing is live.
    pub fn largest(&self) -> usize {
        self.components.first().map_or(0, |&(size, _)| size)
    }

    /// Σ size × count.
    pub fn live_nodes(&self) -> usize {
        self.components.iter().map(|&(size, count)| size * count).sum()
    }

    /// Total number of components.
    pub fn component_count(&self) -> usize {
        self.components.iter().map(|&(_, count)| count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Distinct sizes, largest first.
    pub fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.components.iter().map(|&(size, _)| size)
    }
}

/// One observation of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DissolutionStep {
    /// Nodes removed before this snapshot.
    pub dissolutions: usize,
    pub snapshot: ComponentSnapshot,
    pub event: Option<BoundaryEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_orders_and_sums() {
        let snapshot = ComponentSnapshot::from_histogram([(1, 4), (7, 1), (3, 2), (5, 0)]);
        assert_eq!(snapshot.components, vec![(7, 1), (3, 2), (1, 4)]);
        assert_eq!(snapshot.largest(), 7);
        assert_eq!(snapshot.live_nodes(), 17);
        assert_eq!(snapshot.component_count(), 7);
        assert_eq!(snapshot.sizes().collect::<Vec<_>>(), vec![7, 3, 1]);
    }

    #[test]
    fn empty_snapshot() {
        let snapshot = ComponentSnapshot::default();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.largest(), 0);
        assert_eq!(snapshot.live_nodes(), 0);
    }

    #[test]
    fn events_serialize_by_name() {
        let step = DissolutionStep {
            dissolutions: 3,
            snapshot: ComponentSnapshot::from_histogram([(2, 1)]),
            event: Some(BoundaryEvent::FirstBreak),
        };
        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("FirstBreak"));
        let back: DissolutionStep = serde_json::from_str(&json).unwrap();
        assert_eq!(back, step);
    }
}
