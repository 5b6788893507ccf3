//! Remaining-member counts for boundary stacks.

use std::collections::HashMap;

use kinetoplast_lattice::BoundaryCellId;

/// Counts how many members of each boundary stack are still live.
///
/// Entries are created on first removal, so untouched stacks cost nothing.
#[derive(Debug, Clone)]
pub struct BoundaryRegistry {
    remaining: HashMap<BoundaryCellId, u32>,
    saturation: u32,
}

impl BoundaryRegistry {
    /// Registry for stacks of `saturation` members each.
    pub fn new(saturation: u32) -> Self {
        Self {
            remaining: HashMap::new(),
            saturation: saturation.max(1),
        }
    }

    pub fn saturation(&self) -> u32 {
        self.saturation
    }

    /// Record the removal of one member of `cell`.
    ///
    /// Returns `true` exactly when this removal empties the stack.
    pub fn record_removal(&mut self, cell: BoundaryCellId) -> bool {
        let remaining = self
            .remaining
            .entry(cell)
            .or_insert(self.saturation);
        if *remaining == 0 {
            return false;
        }
        *remaining -= 1;
        *remaining == 0
    }

    /// Live members left in `cell`.
    pub fn remaining(&self, cell: BoundaryCellId) -> u32 {
        self.remaining
            .get(&cell)
            .copied()
            .unwrap_or(self.saturation)
    }

    /// Number of stacks that have been emptied.
    pub fn emptied(&self) -> usize {
        self.remaining.values().filter(|&&left| left == 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_empties_on_last_member() {
        let mut registry = BoundaryRegistry::new(3);
        let cell = BoundaryCellId(4);
        assert!(!registry.record_removal(cell));
        assert!(!registry.record_removal(cell));
        assert_eq!(registry.remaining(cell), 1);
        assert!(registry.record_removal(cell));
        assert_eq!(registry.emptied(), 1);
        // Further removals never report again.
        assert!(!registry.record_removal(cell));
    }

    #[test]
    fn unsaturated_stack_empties_immediately() {
        let mut registry = BoundaryRegistry::new(1);
        assert!(registry.record_removal(BoundaryCellId(0)));
        assert_eq!(registry.remaining(BoundaryCellId(1)), 1);
    }

    #[test]
    fn stacks_are_independent() {
        let mut registry = BoundaryRegistry::new(2);
        assert!(!registry.record_removal(BoundaryCellId(1)));
        assert!(!registry.record_removal(BoundaryCellId(2)));
        assert!(registry.record_removal(BoundaryCellId(1)));
        assert_eq!(registry.remaining(BoundaryCellId(2)), 1);
    }
}
