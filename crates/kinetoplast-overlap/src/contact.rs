//! Exact linking rules for regular lattices.

use kinetoplast_lattice::{Position, Topology};

use crate::model::boundaries_cross;

/// Slack allowed when comparing lattice distances.
pub const CONTACT_TOLERANCE: f64 = 1e-3;

/// Links standard fields that sit exactly one bond apart.
///
/// Fields of different radii fall back to the boundary-crossing test, as in
/// the probabilistic model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactRule {
    pub bond: f64,
    pub tolerance: f64,
}

impl ContactRule {
    pub const fn new(bond: f64) -> Self {
        Self {
            bond,
            tolerance: CONTACT_TOLERANCE,
        }
    }

    /// Rule for a deterministic topology; `None` for random lattices.
    pub fn for_topology(topology: Topology, spacing: f64) -> Option<Self> {
        topology.bond_length(spacing).map(Self::new)
    }

    /// Whether two fields are linked under this rule.
    pub fn link_exists(&self, c1: Position, r1: f64, c2: Position, r2: f64) -> bool {
        let d = c1.distance(&c2);
        if r1 != r2 {
            return boundaries_cross(d, r1, r2);
        }
        d <= self.bond + self.tolerance
    }

    /// Whether a maxi field links to another field.
    ///
    /// Maxi fields ignore the bond and link whenever one boundary crosses
    /// the other, equal radii included.
    pub fn fields_cross(&self, c1: Position, r1: f64, c2: Position, r2: f64) -> bool {
        boundaries_cross(c1.distance(&c2), r1, r2)
    }

    /// Whether two fields in different planes sit directly above each other.
    pub fn aligned(&self, c1: Position, c2: Position) -> bool {
        c1.planar_distance(&c2) <= self.tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_lattices_have_no_rule() {
        assert_eq!(ContactRule::for_topology(Topology::Random, 1.0), None);
        let hex = ContactRule::for_topology(Topology::Hexagonal, 3f64.sqrt()).unwrap();
        assert!((hex.bond - 1.0).abs() < 1e-12);
    }

    #[test]
    fn links_nearest_neighbors_only() {
        let rule = ContactRule::for_topology(Topology::Rectangular, 1.0).unwrap();
        let origin = Position::ORIGIN;
        assert!(rule.link_exists(origin, 1.0, Position::planar(1.0, 0.0), 1.0));
        assert!(rule.link_exists(origin, 1.0, Position::planar(1.0005, 0.0), 1.0));
        assert!(!rule.link_exists(origin, 1.0, Position::planar(1.0, 1.0), 1.0));
    }

    #[test]
    fn maxi_fields_use_crossing() {
        let rule = ContactRule::new(1.0);
        let origin = Position::ORIGIN;
        assert!(rule.link_exists(origin, 4.0, Position::planar(3.5, 0.0), 1.0));
        assert!(!rule.link_exists(origin, 4.0, Position::planar(1.0, 0.0), 1.0));
    }

    #[test]
    fn equal_maxi_fields_link_when_overlapping() {
        let rule = ContactRule::new(1.0);
        let origin = Position::ORIGIN;
        assert!(rule.fields_cross(origin, 3.0, Position::planar(2.3, 0.0), 3.0));
        assert!(rule.fields_cross(origin, 3.0, Position::planar(5.9, 0.0), 3.0));
        assert!(!rule.fields_cross(origin, 3.0, Position::planar(6.0, 0.0), 3.0));
        // The bond test alone would reject them.
        assert!(!rule.link_exists(origin, 3.0, Position::planar(2.3, 0.0), 3.0));
    }

    #[test]
    fn alignment_ignores_depth() {
        let rule = ContactRule::new(1.0);
        assert!(rule.aligned(Position::new(0.5, 0.2, 0.0), Position::new(0.5, 0.2, 1.0)));
        assert!(!rule.aligned(Position::new(0.5, 0.2, 0.0), Position::new(1.0, 0.2, 1.0)));
    }
}
