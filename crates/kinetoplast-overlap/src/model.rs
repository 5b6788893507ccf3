//! Link probability between two fields.
//!
//! # Regimes
//!
//! For centers `d` apart with radii `r1` and `r2`:
//!
//! - `d >= r1 + r2`: the fields are disjoint and never link.
//! - `r1 != r2`: a maxi field. The link is deterministic and exists iff one
//!   boundary crosses the other, `|r1 - r2| <= d < r1 + r2`.
//! - `r1 == r2`: the density of field 1 integrated over the intersection,
//!   divided by its integral over the whole of field 1.
//!
//! The integral splits where the two boundaries meet. In the plane that is
//! the half-angle `acos((r1² + d² - r2²) / (2 r1 d))` seen from center 1;
//! in space it is the plane `z = (r1² + d² - r2²) / (2d)` along the axis
//! joining the centers. When that split is undefined (coincident centers)
//! one field contains the other and the smaller one is integrated whole.
//! A non-finite integral falls back to the closed-form uniform measure.

use std::f64::consts::PI;

use kinetoplast_lattice::Position;
use rand::Rng;

use crate::analytic::{ball_volume, disc_area, lens_area, lens_volume};
use crate::density::{RadialDensity, Uniform};
use crate::quadrature::{adaptive_simpson, gauss_legendre};

/// Whether fields are discs or balls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dimension {
    #[default]
    Planar,
    Spatial,
}

/// Outcome of a link evaluation, recording how it was reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Estimate {
    /// Centers too far apart to overlap.
    Disjoint,
    /// Unequal radii: whether the boundaries cross.
    Crossing(bool),
    /// Probability from numerical integration.
    Integrated(f64),
    /// Integration was degenerate; closed-form uniform measure used instead.
    Fallback(f64),
}

impl Estimate {
    /// Link probability in `[0, 1]`.
    pub fn probability(&self) -> f64 {
        match *self {
            Estimate::Disjoint | Estimate::Crossing(false) => 0.0,
            Estimate::Crossing(true) => 1.0,
            Estimate::Integrated(p) | Estimate::Fallback(p) => p,
        }
    }

    /// True when no random draw is needed to decide the link.
    pub fn is_deterministic(&self) -> bool {
        matches!(self, Estimate::Disjoint | Estimate::Crossing(_))
    }
}

/// Boundary-crossing test for fields of different sizes.
pub fn boundaries_cross(d: f64, r1: f64, r2: f64) -> bool {
    (r1 - r2).abs() <= d && d < r1 + r2
}

/// Overlap probability model over a radial density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapModel<D = Uniform> {
    dimension: Dimension,
    density: D,
}

impl OverlapModel<Uniform> {
    /// Uniform standard density in the given dimension.
    pub fn new(dimension: Dimension) -> Self {
        Self::with_density(dimension, Uniform::STANDARD)
    }

    pub fn planar() -> Self {
        Self::new(Dimension::Planar)
    }

    pub fn spatial() -> Self {
        Self::new(Dimension::Spatial)
    }
}

impl<D: RadialDensity> OverlapModel<D> {
    pub fn with_density(dimension: Dimension, density: D) -> Self {
        Self { dimension, density }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Evaluate the pair, reporting which regime decided it.
    pub fn estimate(&self, c1: Position, r1: f64, c2: Position, r2: f64) -> Estimate {
        let d = match self.dimension {
            Dimension::Planar => c1.planar_distance(&c2),
            Dimension::Spatial => c1.distance(&c2),
        };
        if d >= r1 + r2 {
            return Estimate::Disjoint;
        }
        if r1 != r2 {
            return Estimate::Crossing(boundaries_cross(d, r1, r2));
        }

        let (overlap, full) = match self.dimension {
            Dimension::Planar => (self.planar_overlap(d, r1, r2), self.planar_total(r1)),
            Dimension::Spatial => (self.spatial_overlap(d, r1, r2), self.spatial_total(r1)),
        };
        let p = overlap / full;
        if p.is_finite() {
            Estimate::Integrated(p.clamp(0.0, 1.0))
        } else {
            Estimate::Fallback(self.analytic(d, r1, r2))
        }
    }

    /// Probability that the two fields are linked.
    pub fn link_probability(&self, c1: Position, r1: f64, c2: Position, r2: f64) -> f64 {
        self.estimate(c1, r1, c2, r2).probability()
    }

    /// Decide a link, drawing one uniform number only when the estimate is
    /// probabilistic. Linked iff the draw is at most the probability.
    pub fn are_linked<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        c1: Position,
        r1: f64,
        c2: Position,
        r2: f64,
    ) -> bool {
        match self.estimate(c1, r1, c2, r2) {
            Estimate::Disjoint => false,
            Estimate::Crossing(linked) => linked,
            Estimate::Integrated(p) | Estimate::Fallback(p) => rng.gen::<f64>() <= p,
        }
    }

    fn analytic(&self, d: f64, r1: f64, r2: f64) -> f64 {
        let ratio = match self.dimension {
            Dimension::Planar => lens_area(d, r1, r2) / disc_area(r1),
            Dimension::Spatial => lens_volume(d, r1, r2) / ball_volume(r1),
        };
        ratio.clamp(0.0, 1.0)
    }

    /// Field 1's density over the whole of field 1.
    fn planar_total(&self, r1: f64) -> f64 {
        2.0 * PI * gauss_legendre(|s| self.density.density(s) * s, 0.0, r1)
    }

    fn spatial_total(&self, r1: f64) -> f64 {
        4.0 * PI * gauss_legendre(|s| self.density.density(s) * s * s, 0.0, r1)
    }

    /// Field 1's density over the intersection, in polar coordinates about
    /// center 1 with center 2 on the positive x axis.
    fn planar_overlap(&self, d: f64, r1: f64, r2: f64) -> f64 {
        // Radial extent of field 2 along the ray at angle t.
        let span = |t: f64| {
            let along = d * t.cos();
            let across = (r2 * r2 - (d * t.sin()).powi(2)).max(0.0).sqrt();
            ((along - across).max(0.0), along + across)
        };
        let ring = |lo: f64, hi: f64| {
            if hi <= lo {
                0.0
            } else {
                gauss_legendre(|s| self.density.density(s) * s, lo, hi)
            }
        };
        let reach = if d > r2 { (r2 / d).asin() } else { PI };

        let split = ((r1 * r1 + d * d - r2 * r2) / (2.0 * r1 * d)).acos();
        if split.is_nan() {
            // One field contains the other.
            if d + r1 <= r2 {
                return self.planar_total(r1);
            }
            return 2.0
                * adaptive_simpson(
                    |t| {
                        let (lo, hi) = span(t);
                        ring(lo, hi)
                    },
                    0.0,
                    reach,
                );
        }
        let split = split.min(reach);

        // Inside the split the ray leaves field 1 first, outside it leaves field 2.
        let inside = adaptive_simpson(|t| ring(span(t).0, r1), 0.0, split);
        let outside = adaptive_simpson(
            |t| {
                let (lo, hi) = span(t);
                ring(lo, hi.min(r1))
            },
            split,
            reach,
        );
        2.0 * (inside + outside)
    }

    /// Field 1's density over the intersection, in cylindrical coordinates
    /// about the axis from center 1 to center 2.
    fn spatial_overlap(&self, d: f64, r1: f64, r2: f64) -> f64 {
        let disc = |z: f64, rim: f64| {
            if rim <= 0.0 {
                0.0
            } else {
                2.0 * PI
                    * gauss_legendre(|rho| self.density.density(z.hypot(rho)) * rho, 0.0, rim)
            }
        };
        let rim1 = |z: f64| (r1 * r1 - z * z).max(0.0).sqrt();
        let rim2 = |z: f64| (r2 * r2 - (z - d).powi(2)).max(0.0).sqrt();

        let plane = (r1 * r1 + d * d - r2 * r2) / (2.0 * d);
        if plane.is_nan() || d + r2.min(r1) <= r1.max(r2) {
            if r1 <= r2 {
                return self.spatial_total(r1);
            }
            return adaptive_simpson(|z| disc(z, rim2(z)), d - r2, d + r2);
        }

        // Below the plane the cross-section is bounded by field 2, above it by field 1.
        let near = adaptive_simpson(|z| disc(z, rim2(z)), (d - r2).max(-r1), plane);
        let far = adaptive_simpson(|z| disc(z, rim1(z)), plane, r1);
        near + far
    }
}

impl Default for OverlapModel<Uniform> {
    fn default() -> Self {
        Self::planar()
    }
}
