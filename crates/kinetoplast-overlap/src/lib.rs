//! Kinetoplast Overlap
//!
//! Decides whether two probability fields are linked.
//!
//! Standard fields of equal radius link with a probability equal to the
//! share of field 1's density that falls inside field 2, computed by
//! numerical integration over the lens (2D) or lens volume (3D). Maxi fields
//! of a different radius link deterministically when their boundaries
//! cross. Regular lattices skip integration entirely and use a
//! [`ContactRule`].
//!
//! Every evaluation returns an [`Estimate`] that records which path decided
//! it, including the closed-form fallback taken when integration degenerates.

mod analytic;
mod contact;
mod density;
mod model;
mod quadrature;

pub use analytic::{ball_volume, disc_area, lens_area, lens_volume};
pub use contact::{ContactRule, CONTACT_TOLERANCE};
pub use density::{RadialDensity, Uniform};
pub use model::{boundaries_cross, Dimension, Estimate, OverlapModel};
pub use quadrature::{adaptive_simpson, gauss_legendre};
