//! Radial field densities.

/// Density of a field as a function of distance from its own center.
pub trait RadialDensity: Send + Sync {
    fn density(&self, distance: f64) -> f64;
}

/// Constant density across the whole field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniform {
    pub value: f64,
}

impl Uniform {
    /// Density used by the standard field model.
    pub const STANDARD: Self = Self { value: 1.5 };
}

impl Default for Uniform {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl RadialDensity for Uniform {
    #[inline]
    fn density(&self, _distance: f64) -> f64 {
        self.value
    }
}

impl<F> RadialDensity for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn density(&self, distance: f64) -> f64 {
        self(distance)
    }
}
