//! Circular wrap-around universe
//!
//! A point that leaves the disk by `overflow` meters re-enters on the
//! opposite ray at `radius - overflow`. Velocity is untouched.

use crate::simulation::states::NVec2;

#[derive(Debug, Clone, Copy)]
pub struct UniverseBoundary {
    pub radius: f64,
}

impl UniverseBoundary {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    pub fn contains(&self, x: &NVec2) -> bool {
        x.norm() <= self.radius
    }

    /// Wrap `x` through the center if it lies outside. Returns whether it moved.
    ///
    /// The origin is always inside (radius > 0), so the direction is never
    /// normalized from a zero vector.
    pub fn wrap(&self, x: &mut NVec2) -> bool {
        if self.contains(x) {
            return false;
        }
        let r = x.norm();

        let overflow = r - self.radius;
        let u = *x / r;
        *x = -u * (self.radius - overflow);
        true
    }
}
