//! Force / acceleration contributors for the singularity field
//!
//! Only the singularity attracts; small bodies never interact with each
//! other, so each term maps (singularity, body position) to one acceleration.

use crate::simulation::states::{NVec2, Singularity};

/// Acceleration source exerted by the singularity on a point
/// Returns `None` when the term declines to act this tick
pub trait Acceleration {
    fn acceleration(&self, source: &Singularity, x: &NVec2) -> Option<NVec2>;
}

/// Pseudo-relativistic (Paczynski-Wiita) gravity
///
/// a = scale * G * M / (r - rs)^2 directed toward the singularity, with
/// rs = 2 G M / C^2 the Schwarzschild radius. The law diverges at rs,
/// so separations within 1% above rs skip the force entirely.
#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct PseudoRelativisticGravity {
    pub G: f64,     // gravitational constant
    pub C: f64,     // speed of light
    pub scale: f64, // strength multiplier
}

impl PseudoRelativisticGravity {
    pub fn schwarzschild_radius(&self, mass: f64) -> f64 {
        2.0 * self.G * mass / (self.C * self.C)
    }
}

impl Acceleration for PseudoRelativisticGravity {
    fn acceleration(&self, source: &Singularity, x: &NVec2) -> Option<NVec2> {
        // d points from the singularity to the body
        let d = x - source.x;
        let r = d.norm();

        let rs = self.schwarzschild_radius(source.m);
        // near-horizon clamp, not absorption
        if r <= rs + 0.01 * rs {
            return None;
        }

        let gap = r - rs;
        let a = self.scale * self.G * source.m / (gap * gap);

        // unit radial vector, pulled inward
        Some(-a * (d / r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::params::{C, G};
    use crate::simulation::states::BodyId;

    fn hole(m: f64) -> Singularity {
        Singularity::new(BodyId(1), NVec2::zeros(), NVec2::zeros(), m)
    }

    fn gravity() -> PseudoRelativisticGravity {
        PseudoRelativisticGravity { G, C, scale: 1.0 }
    }

    #[test]
    fn points_toward_singularity() {
        let g = gravity();
        let m = 1e30;
        // well outside the clamp
        let x = NVec2::new(3.0, 4.0) * g.schwarzschild_radius(m);
        let a = g.acceleration(&hole(m), &x).unwrap();
        assert!(a.dot(&x) < 0.0);
        // parallel to the separation
        assert!((a.x * x.y - a.y * x.x).abs() < 1e-9 * a.norm());
    }

    #[test]
    fn diverges_faster_than_newton_near_horizon() {
        let g = gravity();
        let m = 1e30;
        let rs = g.schwarzschild_radius(m);
        let near = g.acceleration(&hole(m), &NVec2::new(3.0 * rs, 0.0)).unwrap().norm();
        let newton = G * m / (9.0 * rs * rs);
        assert!(near > newton);
        assert!((near - G * m / (4.0 * rs * rs)).abs() / near < 1e-12);
    }

    #[test]
    fn skips_inside_clamp() {
        let g = gravity();
        let m = 1e30;
        let rs = g.schwarzschild_radius(m);
        assert!(g.acceleration(&hole(m), &NVec2::new(1.005 * rs, 0.0)).is_none());
        assert!(g.acceleration(&hole(m), &NVec2::zeros()).is_none());
        assert!(g.acceleration(&hole(m), &NVec2::new(1.02 * rs, 0.0)).is_some());
    }
}
