//! Hawking-style mass evaporation of the singularity
//!
//! dM/dt = -hbar c^4 / (15360 pi G^2 M^2)
//!
//! The loss rate grows as the mass shrinks, so the integration must use
//! the current mass every step.

use std::f64::consts::PI;

use crate::simulation::states::{LifeState, Singularity};

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct HawkingEvaporation {
    pub G: f64,
    pub C: f64,
    pub HBAR: f64,
}

impl HawkingEvaporation {
    /// hbar c^4 / (15360 pi G^2)
    fn coefficient(&self) -> f64 {
        self.HBAR * self.C.powi(4) / (15360.0 * PI * self.G * self.G)
    }

    /// dM/dt at `mass` (non-positive)
    pub fn rate(&self, mass: f64) -> f64 {
        if mass <= 0.0 {
            return 0.0;
        }
        -self.coefficient() / (mass * mass)
    }

    /// Mass change over `dt`
    pub fn mass_loss(&self, mass: f64, dt: f64) -> f64 {
        self.rate(mass) * dt
    }

    /// Remaining lifetime: 5120 pi G^2 M^3 / (hbar c^4)
    pub fn lifetime(&self, mass: f64) -> f64 {
        if mass <= 0.0 {
            return 0.0;
        }
        5120.0 * PI * self.G * self.G * mass.powi(3) / (self.HBAR * self.C.powi(4))
    }

    /// Evaporate `s` for one step, clamping to zero mass.
    pub fn apply(&self, s: &mut Singularity, dt: f64) -> LifeState {
        s.m += self.mass_loss(s.m, dt);
        if s.m <= 0.0 {
            s.m = 0.0;
            return LifeState::Terminal;
        }
        LifeState::Alive
    }
}
