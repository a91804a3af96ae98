//! Mass-ejection thrust with relativistic recoil
//!
//! Each accepted pulse ejects a fixed mass quantum dm as radiation carrying
//! momentum p = dm * C. The recoil u = p / M is composed with the velocity
//! component along the thrust axis by relativistic velocity addition:
//!
//!   v'|| = (v|| + u) / (1 + v|| u / C^2)
//!
//! The orthogonal component is left alone.

use crate::simulation::states::{NVec2, Singularity};

/// Relative gap kept between the speed and C after a pulse
pub const SPEED_MARGIN: f64 = 1e-9;

/// Axis-aligned thrust directions (world y grows upward)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrustDirection {
    Left,
    Right,
    Up,
    Down,
}

impl ThrustDirection {
    pub fn unit(self) -> NVec2 {
        match self {
            ThrustDirection::Left => NVec2::new(-1.0, 0.0),
            ThrustDirection::Right => NVec2::new(1.0, 0.0),
            ThrustDirection::Up => NVec2::new(0.0, 1.0),
            ThrustDirection::Down => NVec2::new(0.0, -1.0),
        }
    }
}

/// Why a thrust pulse was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrustRejection {
    ZeroDirection,
    NotAxisAligned,
    InsufficientMass,
    Terminal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThrustOutcome {
    /// Pulse accepted; `dv` is the change of the parallel velocity component
    Applied { dv: f64 },
    Rejected(ThrustRejection),
}

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct ThrustModel {
    pub ejection_mass: f64, // dm per pulse
    pub C: f64,
}

impl ThrustModel {
    /// Check that `dir` is an axis-aligned unit vector
    pub fn validate(dir: &NVec2) -> Result<(), ThrustRejection> {
        if dir.x == 0.0 && dir.y == 0.0 {
            return Err(ThrustRejection::ZeroDirection);
        }
        let unit_x = dir.x.abs() == 1.0 && dir.y == 0.0;
        let unit_y = dir.y.abs() == 1.0 && dir.x == 0.0;
        if !(unit_x || unit_y) {
            return Err(ThrustRejection::NotAxisAligned);
        }
        Ok(())
    }

    /// Apply one pulse along `dir` to `s`
    pub fn apply(&self, s: &mut Singularity, dir: &NVec2) -> ThrustOutcome {
        if let Err(reason) = Self::validate(dir) {
            return ThrustOutcome::Rejected(reason);
        }
        if s.m <= self.ejection_mass {
            return ThrustOutcome::Rejected(ThrustRejection::InsufficientMass);
        }

        s.m -= self.ejection_mass;

        // recoil momentum of the ejected radiation
        let p = self.ejection_mass * self.C;

        // split velocity into parts along and across the thrust axis
        let v_par = s.v.dot(dir);
        let v_perp = s.v - v_par * *dir;

        let u = p / s.m;
        let c2 = self.C * self.C;
        let mut v_par_new = (v_par + u) / (1.0 + v_par * u / c2);

        // keep |v| strictly below C once rounding catches up with the limit,
        // without ever pulling v|| back against the thrust
        let limit = self.C * (1.0 - SPEED_MARGIN);
        let perp2 = v_perp.norm_squared();
        if perp2 + v_par_new * v_par_new >= limit * limit {
            let cap = (limit * limit - perp2).max(0.0).sqrt();
            v_par_new = v_par_new.min(cap).max(v_par);
        }

        let dv = v_par_new - v_par;
        s.v += dv * *dir;

        ThrustOutcome::Applied { dv }
    }
}
