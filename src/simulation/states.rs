//! Core state types for the singularity simulation.
//!
//! Defines the 2D state of the two kinds of bodies:
//! - `Singularity` the decaying central point mass
//! - `SmallBody`   a minor mass pulled in and absorbed by the singularity
//!
//! Positions and velocities are `NVec2` in meters and meters per second.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// Unique, monotonically assigned body identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub u64);

/// Hands out body ids in increasing order
#[derive(Debug, Clone)]
pub struct BodyIds {
    next: u64,
}

impl BodyIds {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> BodyId {
        let id = BodyId(self.next);
        self.next += 1;
        id
    }
}

impl Default for BodyIds {
    fn default() -> Self {
        Self::new()
    }
}

/// Color hint for the render side, packed as 0xRRGGBB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xFFFFFF);

    pub fn rgb(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        )
    }
}

/// Singularity life cycle: `Alive` until evaporation drains the mass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeState {
    Alive,
    Terminal,
}

#[derive(Debug, Clone)]
pub struct Singularity {
    pub id: BodyId,
    pub x: NVec2, // position
    pub v: NVec2, // velocity, |v| < C
    pub m: f64,   // mass, >= 0
}

impl Singularity {
    pub fn new(id: BodyId, x: NVec2, v: NVec2, m: f64) -> Self {
        Self { id, x, v, m }
    }

    pub fn speed(&self) -> f64 {
        self.v.norm()
    }
}

#[derive(Debug, Clone)]
pub struct SmallBody {
    pub id: BodyId,
    pub x: NVec2,      // position
    pub v: NVec2,      // velocity
    pub m: f64,        // mass, fixed at creation
    pub color: Color,  // render hint
}

impl SmallBody {
    /// Distance from this body to `point`
    pub fn distance_to(&self, point: &NVec2) -> f64 {
        (self.x - point).norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic() {
        let mut ids = BodyIds::new();
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();
        assert!(a < b && b < c);
    }

    #[test]
    fn color_unpacks_channels() {
        assert_eq!(Color(0xADF7C2).rgb(), (0xAD, 0xF7, 0xC2));
    }
}
