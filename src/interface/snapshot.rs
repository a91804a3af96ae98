//! Read-only view of the simulation for the render side
//!
//! A `Snapshot` is an owned copy taken after the latest tick; renderers get
//! it by shared reference once per display frame, however many ticks ran.

use rand::Rng;

use crate::simulation::engine::Simulation;
use crate::simulation::states::{BodyId, Color, LifeState, NVec2};

#[derive(Debug, Clone, PartialEq)]
pub struct SingularityView {
    pub id: BodyId,
    pub mass: f64,
    pub position: NVec2,
    pub velocity: NVec2,
    pub speed_fraction: f64, // |v| / C
    pub radius_ratio: f64,   // display radius over screen width
    pub display_radius: f64, // meters
    pub lifetime: f64,       // estimated seconds left
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyView {
    pub id: BodyId,
    pub position: NVec2,
    pub radius: f64, // mass-derived, meters
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub time: f64,
    pub state: LifeState,
    pub universe_radius: f64,
    pub singularity: SingularityView,
    pub bodies: Vec<BodyView>,
    pub small_body_mass: f64,
}

impl Snapshot {
    pub fn capture<R: Rng>(sim: &Simulation<R>) -> Self {
        let p = sim.params();
        let s = sim.singularity();

        let singularity = SingularityView {
            id: s.id,
            mass: s.m,
            position: s.x,
            velocity: s.v,
            speed_fraction: s.speed() / p.C,
            radius_ratio: p.radius_ratio(s.m),
            display_radius: p.display_radius(s.m),
            lifetime: sim.evaporation().lifetime(s.m),
        };

        let bodies = sim
            .field()
            .bodies()
            .iter()
            .map(|b| BodyView {
                id: b.id,
                position: b.x,
                radius: p.body_radius(b.m),
                color: b.color,
            })
            .collect();

        Self {
            time: sim.time(),
            state: sim.state(),
            universe_radius: p.universe_radius,
            singularity,
            bodies,
            small_body_mass: sim.field().total_mass(),
        }
    }
}

/// Consumer of one snapshot per display frame
pub trait RenderAdapter {
    fn render(&mut self, snapshot: &Snapshot);
}

/// `mm:ss`, seconds rounded
pub fn format_lifetime(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Heads-up text: mass, speed, remaining lifetime, small-body mass
pub fn hud_text(snapshot: &Snapshot) -> String {
    let s = &snapshot.singularity;
    let speed = s.velocity.norm();
    format!(
        "Mass: {:.2} kton\nSpeed: {:.1} m/s ({:.3}c)\nRemaining Lifetime: {}\nTotal SB M: {:.2} kton",
        s.mass / 1e6,
        speed,
        s.speed_fraction,
        format_lifetime(s.lifetime),
        snapshot.small_body_mass / 1e6
    )
}
