//! Procedural small-body groups
//!
//! Seven distribution shapes, each turning one [`GroupParams`] into a batch
//! of [`SmallBody`] values that share the group velocity and color:
//!
//! | kind     | layout                                                        |
//! |----------|---------------------------------------------------------------|
//! | disk     | uniform inside a circle (r = R sqrt(u))                       |
//! | spiral   | 30% dense core, rest on logarithmic arms                      |
//! | nebula   | power-law radial density, r = R u^(1/bias)                    |
//! | comet    | 15% nucleus, 85% tail trailing opposite the velocity          |
//! | fractal  | 4 sub-clusters, each a mini disk of radius 0.3 R              |
//! | ring     | annulus R +- 0.15 R                                           |
//! | cross    | two diagonals through the center                              |
//!
//! [`RecipeTable`] picks a kind by cumulative weight, which is how the
//! field replenishes its mass budget.

use std::f64::consts::{PI, TAU};

use rand::Rng;
use serde::Deserialize;

use crate::simulation::params::Parameters;
use crate::simulation::states::{BodyIds, Color, NVec2, SmallBody};

/// Uniform draw in [a, b); degenerate ranges return `a`
pub fn uniform<R: Rng>(rng: &mut R, a: f64, b: f64) -> f64 {
    a + rng.random::<f64>() * (b - a)
}

/// Uniform point inside a disk of `radius` around `center`
fn point_in_disk<R: Rng>(rng: &mut R, center: &NVec2, radius: f64) -> NVec2 {
    let r = radius * rng.random::<f64>().sqrt();
    let theta = rng.random::<f64>() * TAU;
    polar(center, r, theta)
}

fn polar(center: &NVec2, r: f64, theta: f64) -> NVec2 {
    center + NVec2::new(theta.cos() * r, theta.sin() * r)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    Disk,
    Spiral,
    Nebula,
    Comet,
    Fractal,
    Ring,
    Cross,
}

impl GroupKind {
    pub const ALL: [GroupKind; 7] = [
        GroupKind::Disk,
        GroupKind::Spiral,
        GroupKind::Nebula,
        GroupKind::Comet,
        GroupKind::Fractal,
        GroupKind::Ring,
        GroupKind::Cross,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GroupKind::Disk => "disk",
            GroupKind::Spiral => "spiral",
            GroupKind::Nebula => "nebula",
            GroupKind::Comet => "comet",
            GroupKind::Fractal => "fractal",
            GroupKind::Ring => "ring",
            GroupKind::Cross => "cross",
        }
    }

    pub fn default_color(self) -> Color {
        match self {
            GroupKind::Disk => Color(0x00FF00),
            GroupKind::Spiral => Color(0xADE0FF),
            GroupKind::Nebula => Color(0xEFC7FF),
            GroupKind::Comet => Color(0xADF7C2),
            GroupKind::Fractal => Color(0xFFBB00),
            GroupKind::Ring => Color(0xFFFFFF),
            GroupKind::Cross => Color(0xF5FF6E),
        }
    }
}

/// Closed mass interval [min, max] in kg
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassRange {
    pub min: f64,
    pub max: f64,
}

impl MassRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        // u in [0, 1) keeps the draw below max; clamp guards rounding
        uniform(rng, self.min, self.max).max(self.min).min(self.max)
    }

    /// Lowest tenth of the range
    pub fn lower_decile(&self) -> MassRange {
        MassRange::new(self.min, self.min + (self.max - self.min) * 0.1)
    }

    pub fn contains(&self, m: f64) -> bool {
        m >= self.min && m <= self.max
    }
}

/// One-shot description of a group; consumed by [`GroupGenerator::generate`]
#[derive(Debug, Clone)]
pub struct GroupParams {
    pub count: usize,
    pub center: NVec2,
    pub radius: f64,
    pub velocity: NVec2, // shared by every body of the group
    pub color: Color,
    pub arm_count: usize,   // spiral
    pub arm_tightness: f64, // spiral
    pub density_bias: f64,  // nebula, > 0
}

impl GroupParams {
    pub fn new(count: usize, center: NVec2, radius: f64, velocity: NVec2, color: Color) -> Self {
        Self {
            count,
            center,
            radius,
            velocity,
            color,
            arm_count: 2,
            arm_tightness: 2.0,
            density_bias: 1.0,
        }
    }

    /// Random group anywhere in the universe square, sized in screen widths
    pub fn random<R: Rng>(rng: &mut R, p: &Parameters, color: Color) -> Self {
        let ru = p.universe_radius;
        let vmax = p.max_group_speed;

        let count = rng.random_range(20..50);
        let center = NVec2::new(uniform(rng, -ru, ru), uniform(rng, -ru, ru));
        let radius = uniform(rng, p.screen_width * 0.2, p.screen_width * 0.7);
        let velocity = NVec2::new(uniform(rng, -vmax, vmax), uniform(rng, -vmax, vmax));

        Self {
            count,
            center,
            radius,
            velocity,
            color,
            arm_count: if rng.random_bool(0.5) { 2 } else { 4 },
            arm_tightness: uniform(rng, 1.5, 3.0),
            density_bias: uniform(rng, 0.7, 2.0),
        }
    }
}

/// Builds small-body batches for every [`GroupKind`]
#[derive(Debug, Clone)]
pub struct GroupGenerator {
    pub masses: MassRange,
}

impl GroupGenerator {
    pub fn new(masses: MassRange) -> Self {
        Self { masses }
    }

    /// Mass interval every body of `kind` is drawn from
    pub fn declared_masses(&self, kind: GroupKind) -> MassRange {
        match kind {
            GroupKind::Spiral => self.masses.lower_decile(),
            _ => self.masses,
        }
    }

    /// Number of bodies `generate` returns for `count` requested
    pub fn batch_len(kind: GroupKind, count: usize) -> usize {
        match kind {
            GroupKind::Fractal => (count / FRACTAL_CLUSTERS) * FRACTAL_CLUSTERS,
            _ => count,
        }
    }

    pub fn generate<R: Rng>(
        &self,
        kind: GroupKind,
        params: &GroupParams,
        rng: &mut R,
        ids: &mut BodyIds,
    ) -> Vec<SmallBody> {
        let mut batch = Batch {
            params,
            ids,
            bodies: Vec::with_capacity(Self::batch_len(kind, params.count)),
        };

        match kind {
            GroupKind::Disk => self.disk(&mut batch, rng),
            GroupKind::Spiral => self.spiral(&mut batch, rng),
            GroupKind::Nebula => self.nebula(&mut batch, rng),
            GroupKind::Comet => self.comet(&mut batch, rng),
            GroupKind::Fractal => self.fractal(&mut batch, rng),
            GroupKind::Ring => self.ring(&mut batch, rng),
            GroupKind::Cross => self.cross(&mut batch, rng),
        }

        batch.bodies
    }

    fn disk<R: Rng>(&self, b: &mut Batch, rng: &mut R) {
        let p = b.params;
        for _ in 0..p.count {
            let x = point_in_disk(rng, &p.center, p.radius);
            let m = self.masses.sample(rng);
            b.push(x, m);
        }
    }

    fn spiral<R: Rng>(&self, b: &mut Batch, rng: &mut R) {
        let p = b.params;
        let light = self.masses.lower_decile();

        let core_count = (p.count as f64 * 0.3).floor() as usize;
        let core_radius = p.radius * 0.2;
        let arm_bodies = p.count - core_count;
        let arms = p.arm_count.max(1);

        // Core: compact isotropic bulge
        for _ in 0..core_count {
            let x = point_in_disk(rng, &p.center, core_radius);
            let m = light.sample(rng);
            b.push(x, m);
        }

        // Arms: theta = base + tightness * ln(r / R) + jitter
        for _ in 0..arm_bodies {
            let r = uniform(rng, core_radius, p.radius);
            let arm = rng.random_range(0..arms);
            let base = (arm as f64 / arms as f64) * TAU;

            let ratio = if p.radius > 0.0 { r / p.radius } else { 0.0 };
            let jitter = (rng.random::<f64>() - 0.5) * 0.15;
            let theta = base + p.arm_tightness * (ratio + 1e-6).ln() + jitter;

            let m = light.sample(rng);
            b.push(polar(&p.center, r, theta), m);
        }
    }

    fn nebula<R: Rng>(&self, b: &mut Batch, rng: &mut R) {
        let p = b.params;
        let bias = p.density_bias.max(f64::MIN_POSITIVE);
        for _ in 0..p.count {
            let r = p.radius * rng.random::<f64>().powf(1.0 / bias);
            let theta = rng.random::<f64>() * TAU;
            let m = self.masses.sample(rng);
            b.push(polar(&p.center, r, theta), m);
        }
    }

    fn comet<R: Rng>(&self, b: &mut Batch, rng: &mut R) {
        let p = b.params;

        // tail trails opposite the direction of travel
        let heading = p.velocity.y.atan2(p.velocity.x);
        let tail_dir = heading + PI;

        let nucleus_count = (p.count as f64 * 0.15).floor() as usize;
        let tail_count = p.count - nucleus_count;

        for _ in 0..nucleus_count {
            let x = point_in_disk(rng, &p.center, p.radius * 0.15);
            let m = self.masses.sample(rng);
            b.push(x, m);
        }

        for _ in 0..tail_count {
            // t: 0 at the head, 1 at the tail end
            let t = rng.random::<f64>();
            let dist = p.radius * (0.2 + t * t);
            let spread = 0.05 + t * 0.6;
            let angle = tail_dir + (rng.random::<f64>() - 0.5) * spread;
            let lateral = p.radius * 0.05 * (rng.random::<f64>() - 0.5);

            let x = polar(&p.center, dist, angle) + lateral * NVec2::new(-angle.sin(), angle.cos());
            let m = self.masses.sample(rng);
            b.push(x, m);
        }
    }

    fn fractal<R: Rng>(&self, b: &mut Batch, rng: &mut R) {
        let p = b.params;
        let per_cluster = p.count / FRACTAL_CLUSTERS;

        for _ in 0..FRACTAL_CLUSTERS {
            let c = p.center
                + NVec2::new(
                    uniform(rng, -p.radius, p.radius),
                    uniform(rng, -p.radius, p.radius),
                );

            for _ in 0..per_cluster {
                let x = point_in_disk(rng, &c, p.radius * 0.3);
                let m = self.masses.sample(rng);
                b.push(x, m);
            }
        }
    }

    fn ring<R: Rng>(&self, b: &mut Batch, rng: &mut R) {
        let p = b.params;
        let width = p.radius * 0.15;
        for _ in 0..p.count {
            let r = p.radius + uniform(rng, -width, width);
            let theta = rng.random::<f64>() * TAU;
            let m = self.masses.sample(rng);
            b.push(polar(&p.center, r, theta), m);
        }
    }

    fn cross<R: Rng>(&self, b: &mut Batch, rng: &mut R) {
        let p = b.params;
        for _ in 0..p.count {
            let t = uniform(rng, -p.radius, p.radius);
            let diagonal = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            let m = self.masses.sample(rng);
            b.push(p.center + NVec2::new(t, diagonal * t), m);
        }
    }
}

const FRACTAL_CLUSTERS: usize = 4;

/// Accumulates one group's bodies with fresh ids and the shared velocity
struct Batch<'a> {
    params: &'a GroupParams,
    ids: &'a mut BodyIds,
    bodies: Vec<SmallBody>,
}

impl Batch<'_> {
    fn push(&mut self, x: NVec2, m: f64) {
        self.bodies.push(SmallBody {
            id: self.ids.next_id(),
            x,
            v: self.params.velocity,
            m,
            color: self.params.color,
        });
    }
}

/// A group kind with its selection weight and color
#[derive(Debug, Clone)]
pub struct Recipe {
    pub kind: GroupKind,
    pub weight: f64,
    pub color: Color,
}

/// Weighted random choice over recipes (cumulative draw, with replacement)
#[derive(Debug, Clone)]
pub struct RecipeTable {
    recipes: Vec<Recipe>,
    total_weight: f64,
}

impl RecipeTable {
    /// Recipes with negative weights are treated as weight 0.
    pub fn new(recipes: Vec<Recipe>) -> Self {
        let recipes: Vec<Recipe> = recipes
            .into_iter()
            .map(|r| Recipe { weight: r.weight.max(0.0), ..r })
            .collect();
        let total_weight = recipes.iter().map(|r| r.weight).sum();
        Self { recipes, total_weight }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn find(&self, kind: GroupKind) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.kind == kind)
    }

    /// Draw one recipe; `None` only when no recipe has positive weight
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Option<&Recipe> {
        if self.total_weight <= 0.0 {
            return None;
        }

        let mut r = uniform(rng, 0.0, self.total_weight);
        for recipe in self.recipes.iter().filter(|r| r.weight > 0.0) {
            r -= recipe.weight;
            if r <= 0.0 {
                return Some(recipe);
            }
        }

        // rounding left a sliver past the last weight
        self.recipes.iter().rev().find(|r| r.weight > 0.0)
    }
}

impl Default for RecipeTable {
    fn default() -> Self {
        Self::new(
            GroupKind::ALL
                .iter()
                .map(|&kind| Recipe {
                    kind,
                    weight: 1.0,
                    color: kind.default_color(),
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generator() -> GroupGenerator {
        GroupGenerator::new(MassRange::new(1.0, 100.0))
    }

    #[test]
    fn disk_stays_inside_radius() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut ids = BodyIds::new();
        let center = NVec2::new(5.0, -5.0);
        let params = GroupParams::new(200, center, 10.0, NVec2::zeros(), Color::WHITE);
        let bodies = generator().generate(GroupKind::Disk, &params, &mut rng, &mut ids);
        assert!(bodies.iter().all(|b| b.distance_to(&center) <= 10.0 + 1e-9));
    }

    #[test]
    fn ring_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut ids = BodyIds::new();
        let params = GroupParams::new(300, NVec2::zeros(), 100.0, NVec2::zeros(), Color::WHITE);
        let bodies = generator().generate(GroupKind::Ring, &params, &mut rng, &mut ids);
        for b in &bodies {
            let r = b.x.norm();
            assert!((85.0 - 1e-9..=115.0 + 1e-9).contains(&r), "r = {r}");
        }
    }

    #[test]
    fn cross_lies_on_diagonals() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut ids = BodyIds::new();
        let c = NVec2::new(1.0, 2.0);
        let params = GroupParams::new(100, c, 50.0, NVec2::zeros(), Color::WHITE);
        let bodies = generator().generate(GroupKind::Cross, &params, &mut rng, &mut ids);
        for b in &bodies {
            let d = b.x - c;
            assert!((d.x.abs() - d.y.abs()).abs() < 1e-9);
            assert!(d.x.abs() <= 50.0);
        }
    }

    #[test]
    fn comet_tail_trails_velocity() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut ids = BodyIds::new();
        let params = GroupParams::new(400, NVec2::zeros(), 100.0, NVec2::new(1.0, 0.0), Color::WHITE);
        let bodies = generator().generate(GroupKind::Comet, &params, &mut rng, &mut ids);
        // nucleus radius is 15, every tail body sits at >= 20 behind the head
        let behind = bodies.iter().filter(|b| b.x.x < -15.0).count();
        assert_eq!(behind, 400 - 60);
    }

    #[test]
    fn spiral_uses_light_masses() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut ids = BodyIds::new();
        let g = generator();
        let params = GroupParams::new(50, NVec2::zeros(), 10.0, NVec2::zeros(), Color::WHITE);
        let bodies = g.generate(GroupKind::Spiral, &params, &mut rng, &mut ids);
        assert!(bodies.iter().all(|b| b.m <= 1.0 + 99.0 * 0.1));
    }

    #[test]
    fn spiral_arms_follow_log_law() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut ids = BodyIds::new();
        let radius = 100.0;
        let mut params = GroupParams::new(400, NVec2::zeros(), radius, NVec2::zeros(), Color::WHITE);
        params.arm_count = 1;
        params.arm_tightness = 2.5;
        let bodies = generator().generate(GroupKind::Spiral, &params, &mut rng, &mut ids);

        let arm: Vec<_> = bodies.iter().filter(|b| b.x.norm() > 0.2 * radius * (1.0 + 1e-9)).collect();
        assert_eq!(arm.len(), 400 - 120);
        for b in arm {
            let r = b.x.norm();
            let expected = 2.5 * (r / radius + 1e-6).ln();
            let diff = (b.x.y.atan2(b.x.x) - expected + PI).rem_euclid(TAU) - PI;
            // jitter is +-0.075 rad
            assert!(diff.abs() <= 0.075 + 1e-9, "off the arm by {diff}");
        }
    }

    #[test]
    fn nebula_bias_shapes_radial_density() {
        let radius = 100.0;
        // P(r <= R/2) = 2^-bias
        for (bias, expected) in [(2.0, 0.25), (0.5, 0.5f64.sqrt())] {
            let mut rng = StdRng::seed_from_u64(10);
            let mut ids = BodyIds::new();
            let mut params = GroupParams::new(4000, NVec2::zeros(), radius, NVec2::zeros(), Color::WHITE);
            params.density_bias = bias;
            let bodies = generator().generate(GroupKind::Nebula, &params, &mut rng, &mut ids);

            assert!(bodies.iter().all(|b| b.x.norm() <= radius + 1e-9));
            let inner = bodies.iter().filter(|b| b.x.norm() <= radius / 2.0).count() as f64 / 4000.0;
            assert!((inner - expected).abs() < 0.03, "bias {bias}: inner fraction {inner}");
        }
    }

    #[test]
    fn pick_respects_zero_weights() {
        let mut rng = StdRng::seed_from_u64(6);
        let table = RecipeTable::new(vec![
            Recipe { kind: GroupKind::Disk, weight: 0.0, color: Color::WHITE },
            Recipe { kind: GroupKind::Ring, weight: 2.0, color: Color::WHITE },
            Recipe { kind: GroupKind::Cross, weight: 0.0, color: Color::WHITE },
        ]);
        for _ in 0..500 {
            assert_eq!(table.pick(&mut rng).map(|r| r.kind), Some(GroupKind::Ring));
        }
    }

    #[test]
    fn pick_follows_weights() {
        let mut rng = StdRng::seed_from_u64(7);
        let table = RecipeTable::new(vec![
            Recipe { kind: GroupKind::Disk, weight: 1.0, color: Color::WHITE },
            Recipe { kind: GroupKind::Ring, weight: 3.0, color: Color::WHITE },
        ]);
        let rings = (0..10_000)
            .filter(|_| table.pick(&mut rng).map(|r| r.kind) == Some(GroupKind::Ring))
            .count();
        assert!((7_200..7_800).contains(&rings), "rings = {rings}");
    }

    #[test]
    fn empty_table_picks_nothing() {
        let mut rng = StdRng::seed_from_u64(8);
        let table = RecipeTable::new(Vec::new());
        assert!(table.pick(&mut rng).is_none());
    }
}
