//! The collection of small bodies orbiting the singularity
//!
//! One field step runs three passes over the bodies:
//! 1. gravity (inside the influence radius) or free drift,
//! 2. absorption by the singularity,
//! 3. wrap at the universe boundary.
//!
//! Absorption compacts the vector in place with `retain_mut`, so every
//! body is visited exactly once and removal stays linear.

use rand::Rng;

use crate::simulation::boundary::UniverseBoundary;
use crate::simulation::forces::Acceleration;
use crate::simulation::generator::{GroupGenerator, GroupKind, GroupParams, RecipeTable};
use crate::simulation::integrator::{drift, semi_implicit_euler};
use crate::simulation::params::Parameters;
use crate::simulation::states::{BodyIds, Singularity, SmallBody};

/// What one field step did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    pub absorbed: usize,
    pub absorbed_mass: f64,
    pub wrapped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SmallBodyField {
    bodies: Vec<SmallBody>,
    total_mass: f64, // running sum of body masses
}

impl SmallBodyField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bodies(&self) -> &[SmallBody] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn total_mass(&self) -> f64 {
        self.total_mass
    }

    pub fn insert(&mut self, body: SmallBody) {
        self.total_mass += body.m;
        self.bodies.push(body);
    }

    pub fn extend(&mut self, batch: Vec<SmallBody>) {
        self.total_mass += batch.iter().map(|b| b.m).sum::<f64>();
        self.bodies.extend(batch);
    }

    /// Add weighted-random groups until the total reaches `target`.
    /// Returns the number of groups added.
    pub fn fill_to<R: Rng>(
        &mut self,
        target: f64,
        recipes: &RecipeTable,
        generator: &GroupGenerator,
        params: &Parameters,
        rng: &mut R,
        ids: &mut BodyIds,
    ) -> usize {
        let mut groups = 0;
        while self.total_mass < target {
            let Some(recipe) = recipes.pick(rng) else {
                break;
            };
            let group = GroupParams::random(rng, params, recipe.color);
            self.extend(generator.generate(recipe.kind, &group, rng, ids));
            groups += 1;
        }
        groups
    }

    /// Add one explicit group
    pub fn spawn_group<R: Rng>(
        &mut self,
        kind: GroupKind,
        group: &GroupParams,
        generator: &GroupGenerator,
        rng: &mut R,
        ids: &mut BodyIds,
    ) -> usize {
        let batch = generator.generate(kind, group, rng, ids);
        let n = batch.len();
        self.extend(batch);
        n
    }

    /// Gravity or free motion for every body.
    ///
    /// `influence_radius` is fixed for the pass; bodies strictly inside it
    /// feel `gravity`, the rest drift.
    pub fn integrate(
        &mut self,
        singularity: &Singularity,
        gravity: &dyn Acceleration,
        influence_radius: f64,
        dt: f64,
    ) {
        for b in self.bodies.iter_mut() {
            if b.distance_to(&singularity.x) < influence_radius {
                // the near-horizon clamp skips the whole update for this tick
                if let Some(a) = gravity.acceleration(singularity, &b.x) {
                    semi_implicit_euler(&mut b.x, &mut b.v, &a, dt);
                }
            } else {
                drift(&mut b.x, &b.v, dt);
            }
        }
    }

    /// Absorb bodies touching the singularity, wrap the survivors.
    ///
    /// A body is absorbed when its distance is strictly less than
    /// `singularity_radius + body radius`; its mass moves to the singularity.
    pub fn absorb_and_wrap(
        &mut self,
        singularity: &mut Singularity,
        singularity_radius: f64,
        boundary: &UniverseBoundary,
        params: &Parameters,
    ) -> StepReport {
        let mut report = StepReport::default();
        let center = singularity.x;

        self.bodies.retain_mut(|b| {
            let reach = singularity_radius + params.body_radius(b.m);
            if b.distance_to(&center) < reach {
                singularity.m += b.m;
                report.absorbed += 1;
                report.absorbed_mass += b.m;
                return false;
            }
            if boundary.wrap(&mut b.x) {
                report.wrapped += 1;
            }
            true
        });

        self.total_mass -= report.absorbed_mass;
        if self.bodies.is_empty() {
            self.total_mass = 0.0;
        }
        report
    }

    /// One full field step against the singularity's state at the start of the step
    pub fn step(
        &mut self,
        singularity: &mut Singularity,
        gravity: &dyn Acceleration,
        boundary: &UniverseBoundary,
        params: &Parameters,
        dt: f64,
    ) -> StepReport {
        let radius = params.display_radius(singularity.m);
        let influence = params.influence_radius(singularity.m);

        self.integrate(singularity, gravity, influence, dt);
        self.absorb_and_wrap(singularity, radius, boundary, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::forces::PseudoRelativisticGravity;
    use crate::simulation::states::{BodyId, Color, NVec2};

    fn body(id: u64, x: NVec2, v: NVec2, m: f64) -> SmallBody {
        SmallBody { id: BodyId(id), x, v, m, color: Color::WHITE }
    }

    fn hole(m: f64) -> Singularity {
        Singularity::new(BodyId(0), NVec2::zeros(), NVec2::zeros(), m)
    }

    #[test]
    fn far_bodies_drift() {
        let p = Parameters::default();
        let mut field = SmallBodyField::new();
        let far = NVec2::new(p.universe_radius * 0.5, 0.0);
        field.insert(body(1, far, NVec2::new(0.0, 10.0), 1.0));

        let mut s = hole(p.reference_mass);
        let g = PseudoRelativisticGravity { G: p.G, C: p.C, scale: p.gravity_scale };
        let boundary = UniverseBoundary::new(p.universe_radius);
        field.step(&mut s, &g, &boundary, &p, 1.0);

        assert_eq!(field.bodies()[0].x, far + NVec2::new(0.0, 10.0));
        assert_eq!(field.bodies()[0].v, NVec2::new(0.0, 10.0));
    }

    #[test]
    fn absorbs_every_touching_body_once() {
        let p = Parameters::default();
        let mut field = SmallBodyField::new();
        for i in 0..10 {
            // even ids sit on the singularity, odd ids far away
            let x = if i % 2 == 0 { NVec2::new(1.0, 0.0) } else { NVec2::new(1e9, 0.0) };
            field.insert(body(i, x, NVec2::zeros(), 10.0 + i as f64));
        }
        let before = field.total_mass();

        let mut s = hole(p.reference_mass);
        let boundary = UniverseBoundary::new(p.universe_radius);
        let radius = p.display_radius(s.m);
        let report = field.absorb_and_wrap(&mut s, radius, &boundary, &p);

        assert_eq!(report.absorbed, 5);
        assert_eq!(field.len(), 5);
        assert!(field.bodies().iter().all(|b| b.id.0 % 2 == 1));
        let absorbed: f64 = [10.0, 12.0, 14.0, 16.0, 18.0].iter().sum();
        assert_eq!(report.absorbed_mass, absorbed);
        assert_eq!(s.m, p.reference_mass + absorbed);
        assert!((field.total_mass() - (before - absorbed)).abs() < 1e-9);
    }

    #[test]
    fn survivors_wrap() {
        let p = Parameters::default();
        let mut field = SmallBodyField::new();
        let outside = NVec2::new(0.0, p.universe_radius + 100.0);
        field.insert(body(1, outside, NVec2::new(1.0, 1.0), 1.0));

        let mut s = hole(p.reference_mass);
        let boundary = UniverseBoundary::new(p.universe_radius);
        let radius = p.display_radius(s.m);
        let report = field.absorb_and_wrap(&mut s, radius, &boundary, &p);

        assert_eq!(report.wrapped, 1);
        let b = &field.bodies()[0];
        assert!((b.x - NVec2::new(0.0, -(p.universe_radius - 100.0))).norm() < 1e-3);
        assert_eq!(b.v, NVec2::new(1.0, 1.0));
    }
}
