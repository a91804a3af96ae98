//! Runtime simulation context
//!
//! `Simulation` owns the singularity, the small-body field, the physics
//! models and the fixed-step clock. Each physics tick runs, in order:
//! evaporation, singularity drift + wrap, field gravity/drift, absorption,
//! boundary wrap and, when enabled, replenishment of the field.
//!
//! Thrust is the only mutation allowed between ticks. Both go through
//! `&mut self`, so a thrust pulse can never interleave with a tick; callers
//! sharing a simulation across threads put the whole value behind one lock.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::interface::snapshot::Snapshot;
use crate::simulation::boundary::UniverseBoundary;
use crate::simulation::clock::FixedStepClock;
use crate::simulation::evaporation::HawkingEvaporation;
use crate::simulation::field::{SmallBodyField, StepReport};
use crate::simulation::forces::PseudoRelativisticGravity;
use crate::simulation::generator::{GroupGenerator, GroupKind, GroupParams, MassRange, RecipeTable};
use crate::simulation::integrator::drift;
use crate::simulation::params::Parameters;
use crate::simulation::states::{BodyIds, LifeState, NVec2, Singularity};
use crate::simulation::thrust::{ThrustModel, ThrustOutcome, ThrustRejection};

/// Mid-run top-up of the small-body field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplenishPolicy {
    pub enabled: bool,
    pub tolerance: f64, // refill once the field drops below tolerance * target
}

impl Default for ReplenishPolicy {
    fn default() -> Self {
        Self { enabled: false, tolerance: 0.95 }
    }
}

/// The explicit group placed near the singularity before random seeding
#[derive(Debug, Clone)]
pub struct InitialGroup {
    pub kind: GroupKind,
    pub count: usize,
    pub offset: NVec2, // from the singularity, meters
    pub radius: f64,
    pub velocity: NVec2,
}

impl InitialGroup {
    /// A comet sweeping past the singularity's starting point
    pub fn comet(p: &Parameters) -> Self {
        let v0 = 0.1 * p.C;
        Self {
            kind: GroupKind::Comet,
            count: 200,
            offset: NVec2::new(-0.5 * p.screen_width, -0.1 * p.screen_width),
            radius: 0.1 * p.screen_width,
            velocity: NVec2::new(1.9 * v0, -0.02 * v0),
        }
    }
}

pub struct Simulation<R: Rng = StdRng> {
    params: Parameters,
    singularity: Singularity,
    field: SmallBodyField,
    gravity: PseudoRelativisticGravity,
    evaporation: HawkingEvaporation,
    thrust: ThrustModel,
    boundary: UniverseBoundary,
    generator: GroupGenerator,
    recipes: RecipeTable,
    initial_group: InitialGroup,
    replenish: ReplenishPolicy,
    clock: FixedStepClock,
    ids: BodyIds,
    rng: R,
    state: LifeState,
    t: f64,      // simulated time
    ticks: u64,
}

impl Simulation<StdRng> {
    /// Simulation drawing from OS entropy
    pub fn unseeded(params: Parameters, x: NVec2, v: NVec2, mass: f64) -> Self {
        Self::new(params, x, v, mass, StdRng::from_os_rng())
    }

    pub fn seeded(params: Parameters, x: NVec2, v: NVec2, mass: f64, seed: u64) -> Self {
        Self::new(params, x, v, mass, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    /// Empty field, singularity alive at `x` with velocity `v`
    pub fn new(params: Parameters, x: NVec2, v: NVec2, mass: f64, rng: R) -> Self {
        let mut ids = BodyIds::new();
        let singularity = Singularity::new(ids.next_id(), x, v, mass);
        let state = if mass > 0.0 { LifeState::Alive } else { LifeState::Terminal };

        Self {
            gravity: PseudoRelativisticGravity {
                G: params.G,
                C: params.C,
                scale: params.gravity_scale,
            },
            evaporation: HawkingEvaporation {
                G: params.G,
                C: params.C,
                HBAR: params.HBAR,
            },
            thrust: ThrustModel {
                ejection_mass: params.ejection_mass,
                C: params.C,
            },
            boundary: UniverseBoundary::new(params.universe_radius),
            generator: GroupGenerator::new(MassRange::new(params.min_body_mass, params.max_body_mass)),
            recipes: RecipeTable::default(),
            initial_group: InitialGroup::comet(&params),
            replenish: ReplenishPolicy::default(),
            clock: FixedStepClock::new(params.h0),
            field: SmallBodyField::new(),
            singularity,
            ids,
            rng,
            state,
            t: 0.0,
            ticks: 0,
            params,
        }
    }

    pub fn with_recipes(mut self, recipes: RecipeTable) -> Self {
        self.recipes = recipes;
        self
    }

    pub fn with_initial_group(mut self, group: InitialGroup) -> Self {
        self.initial_group = group;
        self
    }

    pub fn set_replenishment(&mut self, policy: ReplenishPolicy) {
        self.replenish = policy;
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn singularity(&self) -> &Singularity {
        &self.singularity
    }

    pub fn field(&self) -> &SmallBodyField {
        &self.field
    }

    pub fn evaporation(&self) -> &HawkingEvaporation {
        &self.evaporation
    }

    pub fn recipes(&self) -> &RecipeTable {
        &self.recipes
    }

    pub fn replenishment(&self) -> ReplenishPolicy {
        self.replenish
    }

    pub fn state(&self) -> LifeState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state == LifeState::Terminal
    }

    /// Simulated seconds elapsed
    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Place the explicit initial group, then random groups up to the mass budget.
    /// Returns the number of bodies added.
    pub fn seed_initial_population(&mut self) -> usize {
        let before = self.field.len();

        let group = &self.initial_group;
        let color = self
            .recipes
            .find(group.kind)
            .map(|r| r.color)
            .unwrap_or_else(|| group.kind.default_color());
        let params = GroupParams::new(
            group.count,
            self.singularity.x + group.offset,
            group.radius,
            group.velocity,
            color,
        );
        self.field
            .spawn_group(group.kind, &params, &self.generator, &mut self.rng, &mut self.ids);

        let groups = self.field.fill_to(
            self.params.target_mass,
            &self.recipes,
            &self.generator,
            &self.params,
            &mut self.rng,
            &mut self.ids,
        );

        let added = self.field.len() - before;
        log::info!(
            "seeded {} small bodies ({} random groups), total mass {:.3e} kg",
            added,
            groups,
            self.field.total_mass()
        );
        added
    }

    /// Add one explicit group to the field; returns the bodies added
    pub fn spawn_group(&mut self, kind: GroupKind, group: &GroupParams) -> usize {
        self.field
            .spawn_group(kind, group, &self.generator, &mut self.rng, &mut self.ids)
    }

    /// Top up the field when it falls below the tolerance fraction of the budget.
    /// Returns the number of groups added.
    pub fn replenish_if_needed(&mut self) -> usize {
        let target = self.params.target_mass;
        if self.field.total_mass() >= target * self.replenish.tolerance {
            return 0;
        }

        let groups = self.field.fill_to(
            target,
            &self.recipes,
            &self.generator,
            &self.params,
            &mut self.rng,
            &mut self.ids,
        );
        log::debug!("replenished field with {} groups at t = {:.3} s", groups, self.t);
        groups
    }

    /// Feed one display-frame delta; runs as many fixed ticks as are due.
    /// Returns the number of ticks executed.
    pub fn advance(&mut self, frame_dt: f64) -> usize {
        if self.is_terminal() {
            return 0;
        }
        if frame_dt > 1.0 {
            log::warn!("long frame of {:.3} s, catching up physics", frame_dt);
        }

        self.clock.accumulate(frame_dt);

        let mut n = 0;
        while !self.is_terminal() && self.clock.pop_step() {
            if self.tick().is_some() {
                n += 1;
            }
        }
        n
    }

    /// One fixed physics step. `None` once the singularity is gone.
    pub fn tick(&mut self) -> Option<StepReport> {
        if self.is_terminal() {
            return None;
        }

        let dt = self.clock.step();
        self.t += dt;
        self.ticks += 1;

        if self.evaporation.apply(&mut self.singularity, dt) == LifeState::Terminal {
            self.enter_terminal();
            return Some(StepReport::default());
        }

        drift(&mut self.singularity.x, &self.singularity.v, dt);
        self.boundary.wrap(&mut self.singularity.x);

        let report = self.field.step(
            &mut self.singularity,
            &self.gravity,
            &self.boundary,
            &self.params,
            dt,
        );
        if report.absorbed > 0 {
            log::debug!(
                "absorbed {} bodies ({:.3e} kg) at t = {:.3} s",
                report.absorbed,
                report.absorbed_mass,
                self.t
            );
        }

        if self.replenish.enabled {
            self.replenish_if_needed();
        }

        Some(report)
    }

    /// One thrust pulse along an axis-aligned unit vector
    pub fn apply_thrust(&mut self, dir: &NVec2) -> ThrustOutcome {
        if self.is_terminal() {
            return ThrustOutcome::Rejected(ThrustRejection::Terminal);
        }

        let outcome = self.thrust.apply(&mut self.singularity, dir);
        if let ThrustOutcome::Rejected(reason) = outcome {
            log::debug!("thrust rejected: {:?}", reason);
        }
        outcome
    }

    /// Read-only view for the render side
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    fn enter_terminal(&mut self) {
        self.state = LifeState::Terminal;
        self.clock.clear();
        log::info!("singularity evaporated at t = {:.3} s after {} ticks", self.t, self.ticks);
    }
}
