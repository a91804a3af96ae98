//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a `Scenario`
//! holding a ready-to-run `Simulation`:
//! - runtime parameters (`Parameters`)
//! - the singularity at t = 0
//! - the recipe table and the explicit initial group
//! - the small-body field, already seeded up to its mass budget
//! - the replenishment policy

use crate::configuration::config::{ConfigError, ScenarioConfig};
use crate::simulation::engine::{InitialGroup, ReplenishPolicy, Simulation};
use crate::simulation::generator::{Recipe, RecipeTable};
use crate::simulation::states::{Color, NVec2};

/// Runtime bundle constructed from a [`ScenarioConfig`]
pub struct Scenario {
    pub simulation: Simulation,
    pub seed: Option<u64>,       // `None` when seeded from the OS
    pub thrust_repeat: f64,      // seconds between held-thrust pulses
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;

        // Parameters (runtime) from the config sections
        let parameters = cfg.to_parameters();
        let c = parameters.C;
        let sw = parameters.screen_width;

        // Singularity at t = 0, velocity given as a fraction of C
        let s_cfg = &cfg.singularity;
        let x = NVec2::new(s_cfg.x[0], s_cfg.x[1]);
        let v = NVec2::new(s_cfg.v_c[0] * c, s_cfg.v_c[1] * c);

        // Recipes: configured color or the kind's default
        let recipes = RecipeTable::new(
            cfg.generators
                .iter()
                .map(|g| Recipe {
                    kind: g.kind,
                    weight: g.weight,
                    color: g.color.map(Color).unwrap_or_else(|| g.kind.default_color()),
                })
                .collect(),
        );

        let g_cfg = &cfg.field.initial_group;
        let initial_group = InitialGroup {
            kind: g_cfg.kind,
            count: g_cfg.count,
            offset: NVec2::new(g_cfg.offset_screens[0] * sw, g_cfg.offset_screens[1] * sw),
            radius: g_cfg.radius_screens * sw,
            velocity: NVec2::new(g_cfg.v_c[0] * c, g_cfg.v_c[1] * c),
        };

        let thrust_repeat = parameters.thrust_repeat;
        let seed = cfg.engine.seed;
        let mut simulation = match seed {
            Some(seed) => Simulation::seeded(parameters, x, v, s_cfg.mass, seed),
            None => Simulation::unseeded(parameters, x, v, s_cfg.mass),
        }
        .with_recipes(recipes)
        .with_initial_group(initial_group);

        simulation.set_replenishment(ReplenishPolicy {
            enabled: cfg.engine.replenish,
            tolerance: cfg.engine.replenish_tolerance,
        });
        simulation.seed_initial_population();

        log::info!(
            "scenario ready: {} small bodies, singularity {:.4e} kg at {:.3}c",
            simulation.field().len(),
            simulation.singularity().m,
            simulation.singularity().speed() / c
        );

        Ok(Self {
            simulation,
            seed,
            thrust_repeat,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::generator::GroupKind;

    #[test]
    fn builds_seeded_field_from_defaults() {
        let mut cfg = ScenarioConfig::default();
        cfg.engine.seed = Some(3);
        let scenario = Scenario::build_scenario(cfg).unwrap();
        let sim = &scenario.simulation;

        assert!(!sim.field().is_empty());
        // fill stops once the budget is met
        assert!(sim.field().total_mass() >= sim.params().target_mass);
        assert!((sim.singularity().speed() / sim.params().C - 0.1).abs() < 1e-12);
        assert_eq!(sim.recipes().recipes().len(), GroupKind::ALL.len());
        assert_eq!(sim.replenishment(), ReplenishPolicy::default());
    }

    #[test]
    fn replenish_settings_reach_the_simulation() {
        let mut cfg = ScenarioConfig::default();
        cfg.engine.seed = Some(4);
        cfg.engine.replenish = true;
        cfg.engine.replenish_tolerance = 0.5;
        let scenario = Scenario::build_scenario(cfg).unwrap();
        assert_eq!(
            scenario.simulation.replenishment(),
            ReplenishPolicy { enabled: true, tolerance: 0.5 }
        );
    }

    #[test]
    fn same_seed_same_field() {
        let build = || {
            let mut cfg = ScenarioConfig::default();
            cfg.engine.seed = Some(11);
            Scenario::build_scenario(cfg).unwrap()
        };
        let a = build();
        let b = build();
        assert_eq!(a.simulation.field().len(), b.simulation.field().len());
        assert_eq!(a.simulation.snapshot(), b.simulation.snapshot());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut cfg = ScenarioConfig::default();
        cfg.singularity.mass = -1.0;
        assert!(Scenario::build_scenario(cfg).is_err());
    }
}
