//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]      – physics rate, thrust repeat, replenishment, RNG seed
//! - [`ParametersConfig`]  – physical constants and scales
//! - [`SingularityConfig`] – initial state of the singularity
//! - [`FieldConfig`]       – small-body budget, masses and the initial group
//! - [`GeneratorConfig`]   – weight and color of each group kind
//! - [`ScenarioConfig`]    – top-level wrapper used to load a scenario from YAML
//!
//! Every section and field is optional; missing values fall back to the
//! game's defaults.
//!
//! # YAML format
//! ```yaml
//! engine:
//!   physics_fps: 40.0
//!   thrust_repeat_ms: 50.0
//!   replenish: false        # top up the field mid-run
//!   replenish_tolerance: 0.95
//!   seed: 42                # omit for an unseeded run
//!
//! parameters:
//!   G: 6.6743e-11
//!   C: 299792458.0
//!   HBAR: 1.054571817e-34
//!   gravity_scale: 1.0e27
//!   screen_width: 1.49896e8 # meters per screen width
//!   universe_screens: 60.0  # universe diameter in screen widths
//!
//! singularity:
//!   mass: 1.52786e6
//!   x: [0.0, 0.0]
//!   v_c: [0.1, 0.0]         # velocity as a fraction of C
//!
//! field:
//!   target_mass: 500.0      # in units of the singularity's starting mass
//!   min_mass: 0.001
//!   max_mass: 0.05
//!
//! generators:
//!   - { kind: disk, weight: 1.0 }
//!   - { kind: ring, weight: 2.0, color: 0xFFFFFF }
//! ```

use serde::Deserialize;
use thiserror::Error;

use crate::simulation::generator::GroupKind;
use crate::simulation::params::{Parameters, C, G, HBAR, M0, SCREEN_WIDTH_METERS};
use crate::simulation::thrust::SPEED_MARGIN;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse scenario: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
    #[error("{name} must lie in [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f64 },
    #[error("initial singularity speed {speed_c}c must stay below the thrust speed limit")]
    Superluminal { speed_c: f64 },
    #[error("small-body mass range [{min}, {max}] is inverted")]
    InvertedMassRange { min: f64, max: f64 },
    #[error("generator {kind} has negative weight {weight}")]
    NegativeWeight { kind: &'static str, weight: f64 },
    #[error("at least one generator needs a positive weight")]
    NoGeneratorWeight,
}

/// Global engine options
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub physics_fps: f64,         // fixed physics ticks per second
    pub thrust_repeat_ms: f64,    // repeat interval while thrust is held
    pub replenish: bool,          // top up the field mid-run
    pub replenish_tolerance: f64, // refill below this fraction of the budget
    pub seed: Option<u64>,        // deterministic seed, `None` draws from the OS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            physics_fps: 40.0,
            thrust_repeat_ms: 50.0,
            replenish: false,
            replenish_tolerance: 0.95,
            seed: None,
        }
    }
}

/// Physical constants and scales
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub G: f64,
    pub C: f64,
    pub HBAR: f64,
    pub gravity_scale: f64,        // multiplier on pseudo-relativistic gravity
    pub screen_width: f64,         // meters per screen width
    pub universe_screens: f64,     // universe diameter in screen widths
    pub initial_radius_ratio: f64, // singularity display radius / screen width at the starting mass
    pub influence_mult: f64,       // gravity reach in singularity display radii
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            G,
            C,
            HBAR,
            gravity_scale: 1e27,
            screen_width: SCREEN_WIDTH_METERS,
            universe_screens: 60.0,
            initial_radius_ratio: 0.03,
            influence_mult: 5.0,
        }
    }
}

/// Initial singularity state
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SingularityConfig {
    pub mass: f64,     // kg
    pub x: [f64; 2],   // meters
    pub v_c: [f64; 2], // fraction of C
    pub ejection: f64, // thrust mass quantum, fraction of `mass`
}

impl Default for SingularityConfig {
    fn default() -> Self {
        Self {
            mass: M0,
            x: [0.0, 0.0],
            v_c: [0.1, 0.0],
            ejection: 0.01,
        }
    }
}

/// The explicit group placed before random seeding
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct InitialGroupConfig {
    pub kind: GroupKind,
    pub count: usize,
    pub offset_screens: [f64; 2], // from the singularity, screen widths
    pub radius_screens: f64,
    pub v_c: [f64; 2],            // fraction of C
}

impl Default for InitialGroupConfig {
    fn default() -> Self {
        Self {
            kind: GroupKind::Comet,
            count: 200,
            offset_screens: [-0.5, -0.1],
            radius_screens: 0.1,
            v_c: [0.19, -0.002],
        }
    }
}

/// Small-body field; masses are in units of the singularity's starting mass
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct FieldConfig {
    pub target_mass: f64,
    pub min_mass: f64,
    pub max_mass: f64,
    pub max_speed_c: f64, // bound on random group velocity components, fraction of C
    pub density: f64,     // kg/m^3, sets the body radius
    pub initial_group: InitialGroupConfig,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            target_mass: 500.0,
            min_mass: 0.001,
            max_mass: 0.05,
            max_speed_c: 0.001,
            density: 1e-14,
            initial_group: InitialGroupConfig::default(),
        }
    }
}

/// Weight and color of one group kind
#[derive(Deserialize, Debug, Clone)]
pub struct GeneratorConfig {
    pub kind: GroupKind,
    pub weight: f64,
    pub color: Option<u32>, // 0xRRGGBB, defaults per kind
}

fn default_generators() -> Vec<GeneratorConfig> {
    GroupKind::ALL
        .iter()
        .map(|&kind| GeneratorConfig { kind, weight: 1.0, color: None })
        .collect()
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub singularity: SingularityConfig,
    pub field: FieldConfig,
    pub generators: Vec<GeneratorConfig>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            parameters: ParametersConfig::default(),
            singularity: SingularityConfig::default(),
            field: FieldConfig::default(),
            generators: default_generators(),
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}

fn unit_range(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { name, value })
    }
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: ScenarioConfig = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let e = &self.engine;
        positive("engine.physics_fps", e.physics_fps)?;
        positive("engine.thrust_repeat_ms", e.thrust_repeat_ms)?;
        unit_range("engine.replenish_tolerance", e.replenish_tolerance)?;

        let p = &self.parameters;
        positive("parameters.G", p.G)?;
        positive("parameters.C", p.C)?;
        // zero HBAR switches evaporation off
        if !(p.HBAR >= 0.0) {
            return Err(ConfigError::NonPositive { name: "parameters.HBAR", value: p.HBAR });
        }
        positive("parameters.gravity_scale", p.gravity_scale)?;
        positive("parameters.screen_width", p.screen_width)?;
        positive("parameters.universe_screens", p.universe_screens)?;
        positive("parameters.initial_radius_ratio", p.initial_radius_ratio)?;
        positive("parameters.influence_mult", p.influence_mult)?;

        let s = &self.singularity;
        positive("singularity.mass", s.mass)?;
        unit_range("singularity.ejection", s.ejection)?;
        finite("singularity.x", s.x[0])?;
        finite("singularity.x", s.x[1])?;
        finite("singularity.v_c", s.v_c[0])?;
        finite("singularity.v_c", s.v_c[1])?;
        let speed_c = (s.v_c[0] * s.v_c[0] + s.v_c[1] * s.v_c[1]).sqrt();
        if speed_c >= 1.0 - SPEED_MARGIN {
            return Err(ConfigError::Superluminal { speed_c });
        }

        let f = &self.field;
        positive("field.min_mass", f.min_mass)?;
        positive("field.max_mass", f.max_mass)?;
        if f.min_mass > f.max_mass {
            return Err(ConfigError::InvertedMassRange { min: f.min_mass, max: f.max_mass });
        }
        finite("field.target_mass", f.target_mass)?;
        if f.target_mass < 0.0 {
            return Err(ConfigError::NonPositive { name: "field.target_mass", value: f.target_mass });
        }
        positive("field.density", f.density)?;
        if !(f.max_speed_c >= 0.0 && f.max_speed_c < 1.0) {
            return Err(ConfigError::OutOfUnitRange { name: "field.max_speed_c", value: f.max_speed_c });
        }

        let g = &f.initial_group;
        finite("field.initial_group.offset_screens", g.offset_screens[0])?;
        finite("field.initial_group.offset_screens", g.offset_screens[1])?;
        finite("field.initial_group.radius_screens", g.radius_screens)?;
        finite("field.initial_group.v_c", g.v_c[0])?;
        finite("field.initial_group.v_c", g.v_c[1])?;

        for g in &self.generators {
            finite("generators.weight", g.weight)?;
            if g.weight < 0.0 {
                return Err(ConfigError::NegativeWeight { kind: g.kind.name(), weight: g.weight });
            }
        }
        if !self.generators.iter().any(|g| g.weight > 0.0) {
            return Err(ConfigError::NoGeneratorWeight);
        }

        Ok(())
    }

    /// Runtime parameters; masses are scaled by the singularity's starting mass
    pub fn to_parameters(&self) -> Parameters {
        let p = &self.parameters;
        let m = self.singularity.mass;
        let f = &self.field;

        Parameters {
            G: p.G,
            C: p.C,
            HBAR: p.HBAR,
            gravity_scale: p.gravity_scale,
            h0: 1.0 / self.engine.physics_fps,
            screen_width: p.screen_width,
            universe_radius: p.screen_width * p.universe_screens / 2.0,
            reference_mass: m,
            initial_radius_ratio: p.initial_radius_ratio,
            influence_mult: p.influence_mult,
            body_density: f.density,
            ejection_mass: self.singularity.ejection * m,
            thrust_repeat: self.engine.thrust_repeat_ms / 1000.0,
            target_mass: f.target_mass * m,
            min_body_mass: f.min_mass * m,
            max_body_mass: f.max_mass * m,
            max_group_speed: f.max_speed_c * p.C,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let cfg = ScenarioConfig::from_yaml_str("{}").unwrap();
        let p = cfg.to_parameters();
        let d = Parameters::default();
        assert_eq!(p.h0, d.h0);
        assert_eq!(p.universe_radius, d.universe_radius);
        assert!((p.target_mass - d.target_mass).abs() < 1e-3);
        assert!((p.ejection_mass - d.ejection_mass).abs() < 1e-9);
        assert_eq!(cfg.generators.len(), 7);
    }

    #[test]
    fn parses_sections() {
        let yaml = r#"
engine:
  seed: 7
  replenish: true
singularity:
  mass: 2.0e6
  v_c: [0.0, 0.2]
generators:
  - { kind: spiral, weight: 3.0 }
  - { kind: cross, weight: 1.0, color: 0x112233 }
"#;
        let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.engine.seed, Some(7));
        assert!(cfg.engine.replenish);
        assert_eq!(cfg.singularity.v_c, [0.0, 0.2]);
        assert_eq!(cfg.generators[0].kind, GroupKind::Spiral);
        assert_eq!(cfg.generators[1].color, Some(0x112233));
        assert_eq!(cfg.to_parameters().reference_mass, 2.0e6);
    }

    #[test]
    fn rejects_superluminal_start() {
        let err = ScenarioConfig::from_yaml_str("singularity: { v_c: [0.8, 0.8] }").unwrap_err();
        assert!(matches!(err, ConfigError::Superluminal { .. }));
    }

    #[test]
    fn rejects_speed_at_the_thrust_limit() {
        let err = ScenarioConfig::from_yaml_str("singularity: { v_c: [0.0, 0.9999999999] }").unwrap_err();
        assert!(matches!(err, ConfigError::Superluminal { .. }));
    }

    #[test]
    fn rejects_infinite_budget() {
        let err = ScenarioConfig::from_yaml_str("field: { target_mass: .inf }").unwrap_err();
        assert!(matches!(err, ConfigError::NonFinite { name: "field.target_mass", .. }));
    }

    #[test]
    fn rejects_nan_velocity() {
        let err = ScenarioConfig::from_yaml_str("singularity: { v_c: [.nan, 0.0] }").unwrap_err();
        assert!(matches!(err, ConfigError::NonFinite { name: "singularity.v_c", .. }));
    }

    #[test]
    fn rejects_inverted_masses() {
        let err = ScenarioConfig::from_yaml_str("field: { min_mass: 0.1, max_mass: 0.01 }").unwrap_err();
        assert!(matches!(err, ConfigError::InvertedMassRange { .. }));
    }

    #[test]
    fn rejects_all_zero_weights() {
        let err = ScenarioConfig::from_yaml_str("generators: [{ kind: disk, weight: 0.0 }]").unwrap_err();
        assert!(matches!(err, ConfigError::NoGeneratorWeight));
    }
}
