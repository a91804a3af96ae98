pub mod simulation;
pub mod configuration;
pub mod interface;
pub mod benchmark;

pub use simulation::states::{BodyId, Color, LifeState, NVec2, Singularity, SmallBody};
pub use simulation::params::Parameters;
pub use simulation::forces::{Acceleration, PseudoRelativisticGravity};
pub use simulation::integrator::{drift, semi_implicit_euler};
pub use simulation::evaporation::HawkingEvaporation;
pub use simulation::thrust::{ThrustDirection, ThrustModel, ThrustOutcome, ThrustRejection};
pub use simulation::boundary::UniverseBoundary;
pub use simulation::generator::{GroupGenerator, GroupKind, GroupParams, MassRange, Recipe, RecipeTable};
pub use simulation::field::{SmallBodyField, StepReport};
pub use simulation::engine::{InitialGroup, ReplenishPolicy, Simulation};
pub use simulation::scenario::Scenario;

pub use configuration::config::{ConfigError, EngineConfig, FieldConfig, GeneratorConfig, ParametersConfig, ScenarioConfig, SingularityConfig};

pub use interface::snapshot::{hud_text, RenderAdapter, Snapshot};
pub use interface::input::{InputAdapter, ThrustRepeater};

pub use benchmark::benchmark::bench_tick;
