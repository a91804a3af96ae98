pub mod states;
pub mod params;
pub mod forces;
pub mod integrator;
pub mod evaporation;
pub mod thrust;
pub mod boundary;
pub mod generator;
pub mod field;
pub mod clock;
pub mod engine;
pub mod scenario;
