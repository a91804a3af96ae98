//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds everything fixed at initialization:
//! - physical constants (`G`, `C`, `HBAR`) and the gravity scale,
//! - fixed physics step,
//! - universe and display scales,
//! - small-body mass budget, mass range and density,
//! - thrust ejection quantum and repeat interval
//!
//! Defaults are the values the game ships with (SI units throughout).

use std::f64::consts::PI;

/// Gravitational constant, m^3 kg^-1 s^-2
pub const G: f64 = 6.67430e-11;
/// Speed of light, m/s
pub const C: f64 = 299_792_458.0;
/// Reduced Planck constant, J s
pub const HBAR: f64 = 1.054571817e-34;

/// Starting singularity mass, kg
pub const M0: f64 = 1.52786e6;
/// Meters covered by one screen width
pub const SCREEN_WIDTH_METERS: f64 = 1.49896e8;

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub G: f64,                   // gravitational constant
    pub C: f64,                   // speed of light
    pub HBAR: f64,                // reduced Planck constant
    pub gravity_scale: f64,       // multiplier on the pseudo-relativistic acceleration
    pub h0: f64,                  // fixed physics step
    pub screen_width: f64,        // meters per screen width
    pub universe_radius: f64,     // wrap radius around the origin
    pub reference_mass: f64,      // mass at which the display ratio equals `initial_radius_ratio`
    pub initial_radius_ratio: f64,
    pub influence_mult: f64,      // influence radius in singularity display radii
    pub body_density: f64,        // small-body density, kg/m^3
    pub ejection_mass: f64,       // mass quantum per thrust pulse
    pub thrust_repeat: f64,       // seconds between repeated thrust pulses
    pub target_mass: f64,         // small-body mass budget
    pub min_body_mass: f64,
    pub max_body_mass: f64,
    pub max_group_speed: f64,     // bound on each random group velocity component
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G,
            C,
            HBAR,
            gravity_scale: 1e27,
            h0: 1.0 / 40.0,
            screen_width: SCREEN_WIDTH_METERS,
            universe_radius: SCREEN_WIDTH_METERS * 60.0 / 2.0,
            reference_mass: M0,
            initial_radius_ratio: 0.03,
            influence_mult: 5.0,
            body_density: 1e-14,
            ejection_mass: 0.01 * M0,
            thrust_repeat: 0.050,
            target_mass: 500.0 * M0,
            min_body_mass: 0.001 * M0,
            max_body_mass: 0.05 * M0,
            max_group_speed: 0.001 * C,
        }
    }
}

impl Parameters {
    /// Display radius as a fraction of the screen width, proportional to mass
    pub fn radius_ratio(&self, mass: f64) -> f64 {
        self.initial_radius_ratio * (mass / self.reference_mass)
    }

    /// Display radius of the singularity in meters
    pub fn display_radius(&self, mass: f64) -> f64 {
        self.radius_ratio(mass) * self.screen_width
    }

    /// Radius beyond which the singularity's gravity is ignored
    pub fn influence_radius(&self, mass: f64) -> f64 {
        self.display_radius(mass) * self.influence_mult
    }

    /// Radius of a small body of uniform density: r = cbrt(3m / (4 pi rho))
    pub fn body_radius(&self, mass: f64) -> f64 {
        ((3.0 * mass) / (4.0 * PI * self.body_density)).cbrt()
    }
}
