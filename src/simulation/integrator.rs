//! Fixed-step time integrators for a single body
//!
//! Bodies inside the singularity's influence radius use semi-implicit
//! (symplectic) Euler; bodies outside just drift at constant velocity.

use super::states::NVec2;

/// Advance one body by `dt` with semi-implicit Euler
/// Kick first with the acceleration, then drift with the updated velocity
pub fn semi_implicit_euler(x: &mut NVec2, v: &mut NVec2, a: &NVec2, dt: f64) {
    // Kick: v_n+1 = v_n + dt * a_n
    *v += dt * *a;

    // Drift: x_n+1 = x_n + dt * v_n+1
    *x += dt * *v;
}

/// Constant-velocity drift: x_n+1 = x_n + dt * v_n
pub fn drift(x: &mut NVec2, v: &NVec2, dt: f64) {
    *x += dt * *v;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_uses_updated_velocity() {
        let mut x = NVec2::zeros();
        let mut v = NVec2::new(1.0, 0.0);
        semi_implicit_euler(&mut x, &mut v, &NVec2::new(2.0, 0.0), 0.5);
        assert_eq!(v, NVec2::new(2.0, 0.0));
        // explicit Euler would give 0.5 here
        assert_eq!(x, NVec2::new(1.0, 0.0));
    }

    #[test]
    fn circular_orbit_stays_bounded() {
        // unit circular orbit under a = -x / |x|^3
        let mut x = NVec2::new(1.0, 0.0);
        let mut v = NVec2::new(0.0, 1.0);
        let dt = 0.01;
        for _ in 0..20_000 {
            let r = x.norm();
            let a = -x / (r * r * r);
            semi_implicit_euler(&mut x, &mut v, &a, dt);
        }
        let r = x.norm();
        assert!((r - 1.0).abs() < 0.02, "orbit drifted to r = {r}");
    }

    #[test]
    fn drift_is_linear() {
        let mut x = NVec2::new(1.0, 1.0);
        drift(&mut x, &NVec2::new(-2.0, 4.0), 0.25);
        assert_eq!(x, NVec2::new(0.5, 2.0));
    }
}
